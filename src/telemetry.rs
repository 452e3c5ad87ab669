//! Log subscriber setup.
//!
//! Installed once at startup from the configured verbosity. The level names
//! accepted are those of `tracing`: `trace`, `debug`, `info`, `warn`,
//! `error`, `off`.

use tracing::level_filters::LevelFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::error::AppError;

/// Parses a verbosity level name.
pub fn parse_level(level: &str) -> Result<LevelFilter, AppError> {
    level
        .trim()
        .parse::<LevelFilter>()
        .map_err(|_| AppError::InvalidLogLevel(level.to_string()))
}

/// Installs the global subscriber and returns the level it filters at.
pub fn init(level: &str) -> Result<LevelFilter, AppError> {
    let level = parse_level(level)?;
    let filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .parse_lossy("");

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .try_init()?;

    Ok(level)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_levels() {
        assert_eq!(parse_level("debug").unwrap(), LevelFilter::DEBUG);
        assert_eq!(parse_level("INFO").unwrap(), LevelFilter::INFO);
        assert_eq!(parse_level(" warn ").unwrap(), LevelFilter::WARN);
        assert_eq!(parse_level("off").unwrap(), LevelFilter::OFF);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(matches!(
            parse_level("chatty"),
            Err(AppError::InvalidLogLevel(level)) if level == "chatty"
        ));
    }
}
