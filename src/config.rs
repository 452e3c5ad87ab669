use std::env;

use clap::Parser;

/// Command-line flags.
#[derive(Parser, Debug)]
#[command(name = "alice-skill", about = "Voice-assistant webhook server")]
pub struct Cli {
    /// Address and port to run server
    #[arg(short = 'a', default_value = ":8080")]
    pub run_addr: String,

    /// Log level
    #[arg(short = 'l', default_value = "info")]
    pub log_level: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub run_addr: String,
    pub log_level: String,
}

impl Config {
    /// Flags first, then `RUN_ADDR` / `LOG_LEVEL` from the environment win.
    pub fn load() -> Self {
        Self::from(Cli::parse()).with_env_overrides(|key| env::var(key).ok())
    }

    /// Applies environment overrides; empty values are ignored.
    pub fn with_env_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(addr) = lookup("RUN_ADDR").filter(|v| !v.is_empty()) {
            self.run_addr = addr;
        }
        if let Some(level) = lookup("LOG_LEVEL").filter(|v| !v.is_empty()) {
            self.log_level = level;
        }
        self
    }

    /// Address in a form the listener accepts; `:8080` means all interfaces.
    pub fn listen_addr(&self) -> String {
        if self.run_addr.starts_with(':') {
            format!("0.0.0.0{}", self.run_addr)
        } else {
            self.run_addr.clone()
        }
    }
}

impl From<Cli> for Config {
    fn from(cli: Cli) -> Self {
        Self {
            run_addr: cli.run_addr,
            log_level: cli.log_level,
        }
    }
}
