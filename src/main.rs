use alice_skill::{build_router, telemetry, AppError, AppState, Config};

#[tokio::main]
async fn main() {
    let config = Config::load();

    if let Err(err) = run(config).await {
        eprintln!("alice-skill: {err}");
        std::process::exit(1);
    }
}

async fn run(config: Config) -> Result<(), AppError> {
    let level = telemetry::init(&config.log_level)?;

    let addr = config.listen_addr();
    tracing::info!(address = %addr, level = %level, "Running server");

    let app = build_router(AppState::new());

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|source| AppError::Bind {
            addr: addr.clone(),
            source,
        })?;

    axum::serve(listener, app).await.map_err(AppError::Serve)
}
