use std::sync::Arc;

use prime_vitality::app::AppController;
use prime_vitality::config::AppConfig;
use prime_vitality::llm::create_client;
use prime_vitality::routes::app_routes;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let config = AppConfig::from_env()?;

    eprintln!("PrimeVitality v{}", env!("CARGO_PKG_VERSION"));
    eprintln!("   Model: {}", config.model);
    eprintln!("   API: http://0.0.0.0:{}/api/status", config.port);

    let llm = create_client(&config)?;
    let controller = Arc::new(AppController::new(llm, &config));
    let app = app_routes(controller);

    let listener = tokio::net::TcpListener::bind(("0.0.0.0", config.port)).await?;
    tracing::info!(port = config.port, "PrimeVitality server started");
    axum::serve(listener, app).await?;

    Ok(())
}
