use anyhow::{Context, Result};
use live_language_switch::{
    config::Config,
    i18n::StringCatalog,
    server::{self, AppState},
};
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file (ignored in production)
    let _ = dotenvy::dotenv();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("live_language_switch=info".parse()?),
        )
        .init();

    let config = Config::from_env()?;

    info!("Loading string tables from {}", config.strings_dir);
    let catalog = StringCatalog::load_dir(&config.strings_dir)?;
    info!("Languages with strings: {}", catalog.languages().join(", "));

    let listener = tokio::net::TcpListener::bind(("0.0.0.0", config.port))
        .await
        .with_context(|| format!("Failed to bind port {}", config.port))?;

    server::serve(listener, AppState::new(catalog)).await
}
