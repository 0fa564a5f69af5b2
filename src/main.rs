use crate::app_config::AppConfig;
use crate::sheets::GoogleSheets;
use crate::web::AppState;
use std::sync::Arc;
use tracing::info;

mod annotate;
mod app_config;
mod domain;
mod export;
mod geo_location_deserializer;
mod pipeline;
mod sheets;
mod web;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt().with_max_level(tracing::Level::INFO).init();

    info!("🪵 Starting {} v{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));

    let config = Arc::new(AppConfig::load()?);
    info!("✅  Loaded configuration");

    let client = sheets::new_client(&config)?;
    let source = Arc::new(GoogleSheets::new(client, config.clone()));
    info!(credentials_file = %config.google().credentials_file().display(), "✅  Initialized Google Sheets client");

    let state = AppState::new(source, config.clone())?;
    info!("✅  Registered page templates");

    info!("🔥 {} is up and running", env!("CARGO_PKG_NAME"));
    web::serve(config.server().address(), state).await?;

    Ok(())
}
