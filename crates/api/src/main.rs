use anyhow::Result;
use tracing::info;

use charity_cms_api::{app, config, middleware, services};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    // Load configuration
    let config = config::Config::load()?;

    // Initialize logging and metrics
    middleware::logging::init_logging(&config.logging);
    middleware::metrics::init_metrics();

    info!("Starting Charity CMS API v{}", env!("CARGO_PKG_VERSION"));

    // Create database pool (schema is managed externally)
    let pool = persistence::db::create_pool(&config.database.pool_config()).await?;

    // Media-host client
    let media = services::media::build_media_store(&config.media)?;

    // Build application
    let app = app::create_app(config.clone(), pool, media);

    // Start server
    let addr = config.socket_addr();
    info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
