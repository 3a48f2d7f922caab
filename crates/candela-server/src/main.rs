use std::sync::Arc;

use candela_core::auth::PasswordHasher;
use candela_core::services::Services;
use candela_core::store::{MemoryEngine, SledEngine, StorageEngine};
use candela_server::media::MediaClient;
use candela_server::{app, AppState, ServerConfig};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = ServerConfig::from_env()?;

    let engine: Arc<dyn StorageEngine> = match &config.data_dir {
        Some(dir) => {
            info!(path = %dir.display(), "opening sled store");
            Arc::new(SledEngine::open(dir)?)
        }
        None => {
            warn!("DATA_DIR not set; using the in-memory store (nothing persists)");
            Arc::new(MemoryEngine::new())
        }
    };

    let services = Arc::new(Services::new(engine, PasswordHasher::default()));
    let media = Arc::new(MediaClient::new(&config.media));
    if config.media.upload_url.is_none() {
        warn!("media hosting is not configured; POST /api/upload will fail");
    }

    let addr = format!("{}:{}", config.bind_addr, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!(%addr, "candela server listening");

    axum::serve(listener, app(AppState::new(services, media))).await?;
    Ok(())
}
