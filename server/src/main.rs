//! Relay server binary.
//! Serves the static client and the `/ws` relay endpoint on one port.
mod config;
mod relay;

use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;

use axum::{Router, routing::get};
use tokio::sync::Mutex;
use tower_http::services::ServeDir;

use config::ServerConfig;
use relay::{RelayState, SharedRelay};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = ServerConfig::from_env()?;
    let relay: SharedRelay = Arc::new(Mutex::new(RelayState::new()));
    let app = router(relay, &config.static_dir);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = tokio::net::TcpListener::bind(addr).await?;

    log::info!("Starting relay server...");
    log::info!("  HTTP:      http://localhost:{}", config.port);
    log::info!("  WebSocket: ws://localhost:{}/ws", config.port);
    log::info!("  Assets:    {}", config.static_dir.display());

    axum::serve(listener, app).await?;
    Ok(())
}

fn router(relay: SharedRelay, static_dir: &Path) -> Router {
    Router::new()
        .route("/ws", get(relay::ws_handler))
        .fallback_service(ServeDir::new(static_dir))
        .with_state(relay)
}
