//! HTTP server for the shift pay engine.
//!
//! Reads `PAY_ENGINE_CONFIG` (default `./config/default`) for the rate table
//! and worker defaults, and listens on `PAY_ENGINE_ADDR` (default
//! `127.0.0.1:3000`). Log verbosity follows `RUST_LOG`.

use std::env;
use std::net::SocketAddr;

use shift_pay_engine::api::{AppState, create_router};
use shift_pay_engine::config::ConfigLoader;
use tracing::info;
use tracing_subscriber::EnvFilter;

const DEFAULT_ADDR: &str = "127.0.0.1:3000";
const DEFAULT_CONFIG_DIR: &str = "./config/default";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config_dir = env::var("PAY_ENGINE_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG_DIR.to_string());
    let config = ConfigLoader::load(&config_dir)?;
    info!(config_dir = %config_dir, "Loaded configuration");

    let app = create_router(AppState::new(config));

    let addr: SocketAddr = env::var("PAY_ENGINE_ADDR")
        .unwrap_or_else(|_| DEFAULT_ADDR.to_string())
        .parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
