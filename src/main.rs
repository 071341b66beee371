//! HTTP server for the Payroll Calculation Engine.
//!
//! Reads rate tables from `PAYROLL_CONFIG_DIR` (default `./config/kenya`) and
//! listens on `PAYROLL_BIND_ADDR` (default `0.0.0.0:8080`).

use std::env;
use std::error::Error;

use payroll_engine::api::{create_router, AppState};
use payroll_engine::config::ConfigLoader;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const DEFAULT_CONFIG_DIR: &str = "./config/kenya";
const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config_dir = env::var("PAYROLL_CONFIG_DIR").unwrap_or_else(|_| DEFAULT_CONFIG_DIR.into());
    let bind_addr = env::var("PAYROLL_BIND_ADDR").unwrap_or_else(|_| DEFAULT_BIND_ADDR.into());

    let config = ConfigLoader::load(&config_dir)?;
    info!(
        config_dir = %config_dir,
        jurisdiction = %config.jurisdiction().code,
        rate_tables = config.config().rates().len(),
        "Configuration loaded"
    );

    let state = AppState::new(&config)?;
    let listener = TcpListener::bind(&bind_addr).await?;
    info!(bind_addr = %bind_addr, "Payroll engine listening");

    axum::serve(listener, create_router(state)).await?;
    Ok(())
}
