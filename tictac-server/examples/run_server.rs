//! Example to run the TICTAC server standalone
//!
//! Run with: cargo run -p tictac-server --example run_server

use tictac_server::{run_server, ServerConfig};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let config = ServerConfig::default();

    println!("Starting TICTAC server on {}", config.addr());
    println!("Open http://{}/api/game", config.addr());

    run_server(config).await
}
