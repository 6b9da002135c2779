//! Serve command - expose the game session as a JSON API

use std::net::IpAddr;

use anyhow::{Context, Result};
use clap::Args;

use tictac_server::{run_server, ServerConfig};

#[derive(Args)]
pub struct ServerArgs {
    /// Address to bind; anything but loopback lets other hosts drive the game
    #[arg(long, default_value_t = ServerConfig::default().host)]
    pub host: IpAddr,

    /// Port number to listen on
    #[arg(long, default_value_t = ServerConfig::default().port)]
    pub port: u16,
}

impl From<&ServerArgs> for ServerConfig {
    fn from(args: &ServerArgs) -> Self {
        Self {
            host: args.host,
            port: args.port,
        }
    }
}

pub fn run(args: ServerArgs) -> Result<()> {
    let config = ServerConfig::from(&args);

    if !config.host.is_loopback() {
        tracing::warn!(
            host = %config.host,
            "binding a non-loopback address, every client shares the one game"
        );
    }

    let runtime = tokio::runtime::Runtime::new().context("failed to create tokio runtime")?;
    runtime.block_on(run_server(config))
}
