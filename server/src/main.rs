use std::path::PathBuf;

use clap::Parser;
use tracing::info;

use printshop::config::{config_source, resolve_config};
use printshop::logging::init_tracing;
use printshop_server::{serve, AppState};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to a JSON config file
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Address to bind, overriding config and environment
    #[arg(long)]
    host: Option<String>,
    /// Port to bind, overriding config and environment
    #[arg(short, long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let cli = Cli::parse();

    let mut config = resolve_config(cli.config.as_deref())?;
    if let Some(host) = cli.host {
        config.server.host = host;
    }
    if let Some(port) = cli.port {
        config.server.port = port;
    }

    init_tracing(&config.logging)?;
    info!("Starting printshop server v{}", env!("CARGO_PKG_VERSION"));
    match config_source(cli.config.as_deref()) {
        Some(path) => info!("Loaded configuration from {:?}", path),
        None => info!("No configuration file found, using defaults"),
    }

    let state = AppState::new(config);
    serve(state).await?;

    Ok(())
}
