use anyhow::{Context, Result};
use clap::Parser;
use refract_config::Configuration;
use refract_gateway::shutdown::ShutdownCoordinator;
use refract_gateway::{server, RouteTable};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::process;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// A JSON-transforming one-hop proxy gateway.
#[derive(Debug, Parser)]
#[command(name = "refract", version, about)]
struct Cli {
    /// Path to the route configuration file
    #[arg(short, long, default_value = "routes.yaml")]
    config: PathBuf,

    /// Address to listen on
    #[arg(short, long, default_value = "0.0.0.0:8080")]
    listen: SocketAddr,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();

    info!(version = env!("CARGO_PKG_VERSION"), "starting refract");

    let configuration = Configuration::from_path(&cli.config)
        .with_context(|| format!("loading {}", cli.config.display()))?;
    let table = RouteTable::from_config(configuration).context("route setup failed")?;

    let client = reqwest::Client::new();
    let app = server::router(table, client);

    let shutdown = ShutdownCoordinator::new();
    shutdown.listen_for_signals();

    let code = server::serve(cli.listen, app, shutdown).await?;
    info!(code, "stopped");
    process::exit(code)
}
