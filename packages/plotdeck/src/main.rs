use anyhow::Result;
use clap::Parser;
use tracing::info;
use tracing_subscriber::prelude::*;

use plotdeck::{ManagerConfig, PlotManager};

#[derive(Parser)]
#[command(name = "plotdeck")]
#[command(about = "Live plot directory and thumbnail preview manager")]
struct Cli {
    /// Base port for the web interface (control channel binds base + 1)
    #[arg(short, long)]
    port: Option<u16>,

    /// Host to bind both listeners to
    #[arg(short = 'b', long)]
    host: Option<String>,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let default_directive = if cli.debug {
        "plotdeck=debug,figure_registry=debug,tower_http=debug,info"
    } else {
        "plotdeck=info,figure_registry=info,tower_http=info,warn"
    };
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_directive));
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(env_filter)
        .init();

    let mut config = ManagerConfig::from_env();
    if let Some(port) = cli.port {
        config.base_port = port;
    }
    if let Some(host) = cli.host {
        config.bind_host = host;
    }

    let manager = PlotManager::start(config).await?;

    info!("Viewer page:     {}/", manager.url());
    info!("Thumbnail page:  {}/thumbs", manager.url());
    info!(
        "Control channel: ws://{}:{}/",
        manager.config().advertised_ip,
        manager.config().control_port()
    );

    tokio::signal::ctrl_c().await?;
    info!("Received shutdown signal, stopping servers...");
    manager.shutdown();

    Ok(())
}
