//! Clock Display Client
//!
//! Connects to a clock server over WebSocket and renders every pushed time
//! update on a single terminal line, reconnecting after each closure.

mod client;
mod config;
mod display;

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use tokio::signal;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use client::ClockClient;
use config::{ClientConfig, CONFIG_FILE};
use display::TerminalDisplay;

/// Clock Display Client
///
/// Renders time updates pushed by a WebSocket clock server
#[derive(Parser, Debug)]
#[command(name = "clock-display")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to the TOML configuration file
    #[arg(short, long, default_value = CONFIG_FILE)]
    config: PathBuf,

    /// WebSocket endpoint (overrides the config file)
    #[arg(short, long)]
    url: Option<String>,

    /// Delay before reconnecting, in milliseconds (overrides the config file)
    #[arg(long)]
    reconnect_delay_ms: Option<u64>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Initialize logging
    let log_level = if args.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };

    // Stdout belongs to the clock line
    FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();

    info!("Clock Display v{}", env!("CARGO_PKG_VERSION"));

    let mut config = ClientConfig::load(&args.config)?;
    if let Some(url) = args.url {
        config = config.with_url(url);
    }
    if let Some(delay_ms) = args.reconnect_delay_ms {
        config = config.with_reconnect_delay(Duration::from_millis(delay_ms));
    }

    let client = Arc::new(ClockClient::new(config, Arc::new(TerminalDisplay::new())));
    let client_handle = Arc::clone(&client);

    // Spawn shutdown signal handler
    tokio::spawn(async move {
        shutdown_signal().await;
        info!("Initiating shutdown...");
        client_handle.stop();
    });

    client.start().await??;

    println!();
    info!("Shutdown complete");
    Ok(())
}

/// Wait for shutdown signal (SIGTERM or SIGINT)
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received SIGINT (Ctrl+C)");
        }
        _ = terminate => {
            info!("Received SIGTERM");
        }
    }
}
