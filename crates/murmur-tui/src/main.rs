//! murmur terminal client entry point.

use std::{fs::File, path::Path, sync::Mutex};

use clap::Parser;
use murmur_client::transport::TcpEngine;
use murmur_tui::{App, Args, Runtime, TerminalDriver};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    if let Some(path) = &args.log_file {
        init_logging(path, &args.log_level)?;
    }

    let session = args.session_config()?;
    let router = args.router_config();

    tracing::info!(
        server = %session.connect.addr(),
        encoding = session.encoding.name(),
        "Starting murmur"
    );

    let app = App::new(session, router);
    let driver = TerminalDriver::new()?;
    let runtime = Runtime::new(driver, TcpEngine::default(), app);

    runtime.run().await?;

    tracing::info!("Shutdown complete");
    Ok(())
}

/// Log to `path`. The terminal owns stdout, so logs never go there.
fn init_logging(path: &Path, level: &str) -> std::io::Result<()> {
    let file = File::create(path)?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(Mutex::new(file)).with_ansi(false))
        .with(filter)
        .init();

    Ok(())
}
