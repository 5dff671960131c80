use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;

use anyhow::Context;
use clap::Parser;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use pyq_harvester::app::AppContext;
use pyq_harvester::cli::{commands, Cli, Commands};
use pyq_harvester::config::Config;

/// Log to the console and append the same events to `log_file`
fn init_tracing(log_file: &Path) -> anyhow::Result<()> {
    if let Some(parent) = log_file.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create log directory {}", parent.display()))?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_file)
        .with_context(|| format!("Failed to open log file {}", log_file.display()))?;

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(fmt::layer().with_ansi(false).with_writer(Mutex::new(file)))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = Config::load(cli.config.as_deref())?;

    init_tracing(&config.storage.log_file)?;
    info!("=== Starting PYQ harvester ===");

    let ctx = AppContext::new(config)?;

    match cli.command.unwrap_or(Commands::Run) {
        Commands::Run => {
            commands::run(&ctx).await?;
        }
        Commands::Scrape { board } => {
            commands::scrape(&ctx, board.as_deref()).await?;
        }
        Commands::Analyze => {
            commands::analyze_and_print(&ctx);
        }
        Commands::Sources => {
            commands::list_sources(&ctx);
        }
    }

    info!("=== PYQ harvester finished ===");
    Ok(())
}
