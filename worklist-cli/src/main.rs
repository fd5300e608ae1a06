mod cli;
mod commands;
mod paths;
mod session_store;

use std::{io::IsTerminal, sync::Arc};

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use tracing_subscriber::{fmt::time::LocalTime, EnvFilter};
use worklist::{
    adapters::outbound::{AtomwalkBackend, InMemoryBackend},
    domain::{services::TaskBoard, SessionContext},
    Settings,
};

use crate::cli::{Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let config_path = match &cli.global.config {
        Some(path) => path.clone(),
        None => paths::config_path()?,
    };
    let mut settings = Settings::load(Some(&config_path))
        .with_context(|| format!("Failed to load config at {}", config_path.display()))?;
    if let Some(url) = atomwalk::AtomwalkURL::from_env() {
        settings.backend.base_url = url.as_ref().to_string();
    }

    init_tracing(&settings.logging.level, cli.global.verbose)?;

    if let Commands::ConfigPath = cli.command {
        println!("config:  {}", config_path.display());
        println!("session: {}", paths::session_path()?.display());
        return Ok(());
    }

    let mut options = settings.board_options();
    commands::apply_overrides(&mut options, &cli.command);

    if cli.global.dev {
        tracing::info!("Using in-memory data");
        let session = SessionContext::new("DEV", "dev-token").with_emp_id("EMP-004");
        let mut board = TaskBoard::new(Arc::new(InMemoryBackend::seeded()), session, options);
        return commands::run(&mut board, cli.command, cli.global.json).await;
    }

    let session_path = paths::session_path()?;
    let session = session_store::load_session(&session_path)?.with_context(|| {
        format!(
            "No signed-in session found at {}. Sign in with the app first or use --dev.",
            session_path.display()
        )
    })?;
    tracing::debug!(?session, base_url = %settings.backend.base_url, "Loaded session");

    let backend = AtomwalkBackend::from_session(&session, &settings.backend)?;
    let mut board = TaskBoard::new(Arc::new(backend), session, options);
    commands::run(&mut board, cli.command, cli.global.json).await
}

/// `RUST_LOG` wins unless `-v` was given.
fn init_tracing(level: &str, verbose: u8) -> Result<()> {
    let level = match verbose {
        0 => level,
        1 => "debug",
        _ => "trace",
    };
    let filter = if verbose == 0 {
        EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(level))
    } else {
        EnvFilter::try_new(level)
    }
    .or_else(|_| EnvFilter::try_new("warn"))
    .map_err(|e| anyhow!("invalid log level: {e}"))?;

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_timer(LocalTime::rfc_3339())
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .try_init();

    Ok(())
}
