use anyhow::{Context, Result};
use std::path::PathBuf;

fn root_path() -> Result<PathBuf> {
    Ok(dirs::config_dir()
        .context("Cannot determine config directory")?
        .join("worklist"))
}

pub fn config_path() -> Result<PathBuf> {
    Ok(root_path()?.join("config.toml"))
}

pub fn session_path() -> Result<PathBuf> {
    Ok(root_path()?.join("session.toml"))
}
