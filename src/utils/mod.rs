//! Utility functions for the JVM tuner

use anyhow::{anyhow, Result};
use chrono::{DateTime, Utc};
use std::fs;
use std::path::{Path, PathBuf};

/// Ensure a directory exists, creating it if necessary
pub fn ensure_directory(path: &Path) -> Result<()> {
    if !path.exists() {
        fs::create_dir_all(path)?;
    } else if !path.is_dir() {
        return Err(anyhow!("Path exists but is not a directory: {:?}", path));
    }
    Ok(())
}

/// Ensure the parent directory of a file exists
pub fn ensure_parent_directory(path: &Path) -> Result<()> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => ensure_directory(parent),
        _ => Ok(()),
    }
}

/// Get the XDG config directory for the JVM tuner
pub fn get_config_dir() -> Result<PathBuf> {
    let config_dir = dirs::config_dir()
        .ok_or_else(|| anyhow!("Could not determine config directory"))?
        .join("jvm-tuner");

    Ok(config_dir)
}

/// Expand `~` and environment variables in a configured path
pub fn expand_path(path: &Path) -> Result<PathBuf> {
    let raw = path.to_string_lossy();
    let expanded = shellexpand::full(&raw)
        .map_err(|e| anyhow!("Failed to expand path {:?}: {}", path, e))?;
    Ok(PathBuf::from(expanded.into_owned()))
}

/// Header written at the top of generated options files
pub fn generated_header(gc: &str, at: DateTime<Utc>) -> Vec<String> {
    vec![
        "###########################################################################".to_string(),
        format!(
            "# Generated by jvm-tuner {} for {} at {}",
            env!("CARGO_PKG_VERSION"),
            gc,
            at.to_rfc3339()
        ),
        "# Manual edits are overwritten on the next tuning run".to_string(),
        "###########################################################################".to_string(),
    ]
}
