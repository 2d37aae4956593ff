//! Configuration resolution for Lactea
//!
//! Priority:
//! 1. `--config <path>` (or `LACTEA_CONFIG`)
//! 2. `$LACTEA_HOME/config.toml` if it exists
//! 3. Built-in defaults

use crate::cli::error::HelpfulError;
use anyhow::{bail, Context, Result};
use lactea_logging::lactea_home;
use lactea_validation::{ConfigError, EngineConfig};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Default config file location: ~/.lactea/config.toml
pub fn default_config_path() -> PathBuf {
    lactea_home().join("config.toml")
}

pub fn resolve(explicit: Option<&Path>) -> Result<EngineConfig> {
    if let Some(path) = explicit {
        if !path.exists() {
            return Err(HelpfulError::file_not_found(path).into());
        }
        return load(path);
    }

    let fallback = default_config_path();
    if fallback.exists() {
        return load(&fallback);
    }

    debug!("No config file found, using defaults");
    Ok(EngineConfig::default())
}

fn load(path: &Path) -> Result<EngineConfig> {
    let config = EngineConfig::load(path).map_err(|err| match err {
        ConfigError::Io(e) => anyhow::Error::new(e)
            .context(format!("Failed to read config {}", path.display())),
        other => HelpfulError::invalid_config(path, &other.to_string()).into(),
    })?;
    debug!(path = %path.display(), "Loaded engine config");
    Ok(config)
}

/// `lactea config init`
pub fn init(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        bail!(
            "{} already exists (use --force to overwrite)",
            path.display()
        );
    }
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    EngineConfig::default()
        .save(path)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    println!("Wrote default configuration to {}", path.display());
    Ok(())
}

/// `lactea config show`
pub fn show(config: &EngineConfig) -> Result<()> {
    print!("{}", config.to_toml_string()?);
    Ok(())
}
