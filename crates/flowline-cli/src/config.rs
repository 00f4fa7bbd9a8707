//! Engine configuration lookup.
//!
//! The CLI reads an optional TOML file with `[router]`, `[grouping]` and
//! `[interaction]` tables. Missing tables and keys keep their defaults.

use std::{
    fs,
    path::{Path, PathBuf},
};

use directories::ProjectDirs;
use log::{debug, info};
use thiserror::Error;

use flowline::{FlowlineError, config::EngineConfig};

/// Failures while locating or decoding a configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to parse TOML configuration: {0}")]
    Parse(String),

    #[error("Missing configuration file: {0}")]
    MissingFile(PathBuf),
}

impl From<ConfigError> for FlowlineError {
    fn from(err: ConfigError) -> Self {
        FlowlineError::Config(err.to_string())
    }
}

/// Returns the engine configuration for this run.
///
/// A path given with `--config` must exist. Without one, the first file found
/// among `flowline/config.toml` in the working directory and `config.toml` in
/// the per-user Flowline config directory is used; if neither exists the
/// built-in defaults apply.
///
/// # Errors
///
/// Returns [`FlowlineError::Config`] when the `--config` file is missing or
/// when the chosen file is not valid TOML for [`EngineConfig`].
pub fn load_config(explicit_path: Option<impl AsRef<Path>>) -> Result<EngineConfig, FlowlineError> {
    if let Some(path) = explicit_path {
        let path = path.as_ref();
        info!(path = path.display().to_string(); "Using configuration given on the command line");
        return read_engine_config(path);
    }

    let candidates = [
        Some(PathBuf::from("flowline/config.toml")),
        ProjectDirs::from("com", "flowline", "flowline")
            .map(|dirs| dirs.config_dir().join("config.toml")),
    ];
    for candidate in candidates.into_iter().flatten() {
        if candidate.exists() {
            info!(path = candidate.display().to_string(); "Using discovered configuration");
            return read_engine_config(&candidate);
        }
        debug!(path = candidate.display().to_string(); "No configuration here");
    }

    debug!("Falling back to built-in engine defaults");
    Ok(EngineConfig::default())
}

fn read_engine_config(path: &Path) -> Result<EngineConfig, FlowlineError> {
    if !path.exists() {
        return Err(ConfigError::MissingFile(path.to_path_buf()).into());
    }

    let content = fs::read_to_string(path)?;
    toml::from_str(&content).map_err(|e| ConfigError::Parse(e.to_string()).into())
}
