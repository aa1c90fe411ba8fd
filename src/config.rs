// Front-end configuration loaded from YAML

use crate::filter::Tab;
use eyre::{Context, Result, eyre};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Initial contents of the store
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Seed {
    /// The five built-in demo tasks
    #[default]
    Demo,
    /// Start with no tasks
    Empty,
}

/// Settings for the `tasklist` binary
///
/// Every field is optional in the file; missing fields take the defaults.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    /// Tab shown when the shell starts
    pub default_tab: Tab,

    /// Initial task list
    pub seed: Seed,

    /// Style finished tasks with terminal colors
    pub color: bool,

    /// Shell prompt
    pub prompt: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_tab: Tab::All,
            seed: Seed::Demo,
            color: true,
            prompt: "> ".to_string(),
        }
    }
}

impl Config {
    pub fn validate(&self) -> Result<()> {
        if self.prompt.trim().is_empty() {
            return Err(eyre!("prompt must not be empty"));
        }
        Ok(())
    }

    /// Load from `path`, or from the default location when `path` is None
    ///
    /// A missing file yields `Config::default()`.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => load_config(path),
            None => match default_path() {
                Some(path) => load_config(&path),
                None => Ok(Self::default()),
            },
        }
    }
}

/// `<config_dir>/tasklist/config.yaml`
pub fn default_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("tasklist").join("config.yaml"))
}

/// Load config from a YAML file
///
/// If the file is missing, returns `Config::default()`.
pub fn load_config(path: &Path) -> Result<Config> {
    if !path.exists() {
        debug!(path = %path.display(), "Config file not found, using defaults");
        return Ok(Config::default());
    }

    let raw = fs::read_to_string(path).with_context(|| format!("Failed to read config file {}", path.display()))?;

    // An empty file parses as null; treat it like a missing one
    if raw.trim().is_empty() {
        return Ok(Config::default());
    }

    let config: Config =
        serde_yaml::from_str(&raw).with_context(|| format!("Failed to parse config file {}", path.display()))?;
    config.validate()?;

    debug!(path = %path.display(), ?config, "Loaded config");
    Ok(config)
}
