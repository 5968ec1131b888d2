use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const APP_NAME: &str = "symdex";
const CONFIG_FILE: &str = "config.json";

/// Environment variable overriding the config file location
pub const CONFIG_ENV: &str = "SYMDEX_CONFIG";

/// Application configuration stored in the platform config directory
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Payload files loaded when none are given on the command line
    #[serde(default)]
    pub data_files: Vec<PathBuf>,

    /// Maximum number of query results printed
    #[serde(default = "default_limit")]
    pub default_limit: usize,

    /// Colored output when writing to a terminal
    #[serde(default = "default_color")]
    pub color: bool,
}

fn default_limit() -> usize {
    50
}

fn default_color() -> bool {
    true
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_files: Vec::new(),
            default_limit: default_limit(),
            color: default_color(),
        }
    }
}

impl AppConfig {
    /// Load config from the config directory, or return default if not found
    pub fn load() -> Result<Self> {
        match get_config_path() {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }

    /// Load config from an explicit path, or return default if it does not exist
    pub fn load_from(config_path: &Path) -> Result<Self> {
        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(config_path)
            .with_context(|| format!("Failed to read config file {}", config_path.display()))?;
        let config: AppConfig = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file {}", config_path.display()))?;
        Ok(config)
    }

    /// Save config to `config_path`, creating parent directories
    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(self)
            .context("Failed to serialize config")?;
        fs::write(config_path, content)
            .context("Failed to write config file")?;
        Ok(())
    }
}

/// Get the path to the config file
///
/// `SYMDEX_CONFIG` wins over the platform config directory.
pub fn get_config_path() -> Option<PathBuf> {
    if let Some(path) = std::env::var_os(CONFIG_ENV) {
        return Some(PathBuf::from(path));
    }
    dirs::config_dir().map(|dir| dir.join(APP_NAME).join(CONFIG_FILE))
}
