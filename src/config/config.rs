use std::env;
use std::fs;
use std::path::PathBuf;
use serde::{Deserialize, Serialize};

use crate::constants::{BITBUCKET_API_ROOT, CONFIG_FILE, ENV_API_ROOT};
use crate::error::{BbError, BbResult};

#[derive(Debug, Default, Clone, Serialize, Deserialize, PartialEq)]
pub struct StoredCredentials {
    #[serde(default)]
    pub bb_username: String,
    #[serde(default)]
    pub bb_app_password: String,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct Config {
    pub auth_credentials: Option<StoredCredentials>,
    pub api_root: Option<String>,
}

pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(CONFIG_FILE))
}

pub fn load_config() -> Config {
    config_path()
        .map(|path| load_config_from(&path))
        .unwrap_or_default()
}

/// Reads a config file, falling back to defaults when it is missing or malformed.
pub fn load_config_from(path: &std::path::Path) -> Config {
    if !path.exists() {
        return Config::default();
    }

    match fs::read_to_string(path) {
        Ok(config_str) => serde_json::from_str(&config_str).unwrap_or_else(|e| {
            tracing::warn!("Ignoring malformed config {}: {}", path.display(), e);
            Config::default()
        }),
        Err(e) => {
            tracing::warn!("Failed to read config {}: {}", path.display(), e);
            Config::default()
        }
    }
}

pub fn save_config(config: &Config) -> BbResult<()> {
    let path = config_path()
        .ok_or_else(|| BbError::ConfigError("Could not find home directory".to_string()))?;
    save_config_to(config, &path)
}

pub fn save_config_to(config: &Config, path: &std::path::Path) -> BbResult<()> {
    let config_str = serde_json::to_string_pretty(config)?;
    fs::write(path, config_str)?;

    Ok(())
}

pub fn get_api_root() -> String {
    // First check environment variable
    if let Ok(root) = env::var(ENV_API_ROOT) {
        if !root.trim().is_empty() {
            return root;
        }
    }

    // Then check config file
    load_config()
        .api_root
        .unwrap_or_else(|| BITBUCKET_API_ROOT.to_string())
}
