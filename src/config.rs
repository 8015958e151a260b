use std::env;
use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};

const CONFIG_DIR_NAME: &str = "triagectl";
const CONFIG_FILE_NAME: &str = "config.json";
const DEFAULT_BASE_URL: &str = "http://localhost:8000";

/// What the user has saved on disk. Every field optional so a partial file
/// still loads.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StoredConfig {
    pub base_url: Option<String>,
    pub default_user_id: Option<String>,
}

impl StoredConfig {
    pub fn load() -> AppResult<Self> {
        let path = config_file_path()?;
        match fs::read_to_string(&path) {
            Ok(contents) => serde_json::from_str(&contents)
                .map_err(|err| AppError::Configuration(format!("invalid config file: {err}"))),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(err) => Err(AppError::Io(err)),
        }
    }

    pub fn save(&self) -> AppResult<()> {
        let path = config_file_path()?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let data = serde_json::to_string_pretty(self)
            .map_err(|err| AppError::Configuration(format!("failed to encode config: {err}")))?;
        fs::write(&path, data)?;
        Ok(())
    }
}

/// Resolved runtime configuration: stored values with environment overrides
/// applied, falling back to the local development service.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub base_url: String,
    pub default_user_id: Option<String>,
}

impl AppConfig {
    pub fn load() -> AppResult<Self> {
        let stored = StoredConfig::load()?;
        let base_url = env::var("TRIAGECTL_BASE_URL")
            .ok()
            .filter(|value| !value.trim().is_empty())
            .or(stored.base_url)
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        Ok(Self {
            base_url,
            default_user_id: stored.default_user_id,
        })
    }
}

pub fn config_directory() -> AppResult<PathBuf> {
    if let Some(dir) = env::var_os("XDG_CONFIG_HOME") {
        return Ok(PathBuf::from(dir).join(CONFIG_DIR_NAME));
    }
    let home = env::var_os("HOME")
        .ok_or_else(|| AppError::Configuration("HOME is not set".to_string()))?;
    Ok(PathBuf::from(home).join(".config").join(CONFIG_DIR_NAME))
}

pub fn config_file_path() -> AppResult<PathBuf> {
    Ok(config_directory()?.join(CONFIG_FILE_NAME))
}
