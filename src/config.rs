use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::api::Language;

pub const DEFAULT_API_URL: &str = "http://localhost:8000";
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub api_base_url: String,
    pub language: Language,
    pub request_timeout_secs: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_URL.to_string(),
            language: Language::En,
            request_timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl AppConfig {
    pub fn config_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("medicare-ai")
    }

    pub fn load(dir: &Path) -> Self {
        let mut config = Self::load_file(dir);

        // Override with environment variable if set
        if let Ok(url) = std::env::var("MEDICARE_API_URL") {
            if !url.is_empty() {
                config.api_base_url = url;
            }
        }

        config
    }

    /// The stored config as written on disk, without the env override.
    /// Changes meant to be persisted start from this view.
    pub fn load_file(dir: &Path) -> Self {
        let config_path = dir.join("config.json");
        if config_path.exists() {
            match std::fs::read_to_string(&config_path) {
                Ok(content) => serde_json::from_str(&content).unwrap_or_default(),
                Err(_) => Self::default(),
            }
        } else {
            let c = Self::default();
            c.save(dir);
            c
        }
    }

    pub fn save(&self, dir: &Path) {
        std::fs::create_dir_all(dir).ok();
        let config_path = dir.join("config.json");
        if let Ok(content) = serde_json::to_string_pretty(self) {
            std::fs::write(config_path, content).ok();
        }
    }
}
