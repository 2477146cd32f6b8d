use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    pub log_level: String,
    pub log_dir: String,
    pub log_file: String,
    pub use_json: bool,
    /// never | hourly | daily
    pub rotation: String,
    /// YAML lookup tables overriding the built-in ones
    pub domains_file: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_dir: "./logs".to_string(),
            log_file: "order-fixtures.log".to_string(),
            use_json: false,
            rotation: "never".to_string(),
            domains_file: None,
        }
    }
}

impl AppConfig {
    /// Load `config/<env>.yaml`. A missing file yields the defaults; a file
    /// that exists but does not parse is an error.
    pub fn load(env: &str) -> Result<Self> {
        Self::load_from(Path::new(&format!("config/{}.yaml", env)))
    }

    pub fn load_from(config_path: &Path) -> Result<Self> {
        if !config_path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(config_path)
            .with_context(|| format!("Failed to read config file: {}", config_path.display()))?;
        serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config yaml: {}", config_path.display()))
    }
}
