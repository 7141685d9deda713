use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

pub const DEFAULT_API_URL: &str = "https://app.asana.com/api/1.0";

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub display: DisplayConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Page size for discovery listings (Asana allows 1..=100).
    #[serde(default = "default_page_size")]
    pub page_size: u32,
}

fn default_base_url() -> String {
    DEFAULT_API_URL.to_string()
}

fn default_page_size() -> u32 {
    100
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            page_size: default_page_size(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct DisplayConfig {
    #[serde(default = "default_interval_secs")]
    pub interval_secs: u64,
    #[serde(default = "default_placeholder")]
    pub placeholder: String,
    #[serde(default = "default_error_label")]
    pub error_label: String,
    /// Labels wider than this many columns are cut with an ellipsis.
    #[serde(default = "default_max_width")]
    pub max_width: usize,
}

fn default_interval_secs() -> u64 {
    60
}

fn default_placeholder() -> String {
    "Fetch task".to_string()
}

fn default_error_label() -> String {
    "Fetch failed".to_string()
}

fn default_max_width() -> usize {
    60
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            interval_secs: default_interval_secs(),
            placeholder: default_placeholder(),
            error_label: default_error_label(),
            max_width: default_max_width(),
        }
    }
}

pub fn config_dir() -> Result<PathBuf> {
    let dir = directories::ProjectDirs::from("", "", "asana-statusbar")
        .context("Could not determine config directory")?
        .config_dir()
        .to_path_buf();
    Ok(dir)
}

pub fn default_config_path() -> Result<PathBuf> {
    Ok(config_dir()?.join("config.toml"))
}

/// Load the config file.
///
/// An explicit path must exist. Without one, the default location is tried
/// and built-in defaults are used when nothing is there.
pub fn load(path: Option<&Path>) -> Result<Config> {
    let path = match path {
        Some(p) => {
            if !p.exists() {
                anyhow::bail!("Config file not found at {}", p.display());
            }
            p.to_path_buf()
        }
        None => match default_config_path() {
            Ok(p) if p.exists() => p,
            _ => return Ok(Config::default()),
        },
    };

    let content = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read config from {}", path.display()))?;

    let config: Config = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config from {}", path.display()))?;

    if config.display.interval_secs < 1 {
        anyhow::bail!(
            "Invalid config in {}: display.interval_secs must be at least 1",
            path.display()
        );
    }

    tracing::debug!("Loaded config from {}", path.display());
    Ok(config)
}
