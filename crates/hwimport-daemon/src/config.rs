//! Configuration loading and validation

use anyhow::{Context, Result};
use hwimport_core::{validate_catalog, Discoverer};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub daemon: DaemonConfig,
    #[serde(default)]
    pub web: WebConfig,
    /// Discoverers offered to the import screen, in display order
    #[serde(default, rename = "discoverer")]
    pub discoverers: Vec<Discoverer>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DaemonConfig {
    /// Bind address for web server
    #[serde(default = "default_bind")]
    pub bind: String,
    /// TLS configuration (optional - enables HTTPS when present)
    #[serde(default)]
    pub tls: Option<TlsConfig>,
}

impl Default for DaemonConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
            tls: None,
        }
    }
}

/// TLS/HTTPS configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TlsConfig {
    /// Path to certificate file (PEM format)
    pub cert: String,
    /// Path to private key file (PEM format)
    pub key: String,
}

fn default_bind() -> String {
    "0.0.0.0:8080".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebConfig {
    /// Directory with the static frontend
    #[serde(default = "default_web_path")]
    pub path: String,
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            path: default_web_path(),
        }
    }
}

fn default_web_path() -> String {
    "web".to_string()
}

/// Load configuration from file
pub fn load_config(path: &Path) -> Result<Config> {
    if !path.exists() {
        info!(
            path = %path.display(),
            "Configuration file not found, using defaults"
        );
        return Ok(Config::default());
    }

    let content = std::fs::read_to_string(path)?;
    let config = parse_config(&content)
        .with_context(|| format!("Invalid configuration in {}", path.display()))?;
    info!(
        path = %path.display(),
        discoverers = config.discoverers.len(),
        "Loaded configuration"
    );
    Ok(config)
}

/// Parse and validate configuration text
pub fn parse_config(content: &str) -> Result<Config> {
    let config: Config = toml::from_str(content)?;
    validate_catalog(&config.discoverers)?;
    Ok(config)
}
