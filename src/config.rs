//! Configuration handling for the document service.
//!
//! Configuration is stored as YAML and includes:
//! - Export and metadata endpoints for the document host
//! - An optional static bearer token
//! - The cache eviction policy

use std::env;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::document::cache::EvictionPolicy;
use crate::error::Result;

/// Environment variable checked for a bearer token before the config file.
pub const TOKEN_ENV_VAR: &str = "CARDSTOCK_TOKEN";

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Document export endpoints
    #[serde(default)]
    pub export: ExportConfig,

    /// Authentication
    #[serde(default)]
    pub auth: AuthConfig,

    /// Document cache behavior
    #[serde(default)]
    pub cache: CacheConfig,
}

/// Endpoints used to export documents and read file metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Endpoint serving rendered document exports
    #[serde(default = "default_export_endpoint")]
    pub endpoint: String,

    /// Endpoint serving file metadata records
    #[serde(default = "default_metadata_endpoint")]
    pub metadata_endpoint: String,

    /// Export format requested from the endpoint
    #[serde(default = "default_export_format")]
    pub format: String,
}

fn default_export_endpoint() -> String {
    "https://docs.google.com/feeds/download/documents/export/Export".to_string()
}

fn default_metadata_endpoint() -> String {
    "https://www.googleapis.com/drive/v2/files".to_string()
}

fn default_export_format() -> String {
    "html".to_string()
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            endpoint: default_export_endpoint(),
            metadata_endpoint: default_metadata_endpoint(),
            format: default_export_format(),
        }
    }
}

/// Authentication configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AuthConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

/// Document cache configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CacheConfig {
    /// When cached documents are evicted. There is exactly one policy
    /// today; it is spelled out here so the retention behavior is a
    /// stated choice rather than an accident of the implementation.
    #[serde(default)]
    pub eviction: EvictionPolicy,
}

impl Config {
    /// Load configuration from a YAML file, or return defaults if the file
    /// does not exist
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Config::default());
        }

        let content = fs::read_to_string(path)?;
        let config: Config = serde_yaml_ng::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to a YAML file
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let content = serde_yaml_ng::to_string(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    /// Get the bearer token from the environment or the config file
    pub fn bearer_token(&self) -> Option<String> {
        // Environment variable takes precedence
        if let Ok(token) = env::var(TOKEN_ENV_VAR)
            && !token.is_empty()
        {
            return Some(token);
        }

        self.auth.token.clone()
    }

    /// Set the static bearer token
    pub fn set_bearer_token(&mut self, token: String) {
        self.auth.token = Some(token);
    }
}
