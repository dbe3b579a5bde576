//! Client configuration for the courier API.
//!
//! Configuration can be built directly, parsed from a YAML file (unknown
//! fields are ignored for forward compatibility), or read from environment
//! variables. The transport that eventually uses `base_url` and `api_key`
//! lives outside this crate.
//!
//! # Environment Variables
//!
//! [`ClientConfig::from_env`] reads:
//!
//! | Variable | Required | Description |
//! |----------|----------|-------------|
//! | `COURIER_API_KEY` | Yes | API key sent with every request |
//! | `COURIER_BASE_URL` | No | API origin (default: `https://api.courier.test`) |
//! | `COURIER_API_VERSION` | No | API version path segment (default: 1) |

use crate::error::{CourierError, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::Path;

/// Default API origin used when none is configured.
pub const DEFAULT_BASE_URL: &str = "https://api.courier.test";

/// Default API version.
pub const DEFAULT_API_VERSION: u32 = 1;

/// Configuration for a [`Client`](crate::client::Client).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// API key sent with every request.
    pub api_key: String,

    /// API origin, scheme included (default: `https://api.courier.test`).
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// API version used to build request paths (default: 1).
    #[serde(default = "default_api_version")]
    pub api_version: u32,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_api_version() -> u32 {
    DEFAULT_API_VERSION
}

impl ClientConfig {
    /// Create a config with the given API key and default endpoint settings.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: default_base_url(),
            api_version: default_api_version(),
        }
    }

    /// Load config from a YAML file.
    ///
    /// Unknown fields in the YAML are silently ignored for forward
    /// compatibility.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        let content = std::fs::read_to_string(path).map_err(|e| {
            CourierError::Config(format!(
                "failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        Self::from_yaml(&content)
    }

    /// Parse config from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: ClientConfig = serde_yaml::from_str(yaml)
            .map_err(|e| CourierError::Config(format!("failed to parse config YAML: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    /// Build config from environment variables.
    pub fn from_env() -> Result<Self> {
        let api_key = env::var("COURIER_API_KEY").map_err(|_| {
            CourierError::Config("COURIER_API_KEY environment variable is not set".to_string())
        })?;

        let base_url = env::var("COURIER_BASE_URL").unwrap_or_else(|_| default_base_url());

        let api_version = match env::var("COURIER_API_VERSION") {
            Ok(raw) => raw.parse().map_err(|_| {
                CourierError::Config(format!(
                    "COURIER_API_VERSION must be a positive integer, got '{}'",
                    raw
                ))
            })?,
            Err(_) => default_api_version(),
        };

        let config = Self {
            api_key,
            base_url,
            api_version,
        };
        config.validate()?;
        Ok(config)
    }

    /// Validate config values.
    ///
    /// Validation rules:
    /// - `api_key` must be non-empty
    /// - `base_url` must start with `http://` or `https://`
    /// - `api_version` must be positive
    pub fn validate(&self) -> Result<()> {
        if self.api_key.trim().is_empty() {
            return Err(CourierError::Config(
                "config validation failed: api_key must be non-empty".to_string(),
            ));
        }

        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(CourierError::Config(format!(
                "config validation failed: base_url must start with http:// or https:// (found '{}')",
                self.base_url
            )));
        }

        if self.api_version == 0 {
            return Err(CourierError::Config(
                "config validation failed: api_version must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }

    /// The versioned API root, e.g. `https://api.courier.test/api/v1`.
    pub fn api_root(&self) -> String {
        format!(
            "{}/api/v{}",
            self.base_url.trim_end_matches('/'),
            self.api_version
        )
    }
}
