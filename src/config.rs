//! Configuration System
//!
//! Layered viewer configuration: built-in defaults, the user's global config
//! file, project config files in the current directory, an explicit
//! `--config` file, then `SPHERE_VIEWER__*` environment variables.

use crate::bootstrap::BootstrapOptions;
use crate::error::ViewerError;
use crate::gateway::GatewayTimeouts;
use crate::logging::LoggingConfig;
use crate::noosphere::ANONYMOUS_KEY;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use url::Url;

mod facade;
mod merge;
mod sources;

pub use facade::ConfigLoader;
pub use sources::global_file::global_config_path;

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ViewerConfig {
    /// Gateway connection settings
    #[serde(default)]
    pub gateway: GatewayConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// How the viewer reaches the Noosphere service
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayConfig {
    /// IPFS API base URL. When unset, the origin of the viewer location is used.
    #[serde(default)]
    pub origin: Option<String>,

    /// Credential presented when connecting
    #[serde(default = "default_key")]
    pub key: String,

    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,

    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

fn default_key() -> String {
    ANONYMOUS_KEY.to_string()
}

fn default_connect_timeout_secs() -> u64 {
    10
}

fn default_request_timeout_secs() -> u64 {
    30
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            origin: None,
            key: default_key(),
            connect_timeout_secs: default_connect_timeout_secs(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

impl GatewayConfig {
    pub fn validate(&self) -> Result<(), String> {
        if let Some(origin) = &self.origin {
            let url = Url::parse(origin).map_err(|e| format!("Invalid origin '{}': {}", origin, e))?;
            if !matches!(url.scheme(), "http" | "https") {
                return Err(format!("Origin '{}' must use http or https", origin));
            }
        }
        if self.key.is_empty() {
            return Err("Key cannot be empty".to_string());
        }
        if self.connect_timeout_secs == 0 || self.request_timeout_secs == 0 {
            return Err("Timeouts must be greater than zero".to_string());
        }
        Ok(())
    }

    pub fn timeouts(&self) -> GatewayTimeouts {
        GatewayTimeouts {
            connect: Duration::from_secs(self.connect_timeout_secs),
            request: Duration::from_secs(self.request_timeout_secs),
        }
    }

    /// Bootstrap options implied by this configuration.
    pub fn bootstrap_options(&self) -> Result<BootstrapOptions, ViewerError> {
        let ipfs_api = self
            .origin
            .as_deref()
            .map(Url::parse)
            .transpose()
            .map_err(|e| ViewerError::ConfigError(format!("Invalid gateway origin: {}", e)))?;
        Ok(BootstrapOptions {
            ipfs_api,
            key: self.key.clone(),
        })
    }
}

/// Configuration validation errors
#[derive(Debug, Clone)]
pub enum ValidationError {
    Gateway(String),
    Logging(String),
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::Gateway(msg) => write!(f, "Gateway: {}", msg),
            ValidationError::Logging(msg) => write!(f, "Logging: {}", msg),
        }
    }
}

impl std::error::Error for ValidationError {}

impl ViewerConfig {
    /// Validate the entire configuration
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if let Err(e) = self.gateway.validate() {
            errors.push(ValidationError::Gateway(e));
        }
        if let Err(e) = self.logging.validate() {
            errors.push(ValidationError::Logging(e));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Render as TOML, as shown by `config show`.
    pub fn to_toml(&self) -> Result<String, ViewerError> {
        toml::to_string_pretty(self)
            .map_err(|e| ViewerError::OutputError(format!("Failed to render config: {}", e)))
    }
}
