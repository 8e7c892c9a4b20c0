//! Error types for the sphere viewer.

use thiserror::Error;

/// Errors raised while loading a viewer location and talking to the gateway
#[derive(Debug, Error)]
pub enum ViewerError {
    #[error("Invalid viewer location: {0}")]
    InvalidLocation(String),

    #[error("Invalid sphere reference: {0}")]
    InvalidSphereReference(String),

    #[error("Invalid sphere version: {0}")]
    InvalidVersion(String),

    #[error("Invalid slug: {0}")]
    InvalidSlug(String),

    #[error("Sphere identity mismatch: expected {expected}, found {actual}")]
    SphereMismatch { expected: String, actual: String },

    #[error("Not a sphere revision: {0}")]
    NotASphere(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Gateway unauthorized: {0}")]
    GatewayUnauthorized(String),

    #[error("Gateway request failed: {0}")]
    GatewayRequestFailed(String),

    #[error("Gateway error: {0}")]
    GatewayError(String),

    #[error("Malformed block {cid}: {reason}")]
    MalformedBlock { cid: String, reason: String },

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Output error: {0}")]
    OutputError(String),
}

impl From<config::ConfigError> for ViewerError {
    fn from(err: config::ConfigError) -> Self {
        ViewerError::ConfigError(err.to_string())
    }
}

impl From<url::ParseError> for ViewerError {
    fn from(err: url::ParseError) -> Self {
        ViewerError::InvalidLocation(err.to_string())
    }
}
