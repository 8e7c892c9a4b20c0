//! Merge rules: defaults, override order, conflict handling.

use config::Config;
use config::ConfigBuilder;
use config::ConfigError;

/// Prefix of environment variables that override file configuration,
/// e.g. `SPHERE_VIEWER__GATEWAY__KEY`.
pub const ENV_PREFIX: &str = "SPHERE_VIEWER";

/// Create a Config builder with merge policy defaults applied.
pub fn builder_with_defaults() -> Result<ConfigBuilder<config::builder::DefaultState>, ConfigError>
{
    Config::builder()
        .set_default("gateway.key", "anonymous")?
        .set_default("gateway.connect_timeout_secs", 10)?
        .set_default("gateway.request_timeout_secs", 30)
}

/// Environment source applied last, so it wins over every file.
pub fn environment() -> config::Environment {
    config::Environment::with_prefix(ENV_PREFIX)
        .prefix_separator("__")
        .separator("__")
        .try_parsing(true)
}
