//! CLI route: single route table and run context. Dispatches to the bootstrap and presentation.

use crate::bootstrap::{bootstrap, BootstrapOptions};
use crate::config::{ConfigLoader, ViewerConfig};
use crate::error::ViewerError;
use crate::gateway::GatewayClient;
use crate::noosphere::NoosphereClient;
use crate::store::Store;
use std::io::IsTerminal;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::info;
use url::Url;

use crate::cli::output::CommandOutput;
use crate::cli::parse::{Commands, ConfigCommands, LocationArgs};
use crate::cli::presentation::{format_config, format_slug_list, format_view};

/// Runtime context for CLI execution: effective configuration and the
/// collaborator used to reach the gateway.
pub struct RunContext {
    config: ViewerConfig,
    client: Arc<dyn NoosphereClient>,
}

impl RunContext {
    /// Create run context from the working directory and optional config path.
    pub fn new(working_dir: PathBuf, config_path: Option<PathBuf>) -> Result<Self, ViewerError> {
        let config = ConfigLoader::load(&working_dir, config_path.as_deref())?;
        Self::from_config(config)
    }

    /// Create run context from an already loaded configuration.
    pub fn from_config(config: ViewerConfig) -> Result<Self, ViewerError> {
        config.validate().map_err(|errors| {
            let error_msgs: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
            ViewerError::ConfigError(format!(
                "Configuration validation failed:\n{}",
                error_msgs.join("\n")
            ))
        })?;
        let client: Arc<dyn NoosphereClient> =
            Arc::new(GatewayClient::new(config.gateway.timeouts()));
        Ok(Self { config, client })
    }

    /// Replace the collaborator used to reach the gateway.
    pub fn with_client(mut self, client: Arc<dyn NoosphereClient>) -> Self {
        self.client = client;
        self
    }

    pub fn config(&self) -> &ViewerConfig {
        &self.config
    }

    /// Execute a parsed command.
    pub async fn execute(&self, command: &Commands) -> Result<CommandOutput, ViewerError> {
        match command {
            Commands::Open { location } => self.handle_open(location).await,
            Commands::Ls { location } => self.handle_ls(location).await,
            Commands::Config {
                command: ConfigCommands::Show,
            } => Ok(CommandOutput::ok(format_config(&self.config)?)),
        }
    }

    async fn handle_open(&self, args: &LocationArgs) -> Result<CommandOutput, ViewerError> {
        let (store, location, options) = self.prepare(args)?;
        let state = bootstrap(&store, self.client.clone(), &location, &options).await?;
        let viewer = state.sphere_viewer;

        let text = format_view(&viewer, &args.format, self.use_color())?;
        info!(
            sphere = ?viewer.sphere_id,
            file = ?viewer.file.as_ref().map(|f| f.slug.to_string()),
            "Open command finished"
        );
        Ok(CommandOutput {
            text,
            success: viewer.last_error.is_none(),
        })
    }

    async fn handle_ls(&self, args: &LocationArgs) -> Result<CommandOutput, ViewerError> {
        let (store, location, options) = self.prepare(args)?;
        let state = bootstrap(&store, self.client.clone(), &location, &options).await?;
        let viewer = state.sphere_viewer;

        let Some(fs) = viewer.fs else {
            let reason = viewer.last_error.unwrap_or_else(|| {
                "location must name a sphere with 'id' and 'version'".to_string()
            });
            return Err(ViewerError::NotFound(format!("No sphere opened: {}", reason)));
        };

        let slugs = fs.0.list().await?;
        let text = format_slug_list(fs.0.identity(), fs.0.version(), &slugs, &args.format)?;
        Ok(CommandOutput::ok(text))
    }

    fn prepare(&self, args: &LocationArgs) -> Result<(Store, Url, BootstrapOptions), ViewerError> {
        let location = Url::parse(&args.url)?;

        let mut options = self.config.gateway.bootstrap_options()?;
        if let Some(gateway) = &args.gateway {
            options.ipfs_api = Some(Url::parse(gateway)?);
        }
        if let Some(key) = &args.key {
            if key.is_empty() {
                return Err(ViewerError::ConfigError("--key cannot be empty".to_string()));
            }
            options.key = key.clone();
        }

        Ok((Store::new(), location, options))
    }

    fn use_color(&self) -> bool {
        self.config.logging.color && std::io::stdout().is_terminal()
    }
}

/// Working directory used for project config lookup
pub fn current_dir() -> PathBuf {
    std::env::current_dir().unwrap_or_else(|_| Path::new(".").to_path_buf())
}
