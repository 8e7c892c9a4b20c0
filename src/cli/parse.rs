//! CLI parse: clap types for the sphere viewer. No behavior; definitions only.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Sphere viewer - open Noosphere spheres and files from a viewer location
#[derive(Parser)]
#[command(name = "sphere-viewer")]
#[command(about = "Open Noosphere spheres and files from a viewer location")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file path (layered over global and project config)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(long, global = true, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Disable logging entirely
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long, global = true)]
    pub log_format: Option<String>,

    /// Log output (stdout, stderr, file, file+stderr)
    #[arg(long, global = true)]
    pub log_output: Option<String>,

    /// Log file path (if output includes "file")
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,
}

/// Viewer location plus connection overrides
#[derive(Args, Debug, Clone)]
pub struct LocationArgs {
    /// Viewer location, e.g. http://localhost:4433/?id=<did>&version=<cid>&slug=<slug>
    pub url: String,

    /// IPFS API base URL (defaults to the location's origin)
    #[arg(long)]
    pub gateway: Option<String>,

    /// Credential presented to the gateway
    #[arg(long)]
    pub key: Option<String>,

    /// Output format (text or json)
    #[arg(long, default_value = "text")]
    pub format: String,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Open the sphere and file named by a viewer location
    Open {
        #[command(flatten)]
        location: LocationArgs,
    },
    /// List the slugs of the sphere named by a viewer location
    Ls {
        #[command(flatten)]
        location: LocationArgs,
    },
    /// Configuration commands
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Print the effective configuration
    Show,
}
