//! CLI domain: parse, route, output, and presentation only.
//! No domain orchestration; single route table dispatches to the bootstrap.

mod output;
mod parse;
mod presentation;
mod route;

pub use output::{map_error, CommandOutput};
pub use parse::{Cli, Commands, ConfigCommands, LocationArgs};
pub use presentation::{format_config, format_slug_list, format_view};
pub use route::{current_dir, RunContext};
