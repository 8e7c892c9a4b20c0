//! CLI output: error mapping and command results.

use crate::error::ViewerError;

/// Map domain/service errors to a string for CLI output.
pub fn map_error(e: &ViewerError) -> String {
    e.to_string()
}

/// Rendered result of a command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutput {
    pub text: String,
    /// False when the view ended with a recorded error
    pub success: bool,
}

impl CommandOutput {
    pub fn ok(text: String) -> Self {
        Self {
            text,
            success: true,
        }
    }
}
