//! CLI-level errors (wraps domain, render and config errors)

use thiserror::Error;

use crate::config::SettingsError;
use crate::domain::TreeError;
use crate::render::RenderError;

/// CLI errors are the top-level error type.
/// These are what get displayed to the user.
#[derive(Error, Debug)]
pub enum CliError {
    #[error("{0}")]
    Tree(#[from] TreeError),

    #[error("{0}")]
    Render(#[from] RenderError),

    #[error("{0}")]
    Settings(#[from] SettingsError),

    #[error("{0}")]
    Usage(String),
}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

impl CliError {
    /// Get the appropriate exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Usage(_) => crate::exitcode::USAGE,
            CliError::Settings(_) => crate::exitcode::CONFIG,
            CliError::Tree(TreeError::TooLarge { .. }) => crate::exitcode::USAGE,
            CliError::Tree(_) => crate::exitcode::SOFTWARE,
            CliError::Render(e) => match e {
                RenderError::Io { .. } => crate::exitcode::CANTCREAT,
                RenderError::Format(_) | RenderError::Tree(_) => crate::exitcode::SOFTWARE,
            },
        }
    }
}
