//! Error type shared by the command handlers.

use std::fmt;

use showdown_engine::errors::GameError;

use crate::config::ConfigError;

/// Everything a command can fail with. Each variant maps to exit code 2,
/// except [`CliError::Interrupted`] which maps to 130.
#[derive(Debug)]
pub enum CliError {
    /// Reading stdin, writing stdout/stderr or the history file
    Io(std::io::Error),

    /// Bad command-line arguments or card notation
    InvalidInput(String),

    Config(String),

    /// A table refused its setup
    Engine(GameError),

    /// The human left the match
    Interrupted(String),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Io(e) => write!(f, "I/O error: {}", e),
            CliError::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
            CliError::Config(msg) => write!(f, "Configuration error: {}", msg),
            CliError::Engine(e) => write!(f, "Engine error: {}", e),
            CliError::Interrupted(msg) => write!(f, "Interrupted: {}", msg),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::Io(e) => Some(e),
            CliError::Engine(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(error: std::io::Error) -> Self {
        CliError::Io(error)
    }
}

impl From<GameError> for CliError {
    fn from(error: GameError) -> Self {
        CliError::Engine(error)
    }
}

impl From<ConfigError> for CliError {
    fn from(error: ConfigError) -> Self {
        CliError::Config(error.to_string())
    }
}

impl From<&str> for CliError {
    fn from(error: &str) -> Self {
        CliError::InvalidInput(error.to_string())
    }
}
