//! Runtime error types.

use thiserror::Error;

use crate::config::ConfigError;
use alloy_command::CommandError;

/// Boxed error returned by command handlers.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Errors that can occur during runtime operations.
#[derive(Error, Debug)]
pub enum RuntimeError {
    /// A command could not be compiled or registered.
    #[error(transparent)]
    Command(#[from] CommandError),

    /// Configuration could not be loaded or is invalid.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// A command handler failed.
    #[error("Handler for command '{command}' failed: {source}")]
    Handler {
        /// Primary name of the command.
        command: String,
        /// The handler's error.
        #[source]
        source: BoxError,
    },

    /// A matched command has no handler attached.
    #[error("No handler registered for command '{command}' in group '{group}'")]
    HandlerMissing {
        /// Group of the command.
        group: String,
        /// Primary name of the command.
        command: String,
    },
}

/// Result type for runtime operations.
pub type RuntimeResult<T> = Result<T, RuntimeError>;
