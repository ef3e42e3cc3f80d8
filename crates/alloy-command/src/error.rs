//! Error types for command compilation and registration.

use thiserror::Error;

/// Errors raised while compiling or registering a command.
///
/// Every variant is produced at registration time. Dispatch never fails: text
/// that matches no command is simply reported as no match.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    /// The command definition or one of its arguments is malformed.
    #[error("invalid argument spec for command '{command}': {reason}")]
    InvalidArgumentSpec {
        /// Name of the offending command.
        command: String,
        /// What is wrong with it.
        reason: String,
    },

    /// A type tag name that is not one of `string`, `integer`, `float`, `text`.
    #[error("unknown argument type tag '{0}' (expected string, integer, float or text)")]
    UnknownTypeTag(String),

    /// The command's name or an alias is already taken inside the group.
    #[error("command name '{name}' is already registered in group '{group}'")]
    DuplicateName {
        /// Group the collision happened in.
        group: String,
        /// The colliding name or alias.
        name: String,
    },
}

impl CommandError {
    /// Creates an invalid argument spec error.
    pub fn invalid_spec(command: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidArgumentSpec {
            command: command.into(),
            reason: reason.into(),
        }
    }

    /// Returns `true` for errors caused by a malformed definition rather than
    /// a registry collision.
    pub fn is_invalid_spec(&self) -> bool {
        matches!(
            self,
            Self::InvalidArgumentSpec { .. } | Self::UnknownTypeTag(_)
        )
    }
}

/// Result type for command operations.
pub type CommandResult<T> = Result<T, CommandError>;
