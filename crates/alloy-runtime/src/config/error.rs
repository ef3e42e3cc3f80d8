//! Errors raised while assembling the command runtime's settings.

use std::path::PathBuf;

use thiserror::Error;

/// Why an [`AlloyConfig`](super::AlloyConfig) could not be produced.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// An explicitly requested config file does not exist.
    #[error("Command runtime config file {0:?} does not exist")]
    FileNotFound(PathBuf),

    /// Files, environment and overrides did not merge into the schema,
    /// e.g. `help.response = "shout"`.
    #[error("Unreadable command runtime settings: {0}")]
    ParseError(String),

    /// The settings parsed but cannot drive the runtime, such as an empty
    /// trigger prefix or file logging without a path.
    #[error("Rejected command runtime settings: {message}")]
    ValidationError { message: String },
}

impl ConfigError {
    /// Shorthand for [`ConfigError::ValidationError`].
    pub fn validation(message: impl Into<String>) -> Self {
        Self::ValidationError {
            message: message.into(),
        }
    }
}

/// Result of loading or validating settings.
pub type ConfigResult<T> = Result<T, ConfigError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_name_the_problem() {
        let err = ConfigError::validation("Command prefix must not be empty");
        assert_eq!(
            err.to_string(),
            "Rejected command runtime settings: Command prefix must not be empty"
        );

        let err = ConfigError::FileNotFound(PathBuf::from("bot.toml"));
        assert!(err.to_string().contains("\"bot.toml\""));
    }
}
