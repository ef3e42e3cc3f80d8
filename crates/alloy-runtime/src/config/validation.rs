//! Configuration validation utilities.

use super::error::{ConfigError, ConfigResult};
use super::schema::{AlloyConfig, CommandsConfig, LogOutput, LoggingConfig};

/// Validates the entire configuration.
pub fn validate_config(config: &AlloyConfig) -> ConfigResult<()> {
    validate_commands_config(&config.commands)?;
    validate_logging_config(&config.logging)?;
    Ok(())
}

/// Validates command routing settings.
fn validate_commands_config(commands: &CommandsConfig) -> ConfigResult<()> {
    if commands.prefix.is_empty() {
        return Err(ConfigError::validation("Command prefix must not be empty"));
    }

    if commands.prefix.chars().any(char::is_whitespace) {
        return Err(ConfigError::validation(format!(
            "Command prefix must not contain whitespace: {:?}",
            commands.prefix
        )));
    }

    if commands.operators.iter().any(|op| op.trim().is_empty()) {
        return Err(ConfigError::validation("Operator names must not be blank"));
    }

    Ok(())
}

/// Validates logging settings.
fn validate_logging_config(logging: &LoggingConfig) -> ConfigResult<()> {
    if logging.output == LogOutput::File && logging.file_path.is_none() {
        return Err(ConfigError::validation(
            "File log output requires logging.file_path",
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate_config(&AlloyConfig::default()).is_ok());
    }

    #[test]
    fn test_empty_prefix() {
        let mut config = AlloyConfig::default();
        config.commands.prefix.clear();
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_whitespace_prefix() {
        let mut config = AlloyConfig::default();
        config.commands.prefix = "! ".into();
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_blank_operator() {
        let mut config = AlloyConfig::default();
        config.commands.operators = vec!["alice".into(), "  ".into()];
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_file_output_requires_path() {
        let mut config = AlloyConfig::default();
        config.logging.output = LogOutput::File;
        assert!(validate_config(&config).is_err());
        config.logging.file_path = Some("bot.log".into());
        assert!(validate_config(&config).is_ok());
    }
}
