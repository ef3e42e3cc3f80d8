//! Configuration module for the Alloy command runtime.
//!
//! This module provides figment-based configuration loading and validation
//! for command routing, the built-in help command and logging.

pub mod error;
pub mod loader;
pub mod schema;
pub mod validation;

pub use error::{ConfigError, ConfigResult};
pub use loader::{ConfigLoader, Profile, load_config, load_config_from_file};
pub use schema::{
    AlloyConfig, CommandsConfig, HelpConfig, HelpResponse, LogFormat, LogLevel, LogOutput,
    LoggingConfig, SpanEventConfig,
};
pub use validation::validate_config;
