//! Alloy Runtime - Routes chat messages to compiled commands.
//!
//! This crate provides:
//! - Handler registration and invocation (`RuntimeBuilder`, `CommandRuntime`)
//! - Async command handlers (`CommandHandler`, `CommandContext`)
//! - The built-in `help` command
//! - Figment-based configuration (prefix, operators, help delivery)
//! - Logging configuration
//!
//! Command definitions, argument matching and help rendering live in
//! `alloy-command`; this crate only decides who may run what and where the
//! replies go.
//!
//! ```ignore
//! use alloy_runtime::prelude::*;
//! use alloy_command::{ArgumentSpec, Command, TypeTag};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let mut builder = CommandRuntime::builder();
//!     builder.register(
//!         "misc",
//!         Command::builder("echo")
//!             .argument(ArgumentSpec::required("text", TypeTag::Text))
//!             .summary("Repeats the text")
//!             .build()?,
//!         |ctx: CommandContext| async move { ctx.args().get(0).unwrap_or_default().to_string() },
//!     )?;
//!     let runtime = builder.build()?;
//!
//!     let replies = runtime
//!         .handle_message(IncomingMessage::private("alice", "!echo hello there"))
//!         .await?;
//!     for reply in replies {
//!         println!("{} -> {}: {}", reply.target, reply.recipient, reply.text);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! # Configuration
//!
//! Without an explicit config, [`RuntimeBuilder::build`] reads `alloy.toml`
//! (or `alloy.yaml`) from the current directory and `ALLOY_*` environment
//! variables:
//!
//! ```toml
//! [commands]
//! prefix = "!"
//! operators = ["alice"]
//!
//! [help]
//! response = "notice"
//! ```

pub mod config;
pub mod error;
pub mod handler;
pub mod help;
pub mod logging;
pub mod message;
pub mod runtime;

// Re-exports
pub use config::{AlloyConfig, ConfigError, ConfigLoader, ConfigResult, HelpResponse};
pub use error::{BoxError, RuntimeError, RuntimeResult};
pub use handler::{CommandContext, CommandHandler, HandlerResult, IntoReplies};
pub use logging::{LoggingBuilder, SpanEvents};
pub use message::{IncomingMessage, Reply, ReplyTarget};
pub use runtime::{CommandRuntime, RuntimeBuilder, RuntimeStats};

// Re-export tracing for use by other crates
pub use tracing;
pub use tracing_subscriber;

/// Prelude module for convenient imports.
///
/// Runtime types plus the logging macros:
/// - `trace!`, `debug!`, `info!`, `warn!`, `error!`
/// - `span`, `instrument`, `Level`
pub mod prelude {
    pub use crate::{
        CommandContext, CommandRuntime, IncomingMessage, Reply, ReplyTarget, RuntimeBuilder,
    };
    pub use tracing::{Level, debug, error, info, instrument, span, trace, warn};
}
