//! # Alloy
//!
//! Declarative chat commands for bots: define a command once and get its
//! matcher, argument extraction, usage line and help entry from it.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────┐     ┌──────────────────┐     ┌────────────┐     ┌─────────┐
//! │   Message    │────▶│  CommandRuntime  │────▶│ Dispatcher │────▶│ Handler │──▶ replies
//! │ (sender,text)│     │ prefix, op gate  │     │ first match│     │ (async) │
//! └──────────────┘     └──────────────────┘     └────────────┘     └─────────┘
//! ```
//!
//! - **command**: Command definitions, compiled matchers, groups, help text
//! - **runtime**: Configuration, logging, handler invocation
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use alloy::prelude::*;
//!
//! async fn grant(ctx: CommandContext) -> anyhow::Result<String> {
//!     let name = ctx.args().value("name").unwrap_or_default();
//!     let level: u32 = ctx.args().parse("level")?.unwrap_or(1);
//!     Ok(format!("{name} now has level {level}"))
//! }
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let mut builder = CommandRuntime::builder();
//!     builder.register(
//!         "admin",
//!         Command::builder("grant")
//!             .argument(ArgumentSpec::required("name", TypeTag::String))
//!             .argument(ArgumentSpec::optional("level", TypeTag::Integer))
//!             .summary("Grants access")
//!             .op_command(true)
//!             .build()?,
//!         grant,
//!     )?;
//!     let runtime = builder.build()?;
//!
//!     let replies = runtime
//!         .handle_message(IncomingMessage::private("alice", "!grant bob 3"))
//!         .await?;
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - `toml-config`: Load `alloy.toml` (default)
//! - `yaml-config`: Load `alloy.yaml`
//! - `json-log`: JSON log output

pub use alloy_command as command;
pub use alloy_runtime as runtime;

pub use alloy_command::{
    ArgumentFormat, ArgumentSpec, Command, CommandArgs, CommandError, CommandOptions, Dispatcher,
    TypeTag,
};
pub use alloy_runtime::{
    AlloyConfig, CommandContext, CommandHandler, CommandRuntime, IncomingMessage, Reply,
    ReplyTarget, RuntimeBuilder, RuntimeError,
};

/// Prelude module for convenient imports.
pub mod prelude {
    pub use alloy_command::{ArgumentFormat, ArgumentSpec, Command, CommandOptions, TypeTag};
    pub use alloy_runtime::prelude::*;
    pub use alloy_runtime::{AlloyConfig, HelpResponse, RuntimeError};
}
