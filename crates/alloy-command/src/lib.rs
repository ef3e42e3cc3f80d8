//! # Alloy Command
//!
//! Declarative chat-command matching for the Alloy bot framework.
//!
//! This crate provides:
//! - Argument specifications with built-in types, custom patterns, choices
//!   and literals ([`ArgumentSpec`], [`ArgumentFormat`], [`TypeTag`])
//! - A compiler from command definitions to end-anchored matchers and usage
//!   strings ([`Command`])
//! - Per-group registries with duplicate-name checks ([`CommandRegistry`])
//! - First-match dispatch and name lookup across groups ([`Dispatcher`])
//! - Help text rendering ([`help`])
//!
//! Everything here is synchronous and free of I/O. Delivering replies and
//! invoking handlers is the job of `alloy-runtime`.
//!
//! ```rust,ignore
//! use alloy_command::{ArgumentSpec, ArgumentFormat, Command, Dispatcher, TypeTag};
//!
//! let mut dispatcher = Dispatcher::new();
//! dispatcher.register(
//!     "paint",
//!     Command::builder("paint")
//!         .argument(ArgumentSpec::required("color", ArgumentFormat::choices(["red", "blue"])))
//!         .argument(ArgumentSpec::optional("times", TypeTag::Integer))
//!         .build()?,
//! )?;
//!
//! let hit = dispatcher.dispatch("paint red 2").unwrap();
//! assert_eq!(hit.args.values(), vec![Some("red"), Some("2")]);
//! ```

pub mod argument;
pub mod command;
pub mod dispatcher;
pub mod error;
pub mod help;
pub mod pattern;
pub mod registry;

pub use argument::{ArgumentFormat, ArgumentSpec, TypeTag};
pub use command::{Command, CommandArgs, CommandBuilder, CommandOptions, DEFAULT_PREFIX};
pub use dispatcher::{CommandMatch, Dispatcher};
pub use error::{CommandError, CommandResult};
pub use registry::CommandRegistry;
