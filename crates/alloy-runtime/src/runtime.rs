//! Command runtime: registration, routing and handler invocation.
//!
//! Registration happens on a [`RuntimeBuilder`]. Building freezes the command
//! set; the resulting [`CommandRuntime`] only reads it, so any number of
//! messages can be handled concurrently without locking.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use alloy_runtime::{CommandRuntime, CommandContext, IncomingMessage};
//! use alloy_command::{ArgumentSpec, Command, TypeTag};
//!
//! async fn kick(ctx: CommandContext) -> String {
//!     format!("kicked {}", ctx.args().value("who").unwrap_or_default())
//! }
//!
//! let mut builder = CommandRuntime::builder();
//! builder.register(
//!     "admin",
//!     Command::builder("kick")
//!         .argument(ArgumentSpec::required("who", TypeTag::String))
//!         .op_command(true)
//!         .build()?,
//!     kick,
//! )?;
//! let runtime = builder.build()?;
//!
//! let replies = runtime
//!     .handle_message(IncomingMessage::in_channel("#ops", "alice", "!kick bob"))
//!     .await?;
//! ```

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;

use tracing::{Instrument, Level, debug, error, info, span, trace, warn};

use crate::config::{AlloyConfig, ConfigLoader, validate_config};
use crate::error::{RuntimeError, RuntimeResult};
use crate::handler::{BoxedHandler, CommandContext, CommandHandler};
use crate::help::{HELP_GROUP, show_help};
use crate::logging;
use crate::message::{IncomingMessage, Reply};
use alloy_command::{ArgumentSpec, Command, CommandOptions, Dispatcher, help::help_command};

/// Handlers are keyed by `(group, primary name)`, unique within a dispatcher.
type HandlerKey = (String, String);

// =============================================================================
// RuntimeBuilder
// =============================================================================

/// Collects commands and their handlers, then builds a [`CommandRuntime`].
#[derive(Default)]
pub struct RuntimeBuilder {
    config: Option<AlloyConfig>,
    config_file: Option<PathBuf>,
    dispatcher: Dispatcher,
    handlers: HashMap<HandlerKey, BoxedHandler>,
}

impl RuntimeBuilder {
    /// Creates an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Uses the given configuration instead of loading one.
    pub fn config(mut self, config: AlloyConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Loads configuration from a specific file.
    pub fn config_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.config_file = Some(path.into());
        self
    }

    /// Registers `command` in `group` and attaches `handler` to it.
    ///
    /// # Errors
    ///
    /// Fails with [`CommandError::DuplicateName`](alloy_command::CommandError::DuplicateName)
    /// if a name or alias is already taken in the group. Nothing is registered
    /// in that case.
    pub fn register<H>(
        &mut self,
        group: &str,
        command: Command,
        handler: H,
    ) -> RuntimeResult<Arc<Command>>
    where
        H: CommandHandler,
    {
        let command = self.dispatcher.register(group, command)?;
        self.handlers.insert(
            (group.to_string(), command.name().to_string()),
            Arc::new(handler),
        );
        Ok(command)
    }

    /// Compiles a command from its parts, then registers it.
    pub fn command<H>(
        &mut self,
        group: &str,
        name: impl Into<String>,
        arguments: Vec<ArgumentSpec>,
        options: CommandOptions,
        handler: H,
    ) -> RuntimeResult<Arc<Command>>
    where
        H: CommandHandler,
    {
        let command = Command::new(name, arguments, options)?;
        self.register(group, command, handler)
    }

    /// Number of commands registered so far.
    pub fn command_count(&self) -> usize {
        self.dispatcher.command_count()
    }

    /// Loads configuration, initializes logging and freezes the command set.
    ///
    /// The built-in `help` command is appended last when `help.enabled` is
    /// set, so commands from other groups take precedence over it.
    pub fn build(mut self) -> RuntimeResult<CommandRuntime> {
        let config = match (self.config.take(), self.config_file.take()) {
            (Some(config), _) => {
                validate_config(&config)?;
                config
            }
            (None, Some(path)) => ConfigLoader::new().file(path).load_validated()?,
            (None, None) => ConfigLoader::new().with_current_dir().load_validated()?,
        };

        logging::init_from_config(&config.logging);

        if config.help.enabled {
            self.register(HELP_GROUP, help_command()?, show_help)?;
        }

        info!(
            groups = self.dispatcher.groups().count(),
            commands = self.dispatcher.command_count(),
            prefix = %config.commands.prefix,
            "Command runtime ready"
        );

        Ok(CommandRuntime {
            config: Arc::new(config),
            dispatcher: Arc::new(self.dispatcher),
            handlers: self.handlers,
        })
    }
}

// =============================================================================
// CommandRuntime
// =============================================================================

/// Runtime statistics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuntimeStats {
    /// Number of command groups.
    pub groups: usize,
    /// Number of registered commands.
    pub commands: usize,
}

/// Routes incoming messages to command handlers.
pub struct CommandRuntime {
    config: Arc<AlloyConfig>,
    dispatcher: Arc<Dispatcher>,
    handlers: HashMap<HandlerKey, BoxedHandler>,
}

impl CommandRuntime {
    /// Creates a runtime builder.
    pub fn builder() -> RuntimeBuilder {
        RuntimeBuilder::new()
    }

    /// The active configuration.
    pub fn config(&self) -> &AlloyConfig {
        &self.config
    }

    /// The frozen dispatcher.
    pub fn dispatcher(&self) -> &Arc<Dispatcher> {
        &self.dispatcher
    }

    /// Returns runtime statistics.
    pub fn stats(&self) -> RuntimeStats {
        RuntimeStats {
            groups: self.dispatcher.groups().count(),
            commands: self.dispatcher.command_count(),
        }
    }

    /// Returns `true` if `sender` may run operator-only commands.
    pub fn is_operator(&self, sender: &str) -> bool {
        self.config.commands.operators.iter().any(|op| op == sender)
    }

    /// Handles one message and returns the replies to deliver.
    ///
    /// Messages without the trigger prefix, text matching no command and
    /// operator-only commands from other senders all yield no replies.
    ///
    /// # Errors
    ///
    /// Returns [`RuntimeError::Handler`] when the invoked handler fails.
    pub async fn handle_message(&self, message: IncomingMessage) -> RuntimeResult<Vec<Reply>> {
        let span = span!(
            Level::DEBUG,
            "handle_message",
            sender = %message.sender,
            channel = message.channel.as_deref().unwrap_or("-"),
        );
        self.route(message).instrument(span).await
    }

    async fn route(&self, message: IncomingMessage) -> RuntimeResult<Vec<Reply>> {
        let Some(body) = message.text.strip_prefix(self.config.commands.prefix.as_str()) else {
            trace!("Message has no command prefix");
            return Ok(Vec::new());
        };

        let Some(hit) = self.dispatcher.dispatch_at_start(body) else {
            debug!("No command matched");
            return Ok(Vec::new());
        };

        let command = Arc::clone(hit.command);
        let group = hit.group;

        if command.is_op_command() && !self.is_operator(&message.sender) {
            warn!(
                command = %command.name(),
                sender = %message.sender,
                "Operator-only command rejected"
            );
            return Ok(Vec::new());
        }

        let key = (group.to_string(), command.name().to_string());
        let Some(handler) = self.handlers.get(&key) else {
            return Err(RuntimeError::HandlerMissing {
                group: key.0,
                command: key.1,
            });
        };

        let ctx = CommandContext::new(
            message,
            group,
            Arc::clone(&command),
            hit.args,
            Arc::clone(&self.dispatcher),
            Arc::clone(&self.config),
        );

        match handler.handle(ctx).await {
            Ok(replies) => {
                debug!(command = %command.name(), replies = replies.len(), "Command handled");
                Ok(replies)
            }
            Err(source) => {
                error!(command = %command.name(), "Command handler failed: {source}");
                Err(RuntimeError::Handler {
                    command: command.name().to_string(),
                    source,
                })
            }
        }
    }
}

impl std::fmt::Debug for CommandRuntime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CommandRuntime")
            .field("prefix", &self.config.commands.prefix)
            .field("commands", &self.dispatcher.command_count())
            .field("handlers", &self.handlers.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::HelpResponse;
    use crate::handler::HandlerResult;
    use crate::message::ReplyTarget;
    use alloy_command::{ArgumentFormat, CommandError, TypeTag};

    async fn grant(ctx: CommandContext) -> Result<String, std::num::ParseIntError> {
        let name = ctx.args().value("name").unwrap_or_default();
        let level: u32 = ctx.args().parse("level")?.unwrap_or(1);
        Ok(format!("{name} now has level {level}"))
    }

    async fn fail(_ctx: CommandContext) -> HandlerResult {
        Err("storage offline".into())
    }

    fn test_config() -> AlloyConfig {
        let mut config = AlloyConfig::default();
        config.commands.operators = vec!["root".into()];
        config
    }

    fn builder() -> RuntimeBuilder {
        let mut builder = CommandRuntime::builder().config(test_config());
        builder
            .register(
                "admin",
                Command::builder("grant")
                    .argument(ArgumentSpec::required("name", TypeTag::String))
                    .argument(ArgumentSpec::optional("level", TypeTag::Integer))
                    .alias("g")
                    .summary("Grants access")
                    .description("Grants a certain level of access to the user")
                    .op_command(true)
                    .build()
                    .unwrap(),
                grant,
            )
            .unwrap();
        builder
            .command(
                "fun",
                "paint",
                vec![ArgumentSpec::required(
                    "color",
                    ArgumentFormat::choices(["red", "green", "blue"]),
                )],
                CommandOptions {
                    summary: Some("Paints the wall".into()),
                    ..Default::default()
                },
                |ctx: CommandContext| async move {
                    format!("painted {}", ctx.args().get(0).unwrap_or_default())
                },
            )
            .unwrap();
        builder
            .register("fun", Command::builder("break").build().unwrap(), fail)
            .unwrap();
        builder
    }

    fn texts(replies: &[Reply]) -> Vec<&str> {
        replies.iter().map(|r| r.text.as_str()).collect()
    }

    #[tokio::test]
    async fn test_dispatch_to_handler() {
        let runtime = builder().build().unwrap();
        let replies = runtime
            .handle_message(IncomingMessage::in_channel("#wall", "alice", "!paint red"))
            .await
            .unwrap();
        assert_eq!(texts(&replies), vec!["painted red"]);
        assert_eq!(replies[0].recipient, "#wall");
        assert_eq!(replies[0].target, ReplyTarget::Origin);
    }

    #[tokio::test]
    async fn test_prefix_required() {
        let runtime = builder().build().unwrap();
        let replies = runtime
            .handle_message(IncomingMessage::private("alice", "paint red"))
            .await
            .unwrap();
        assert!(replies.is_empty());
    }

    #[tokio::test]
    async fn test_no_match_is_not_an_error() {
        let runtime = builder().build().unwrap();
        for text in ["!paint purple", "!unknown", "!", "!paint red now"] {
            let replies = runtime
                .handle_message(IncomingMessage::private("alice", text))
                .await
                .unwrap();
            assert!(replies.is_empty(), "{text}");
        }
    }

    #[tokio::test]
    async fn test_command_must_follow_prefix() {
        let runtime = builder().build().unwrap();
        for text in ["!debug bob 3", "!xpaint red", "!I said help"] {
            let replies = runtime
                .handle_message(IncomingMessage::private("root", text))
                .await
                .unwrap();
            assert!(replies.is_empty(), "{text}");
        }

        let replies = runtime
            .handle_message(IncomingMessage::private("root", "!g bob 3"))
            .await
            .unwrap();
        assert_eq!(texts(&replies), vec!["bob now has level 3"]);
    }

    #[tokio::test]
    async fn test_op_command_gate() {
        let runtime = builder().build().unwrap();

        let replies = runtime
            .handle_message(IncomingMessage::private("alice", "!grant bob 3"))
            .await
            .unwrap();
        assert!(replies.is_empty());

        let replies = runtime
            .handle_message(IncomingMessage::private("root", "!g bob 3"))
            .await
            .unwrap();
        assert_eq!(texts(&replies), vec!["bob now has level 3"]);

        let replies = runtime
            .handle_message(IncomingMessage::private("root", "!grant bob"))
            .await
            .unwrap();
        assert_eq!(texts(&replies), vec!["bob now has level 1"]);
    }

    #[tokio::test]
    async fn test_handler_failure() {
        let runtime = builder().build().unwrap();
        let err = runtime
            .handle_message(IncomingMessage::private("alice", "!break"))
            .await
            .unwrap_err();
        assert!(matches!(err, RuntimeError::Handler { ref command, .. } if command == "break"));
        assert!(err.to_string().contains("storage offline"));
    }

    #[tokio::test]
    async fn test_duplicate_registration() {
        let mut builder = builder();
        let err = builder
            .register(
                "admin",
                Command::builder("give").alias("g").build().unwrap(),
                fail,
            )
            .unwrap_err();
        assert!(matches!(
            err,
            RuntimeError::Command(CommandError::DuplicateName { .. })
        ));

        assert!(
            builder
                .register("other", Command::builder("give").alias("g").build().unwrap(), fail)
                .is_ok()
        );
    }

    #[tokio::test]
    async fn test_help_listing() {
        let runtime = builder().build().unwrap();
        let replies = runtime
            .handle_message(IncomingMessage::in_channel("#wall", "alice", "!help"))
            .await
            .unwrap();
        assert_eq!(
            texts(&replies),
            vec![
                "!grant NAME (LEVEL) - Grants access",
                "!paint [red|green|blue] - Paints the wall",
                "!break",
                "!help (COMMAND) - List all commands or displays help information for the given COMMAND",
            ]
        );
    }

    #[tokio::test]
    async fn test_help_detail_via_notice() {
        let mut config = test_config();
        config.help.response = HelpResponse::Notice;
        let runtime = builder().config(config).build().unwrap();

        let replies = runtime
            .handle_message(IncomingMessage::in_channel("#wall", "alice", "!help grant"))
            .await
            .unwrap();
        assert_eq!(
            texts(&replies),
            vec![
                "!grant NAME (LEVEL)",
                "",
                "Grants a certain level of access to the user",
            ]
        );
        assert!(replies.iter().all(|r| r.target == ReplyTarget::Notice));
        assert!(replies.iter().all(|r| r.recipient == "alice"));

        let replies = runtime
            .handle_message(IncomingMessage::private("alice", "!help g"))
            .await
            .unwrap();
        assert_eq!(texts(&replies), vec![r#"help: Unknown command "g""#]);
    }

    #[tokio::test]
    async fn test_help_disabled_and_custom_prefix() {
        let mut config = test_config();
        config.help.enabled = false;
        config.commands.prefix = ".".into();
        let runtime = builder().config(config).build().unwrap();
        assert_eq!(runtime.stats(), RuntimeStats { groups: 2, commands: 3 });

        let replies = runtime
            .handle_message(IncomingMessage::private("alice", ".help"))
            .await
            .unwrap();
        assert!(replies.is_empty());

        let replies = runtime
            .handle_message(IncomingMessage::private("alice", ".paint blue"))
            .await
            .unwrap();
        assert_eq!(texts(&replies), vec!["painted blue"]);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let mut config = AlloyConfig::default();
        config.commands.prefix.clear();
        let err = CommandRuntime::builder().config(config).build().unwrap_err();
        assert!(matches!(err, RuntimeError::Config(_)));
    }
}
