//! Command handlers.
//!
//! A handler is any async function taking a [`CommandContext`] and returning
//! something that implements [`IntoReplies`]:
//!
//! ```rust,ignore
//! use alloy_runtime::{CommandContext, Reply};
//!
//! // Plain text goes back where the command came from
//! async fn ping(_ctx: CommandContext) -> &'static str {
//!     "pong"
//! }
//!
//! // Fallible handlers surface their error to the runtime
//! async fn grant(ctx: CommandContext) -> anyhow::Result<String> {
//!     let name = ctx.args().value("name").unwrap_or_default();
//!     let level: u32 = ctx.args().parse("level")?.unwrap_or(1);
//!     Ok(format!("{name} now has level {level}"))
//! }
//! ```

use std::future::Future;
use std::sync::Arc;

use async_trait::async_trait;

use crate::config::{AlloyConfig, HelpResponse};
use crate::error::BoxError;
use crate::message::{IncomingMessage, Reply};
use alloy_command::{Command, CommandArgs, Dispatcher};

/// What a handler produces: replies to deliver, or an error.
pub type HandlerResult = Result<Vec<Reply>, BoxError>;

// ============================================================================
// CommandContext
// ============================================================================

/// Everything a handler knows about one invocation.
///
/// Cheap to clone: the message, command, dispatcher and config are shared.
#[derive(Debug, Clone)]
pub struct CommandContext {
    message: Arc<IncomingMessage>,
    group: Arc<str>,
    command: Arc<Command>,
    args: CommandArgs,
    dispatcher: Arc<Dispatcher>,
    config: Arc<AlloyConfig>,
}

impl CommandContext {
    pub(crate) fn new(
        message: IncomingMessage,
        group: &str,
        command: Arc<Command>,
        args: CommandArgs,
        dispatcher: Arc<Dispatcher>,
        config: Arc<AlloyConfig>,
    ) -> Self {
        Self {
            message: Arc::new(message),
            group: Arc::from(group),
            command,
            args,
            dispatcher,
            config,
        }
    }

    /// The message that invoked the command.
    pub fn message(&self) -> &IncomingMessage {
        &self.message
    }

    /// Shortcut for `message().sender`.
    pub fn sender(&self) -> &str {
        &self.message.sender
    }

    /// Group that owns the command.
    pub fn group(&self) -> &str {
        &self.group
    }

    /// The invoked command.
    pub fn command(&self) -> &Arc<Command> {
        &self.command
    }

    /// Extracted arguments.
    pub fn args(&self) -> &CommandArgs {
        &self.args
    }

    /// Every registered command.
    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    /// Runtime configuration.
    pub fn config(&self) -> &AlloyConfig {
        &self.config
    }

    /// The configured trigger prefix.
    pub fn prefix(&self) -> &str {
        &self.config.commands.prefix
    }

    /// A reply to where the message came from.
    pub fn reply(&self, text: impl Into<String>) -> Reply {
        Reply::to_origin(&self.message, text)
    }

    /// A notice to the sender.
    pub fn notice(&self, text: impl Into<String>) -> Reply {
        Reply::notice(&self.message, text)
    }

    /// A private message to the sender.
    pub fn query(&self, text: impl Into<String>) -> Reply {
        Reply::query(&self.message, text)
    }

    /// A reply delivered the way `help.response` asks for.
    pub fn respond(&self, text: impl Into<String>) -> Reply {
        match self.config.help.response {
            HelpResponse::Notice => self.notice(text),
            HelpResponse::Send => self.query(text),
            HelpResponse::Reply => self.reply(text),
        }
    }
}

// ============================================================================
// IntoReplies - Handle handler return values
// ============================================================================

/// Converts a handler's return value into replies.
pub trait IntoReplies: Send {
    /// Performs the conversion; plain text becomes a reply to the origin.
    fn into_replies(self, ctx: &CommandContext) -> HandlerResult;
}

/// No reply.
impl IntoReplies for () {
    fn into_replies(self, _ctx: &CommandContext) -> HandlerResult {
        Ok(Vec::new())
    }
}

impl IntoReplies for String {
    fn into_replies(self, ctx: &CommandContext) -> HandlerResult {
        Ok(vec![ctx.reply(self)])
    }
}

impl IntoReplies for &'static str {
    fn into_replies(self, ctx: &CommandContext) -> HandlerResult {
        Ok(vec![ctx.reply(self)])
    }
}

/// One reply per line.
impl IntoReplies for Vec<String> {
    fn into_replies(self, ctx: &CommandContext) -> HandlerResult {
        Ok(self.into_iter().map(|line| ctx.reply(line)).collect())
    }
}

impl IntoReplies for Reply {
    fn into_replies(self, _ctx: &CommandContext) -> HandlerResult {
        Ok(vec![self])
    }
}

impl IntoReplies for Vec<Reply> {
    fn into_replies(self, _ctx: &CommandContext) -> HandlerResult {
        Ok(self)
    }
}

impl<T: IntoReplies> IntoReplies for Option<T> {
    fn into_replies(self, ctx: &CommandContext) -> HandlerResult {
        match self {
            Some(t) => t.into_replies(ctx),
            None => Ok(Vec::new()),
        }
    }
}

impl<T, E> IntoReplies for Result<T, E>
where
    T: IntoReplies,
    E: Into<BoxError> + Send,
{
    fn into_replies(self, ctx: &CommandContext) -> HandlerResult {
        match self {
            Ok(t) => t.into_replies(ctx),
            Err(e) => Err(e.into()),
        }
    }
}

// ============================================================================
// CommandHandler Trait
// ============================================================================

/// An invocation handler attached to a registered command.
///
/// Implemented for every `Fn(CommandContext) -> impl Future<Output = impl IntoReplies>`,
/// so plain async functions and closures can be registered directly.
#[async_trait]
pub trait CommandHandler: Send + Sync + 'static {
    /// Handles one invocation.
    async fn handle(&self, ctx: CommandContext) -> HandlerResult;
}

#[async_trait]
impl<F, Fut, R> CommandHandler for F
where
    F: Fn(CommandContext) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = R> + Send + 'static,
    R: IntoReplies + 'static,
{
    async fn handle(&self, ctx: CommandContext) -> HandlerResult {
        let output = (self)(ctx.clone()).await;
        output.into_replies(&ctx)
    }
}

/// Type-erased handler as stored by the runtime.
pub type BoxedHandler = Arc<dyn CommandHandler>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::ReplyTarget;
    use alloy_command::{ArgumentSpec, TypeTag};

    fn context(config: AlloyConfig) -> CommandContext {
        let command = Arc::new(
            Command::builder("grant")
                .argument(ArgumentSpec::required("name", TypeTag::String))
                .build()
                .unwrap(),
        );
        let args = command.captures("grant alice").unwrap();
        CommandContext::new(
            IncomingMessage::in_channel("#ops", "bob", "!grant alice"),
            "admin",
            command,
            args,
            Arc::new(Dispatcher::new()),
            Arc::new(config),
        )
    }

    #[test]
    fn test_respond_follows_config() {
        let mut config = AlloyConfig::default();
        let ctx = context(config.clone());
        assert_eq!(ctx.respond("x").target, ReplyTarget::Origin);
        assert_eq!(ctx.respond("x").recipient, "#ops");

        config.help.response = HelpResponse::Notice;
        let ctx = context(config.clone());
        assert_eq!(ctx.respond("x").target, ReplyTarget::Notice);
        assert_eq!(ctx.respond("x").recipient, "bob");

        config.help.response = HelpResponse::Send;
        let ctx = context(config);
        assert_eq!(ctx.respond("x").target, ReplyTarget::Query);
    }

    #[test]
    fn test_into_replies() {
        let ctx = context(AlloyConfig::default());
        assert!(().into_replies(&ctx).unwrap().is_empty());
        assert_eq!("hi".into_replies(&ctx).unwrap()[0].text, "hi");
        assert_eq!(
            vec!["a".to_string(), "b".to_string()]
                .into_replies(&ctx)
                .unwrap()
                .len(),
            2
        );
        assert!(None::<String>.into_replies(&ctx).unwrap().is_empty());

        let failed: Result<String, String> = Err("boom".into());
        assert_eq!(failed.into_replies(&ctx).unwrap_err().to_string(), "boom");
    }

    #[tokio::test]
    async fn test_closure_handler() {
        let handler = |ctx: CommandContext| async move {
            format!("granted {}", ctx.args().value("name").unwrap_or_default())
        };
        let replies = handler.handle(context(AlloyConfig::default())).await.unwrap();
        assert_eq!(replies.len(), 1);
        assert_eq!(replies[0].text, "granted alice");
        assert_eq!(replies[0].target, ReplyTarget::Origin);
    }
}
