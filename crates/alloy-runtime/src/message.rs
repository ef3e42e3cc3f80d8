//! Incoming messages and outgoing replies.
//!
//! These are the only types the hosting chat transport has to produce and
//! consume: feed [`IncomingMessage`]s into the runtime, deliver the returned
//! [`Reply`]s.

use std::fmt;

/// A chat message received by the transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IncomingMessage {
    /// Nickname or ID of the author.
    pub sender: String,
    /// Channel the message was posted in; `None` for a private message.
    pub channel: Option<String>,
    /// Raw message text, trigger prefix included.
    pub text: String,
}

impl IncomingMessage {
    /// A private message from `sender`.
    pub fn private(sender: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            sender: sender.into(),
            channel: None,
            text: text.into(),
        }
    }

    /// A message posted by `sender` in `channel`.
    pub fn in_channel(
        channel: impl Into<String>,
        sender: impl Into<String>,
        text: impl Into<String>,
    ) -> Self {
        Self {
            sender: sender.into(),
            channel: Some(channel.into()),
            text: text.into(),
        }
    }

    /// Where a plain reply goes: the channel, or the sender for private messages.
    pub fn origin(&self) -> &str {
        self.channel.as_deref().unwrap_or(&self.sender)
    }
}

/// How a reply is delivered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplyTarget {
    /// Back where the message came from.
    Origin,
    /// As a notice to the sender.
    Notice,
    /// As a private message to the sender.
    Query,
}

impl fmt::Display for ReplyTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Origin => write!(f, "reply"),
            Self::Notice => write!(f, "notice"),
            Self::Query => write!(f, "query"),
        }
    }
}

/// A line of text to send.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    /// Delivery mode.
    pub target: ReplyTarget,
    /// Channel or user the text is sent to.
    pub recipient: String,
    /// The text itself.
    pub text: String,
}

impl Reply {
    /// A reply addressed to where `message` came from.
    pub fn to_origin(message: &IncomingMessage, text: impl Into<String>) -> Self {
        Self {
            target: ReplyTarget::Origin,
            recipient: message.origin().to_string(),
            text: text.into(),
        }
    }

    /// A notice to the author of `message`.
    pub fn notice(message: &IncomingMessage, text: impl Into<String>) -> Self {
        Self {
            target: ReplyTarget::Notice,
            recipient: message.sender.clone(),
            text: text.into(),
        }
    }

    /// A private message to the author of `message`.
    pub fn query(message: &IncomingMessage, text: impl Into<String>) -> Self {
        Self {
            target: ReplyTarget::Query,
            recipient: message.sender.clone(),
            text: text.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_origin() {
        let msg = IncomingMessage::in_channel("#rust", "alice", "!ping");
        assert_eq!(msg.origin(), "#rust");
        assert_eq!(Reply::to_origin(&msg, "pong").recipient, "#rust");
        assert_eq!(Reply::notice(&msg, "pong").recipient, "alice");

        let msg = IncomingMessage::private("bob", "!ping");
        assert_eq!(Reply::to_origin(&msg, "pong").recipient, "bob");
        assert_eq!(Reply::query(&msg, "pong").target, ReplyTarget::Query);
    }
}
