//! Structured pattern building.
//!
//! Matchers are never assembled by concatenating regex source by hand.
//! Instead a command is described as a tree of [`PatternNode`]s, which is then
//! lowered to `regex` syntax in one place. Literals are escaped during
//! lowering, raw sub-patterns are fenced in a non-capturing group so an
//! alternation inside them cannot leak into the surrounding sequence.
//!
//! ```rust,ignore
//! use alloy_command::pattern::{PatternBuilder, PatternNode};
//!
//! let regex = PatternBuilder::new()
//!     .push(PatternNode::alternation(["kick", "k"].map(PatternNode::literal)))
//!     .push(PatternNode::Whitespace)
//!     .push(PatternNode::capture("arg0", PatternNode::raw(r"\S+")))
//!     .push(PatternNode::EndOfText)
//!     .build()?;
//! assert!(regex.is_match("kick bob"));
//! ```

use regex::Regex;

/// A node of a matcher pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PatternNode {
    /// Text matched verbatim; regex metacharacters are escaped.
    Literal(String),
    /// A regex fragment used as-is.
    Raw(String),
    /// Exactly one whitespace character.
    Whitespace,
    /// A named capture group around `inner`.
    Capture {
        /// Group name as seen by `Captures::name`.
        name: String,
        /// The captured pattern.
        inner: Box<PatternNode>,
    },
    /// Zero or one occurrence of `inner`.
    Optional(Box<PatternNode>),
    /// Any one of the alternatives, tried in order.
    Alternation(Vec<PatternNode>),
    /// All nodes, one after another.
    Sequence(Vec<PatternNode>),
    /// The end of the input.
    EndOfText,
}

impl PatternNode {
    /// Creates a literal node.
    pub fn literal(text: impl Into<String>) -> Self {
        Self::Literal(text.into())
    }

    /// Creates a raw regex node.
    pub fn raw(source: impl Into<String>) -> Self {
        Self::Raw(source.into())
    }

    /// Creates a named capture node.
    pub fn capture(name: impl Into<String>, inner: PatternNode) -> Self {
        Self::Capture {
            name: name.into(),
            inner: Box::new(inner),
        }
    }

    /// Creates an optional node.
    pub fn optional(inner: PatternNode) -> Self {
        Self::Optional(Box::new(inner))
    }

    /// Creates an alternation node.
    pub fn alternation(alternatives: impl IntoIterator<Item = PatternNode>) -> Self {
        Self::Alternation(alternatives.into_iter().collect())
    }

    /// Creates a sequence node.
    pub fn sequence(nodes: impl IntoIterator<Item = PatternNode>) -> Self {
        Self::Sequence(nodes.into_iter().collect())
    }

    /// Appends this node's regex syntax to `out`.
    pub fn lower(&self, out: &mut String) {
        match self {
            Self::Literal(text) => out.push_str(&regex::escape(text)),
            Self::Raw(source) => {
                out.push_str("(?:");
                out.push_str(source);
                out.push(')');
            }
            Self::Whitespace => out.push_str(r"\s"),
            Self::Capture { name, inner } => {
                out.push_str("(?P<");
                out.push_str(name);
                out.push('>');
                inner.lower(out);
                out.push(')');
            }
            Self::Optional(inner) => {
                out.push_str("(?:");
                inner.lower(out);
                out.push_str(")?");
            }
            Self::Alternation(alternatives) => {
                if alternatives.is_empty() {
                    // An empty alternation can never match.
                    out.push_str(r"\b\B");
                    return;
                }
                out.push_str("(?:");
                for (i, alternative) in alternatives.iter().enumerate() {
                    if i > 0 {
                        out.push('|');
                    }
                    alternative.lower(out);
                }
                out.push(')');
            }
            Self::Sequence(nodes) => {
                for node in nodes {
                    node.lower(out);
                }
            }
            Self::EndOfText => out.push_str(r"\z"),
        }
    }

    /// Returns this node's regex syntax.
    pub fn to_source(&self) -> String {
        let mut out = String::new();
        self.lower(&mut out);
        out
    }
}

/// Accumulates a top-level sequence of [`PatternNode`]s and compiles it.
#[derive(Debug, Clone, Default)]
pub struct PatternBuilder {
    nodes: Vec<PatternNode>,
}

impl PatternBuilder {
    /// Creates an empty builder.
    pub fn new() -> Self {
        Self { nodes: Vec::new() }
    }

    /// Appends a node (builder pattern).
    pub fn push(mut self, node: PatternNode) -> Self {
        self.nodes.push(node);
        self
    }

    /// Appends a node in place.
    pub fn add(&mut self, node: PatternNode) {
        self.nodes.push(node);
    }

    /// Returns the lowered regex source.
    pub fn source(&self) -> String {
        let mut out = String::new();
        for node in &self.nodes {
            node.lower(&mut out);
        }
        out
    }

    /// Lowers and compiles the pattern.
    pub fn build(&self) -> Result<Regex, regex::Error> {
        Regex::new(&self.source())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_literal_is_escaped() {
        let node = PatternNode::literal("a.b+c");
        assert_eq!(node.to_source(), r"a\.b\+c");
    }

    #[test]
    fn test_raw_is_fenced() {
        let node = PatternNode::sequence([
            PatternNode::literal("x"),
            PatternNode::raw("a|b"),
        ]);
        let regex = Regex::new(&format!("^{}$", node.to_source())).unwrap();
        assert!(regex.is_match("xa"));
        assert!(regex.is_match("xb"));
        assert!(!regex.is_match("b"));
    }

    #[test]
    fn test_optional_capture() {
        let regex = PatternBuilder::new()
            .push(PatternNode::literal("go"))
            .push(PatternNode::optional(PatternNode::sequence([
                PatternNode::Whitespace,
                PatternNode::capture("arg0", PatternNode::raw("[0-9]+")),
            ])))
            .push(PatternNode::EndOfText)
            .build()
            .unwrap();

        let caps = regex.captures("go").unwrap();
        assert!(caps.name("arg0").is_none());

        let caps = regex.captures("go 42").unwrap();
        assert_eq!(caps.name("arg0").unwrap().as_str(), "42");

        assert!(!regex.is_match("go "));
    }

    #[test]
    fn test_alternation_order_and_end_anchor() {
        let regex = PatternBuilder::new()
            .push(PatternNode::alternation(
                ["help", "h?"].map(PatternNode::literal),
            ))
            .push(PatternNode::EndOfText)
            .build()
            .unwrap();
        assert!(regex.is_match("help"));
        assert!(regex.is_match("h?"));
        assert!(!regex.is_match("h"));
        assert!(!regex.is_match("help me"));
    }

    #[test]
    fn test_empty_alternation_never_matches() {
        let regex = PatternBuilder::new()
            .push(PatternNode::Alternation(Vec::new()))
            .build()
            .unwrap();
        assert!(!regex.is_match(""));
        assert!(!regex.is_match("anything"));
    }
}
