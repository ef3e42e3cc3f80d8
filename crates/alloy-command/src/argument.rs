//! Argument specifications.
//!
//! Each positional argument of a command is an [`ArgumentSpec`]: a display
//! name, an [`ArgumentFormat`] and an optional flag. Formats are a closed set,
//! resolved to pattern nodes once when the command is compiled.

use std::fmt;
use std::str::FromStr;

use crate::error::CommandError;
use crate::pattern::PatternNode;

/// Built-in argument types with a fixed sub-pattern each.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeTag {
    /// One or more non-whitespace characters.
    String,
    /// One or more ASCII digits.
    Integer,
    /// Optional digits, a decimal point, then one or more digits.
    Float,
    /// The rest of the line, whitespace included.
    ///
    /// Only meaningful as the last argument: anything declared after a `text`
    /// argument can never receive input.
    Text,
}

impl TypeTag {
    /// All tags, in declaration order.
    pub const ALL: [TypeTag; 4] = [Self::String, Self::Integer, Self::Float, Self::Text];

    /// Returns the lowercase tag name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Integer => "integer",
            Self::Float => "float",
            Self::Text => "text",
        }
    }

    /// Returns the regex fragment this tag matches.
    pub fn source(&self) -> &'static str {
        match self {
            Self::String => r"\S+",
            Self::Integer => "[0-9]+",
            Self::Float => r"[0-9]*\.[0-9]+",
            Self::Text => ".+",
        }
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TypeTag {
    type Err = CommandError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|tag| tag.as_str() == s)
            .ok_or_else(|| CommandError::UnknownTypeTag(s.to_string()))
    }
}

/// How an argument's text is recognised.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArgumentFormat {
    /// A built-in type.
    Type(TypeTag),
    /// A custom regex fragment, used verbatim.
    Pattern(String),
    /// One of a fixed, ordered list of literal strings.
    Choices(Vec<String>),
    /// A literal string matched exactly.
    Literal(String),
}

impl ArgumentFormat {
    /// Creates a custom pattern format.
    pub fn pattern(source: impl Into<String>) -> Self {
        Self::Pattern(source.into())
    }

    /// Creates an enumerated-choice format.
    pub fn choices<I, S>(choices: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Choices(choices.into_iter().map(Into::into).collect())
    }

    /// Creates a literal format.
    pub fn literal(text: impl Into<String>) -> Self {
        Self::Literal(text.into())
    }

    /// Resolves the format into the pattern node matching one value.
    pub(crate) fn to_node(&self) -> PatternNode {
        match self {
            Self::Type(tag) => PatternNode::raw(tag.source()),
            Self::Pattern(source) => PatternNode::raw(source.as_str()),
            Self::Choices(choices) => {
                PatternNode::alternation(choices.iter().map(|c| PatternNode::literal(c.as_str())))
            }
            Self::Literal(text) => PatternNode::literal(text.as_str()),
        }
    }

    /// Human-readable rendering used in usage strings.
    pub(crate) fn render(&self, display_name: &str) -> String {
        match self {
            Self::Type(_) => display_name.to_uppercase(),
            Self::Pattern(source) => source.clone(),
            Self::Choices(choices) => format!("[{}]", choices.join("|")),
            Self::Literal(text) => text.clone(),
        }
    }

    /// Checks the format for values that could never match sensibly.
    pub(crate) fn validate(&self) -> Result<(), String> {
        match self {
            Self::Type(_) => Ok(()),
            Self::Pattern(source) if source.is_empty() => Err("custom pattern is empty".into()),
            Self::Pattern(source) => regex::Regex::new(source)
                .map(|_| ())
                .map_err(|e| format!("custom pattern does not compile: {e}")),
            Self::Choices(choices) if choices.is_empty() => Err("choice list is empty".into()),
            Self::Choices(choices) if choices.iter().any(String::is_empty) => {
                Err("choice list contains an empty string".into())
            }
            Self::Choices(_) => Ok(()),
            Self::Literal(text) if text.is_empty() => Err("literal is empty".into()),
            Self::Literal(_) => Ok(()),
        }
    }
}

impl From<TypeTag> for ArgumentFormat {
    fn from(tag: TypeTag) -> Self {
        Self::Type(tag)
    }
}

/// One positional argument of a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArgumentSpec {
    /// Identifier, also the display label in usage strings.
    pub name: String,
    /// How the argument's value is recognised.
    pub format: ArgumentFormat,
    /// Whether the argument may be left out.
    pub optional: bool,
}

impl ArgumentSpec {
    /// Creates a required argument.
    pub fn required(name: impl Into<String>, format: impl Into<ArgumentFormat>) -> Self {
        Self {
            name: name.into(),
            format: format.into(),
            optional: false,
        }
    }

    /// Creates an optional argument.
    pub fn optional(name: impl Into<String>, format: impl Into<ArgumentFormat>) -> Self {
        Self {
            name: name.into(),
            format: format.into(),
            optional: true,
        }
    }

    /// Usage rendering, parenthesised when optional.
    pub fn usage(&self) -> String {
        let rendered = self.format.render(&self.name);
        if self.optional {
            format!("({rendered})")
        } else {
            rendered
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_tag_from_str() {
        assert_eq!("integer".parse::<TypeTag>().unwrap(), TypeTag::Integer);
        assert_eq!("text".parse::<TypeTag>().unwrap(), TypeTag::Text);
        assert_eq!(
            "strnig".parse::<TypeTag>().unwrap_err(),
            CommandError::UnknownTypeTag("strnig".into())
        );
    }

    #[test]
    fn test_argument_usage() {
        assert_eq!(ArgumentSpec::required("name", TypeTag::String).usage(), "NAME");
        assert_eq!(ArgumentSpec::optional("level", TypeTag::Integer).usage(), "(LEVEL)");
        assert_eq!(
            ArgumentSpec::required("color", ArgumentFormat::choices(["red", "green"])).usage(),
            "[red|green]"
        );
        assert_eq!(
            ArgumentSpec::optional("dice", ArgumentFormat::pattern(r"\d+d\d+")).usage(),
            r"(\d+d\d+)"
        );
        assert_eq!(
            ArgumentSpec::required("kw", ArgumentFormat::literal("to")).usage(),
            "to"
        );
    }

    #[test]
    fn test_format_validation() {
        assert!(ArgumentFormat::choices(Vec::<String>::new()).validate().is_err());
        assert!(ArgumentFormat::choices(["a", ""]).validate().is_err());
        assert!(ArgumentFormat::literal("").validate().is_err());
        assert!(ArgumentFormat::pattern("(unclosed").validate().is_err());
        assert!(ArgumentFormat::pattern("[a-z]+").validate().is_ok());
        assert!(ArgumentFormat::Type(TypeTag::Float).validate().is_ok());
    }
}
