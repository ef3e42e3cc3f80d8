//! Compiled command definitions.
//!
//! A [`Command`] is built once from a name, an ordered argument list and
//! [`CommandOptions`]. Construction validates the definition and compiles the
//! matcher; afterwards the command is immutable and can be shared freely.
//!
//! # Example
//!
//! ```rust,ignore
//! use alloy_command::{ArgumentSpec, Command, TypeTag};
//!
//! let grant = Command::builder("grant")
//!     .argument(ArgumentSpec::required("name", TypeTag::String))
//!     .argument(ArgumentSpec::optional("level", TypeTag::Integer))
//!     .summary("Grants access")
//!     .build()?;
//!
//! assert_eq!(grant.usage(), "!grant NAME (LEVEL)");
//!
//! let args = grant.captures("grant alice 3").unwrap();
//! assert_eq!(args.value("name"), Some("alice"));
//! assert_eq!(args.parse::<u32>("level")?, Some(3));
//! ```

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use regex::Regex;

use crate::argument::ArgumentSpec;
use crate::error::{CommandError, CommandResult};
use crate::pattern::{PatternBuilder, PatternNode};

/// Trigger prefix shown in usage strings.
pub const DEFAULT_PREFIX: &str = "!";

/// Optional settings of a command definition.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOptions {
    /// Alternate names, in order.
    pub aliases: Vec<String>,
    /// Short one-line summary.
    pub summary: Option<String>,
    /// Long description.
    pub description: Option<String>,
    /// Whether invoking requires operator privileges.
    ///
    /// Advisory only: the command itself never checks it.
    pub op_command: bool,
}

/// A compiled chat command.
#[derive(Clone)]
pub struct Command {
    name: String,
    arguments: Vec<ArgumentSpec>,
    aliases: Vec<String>,
    summary: Option<String>,
    description: Option<String>,
    op_command: bool,
    matcher: Regex,
}

impl Command {
    /// Validates the definition and compiles its matcher.
    ///
    /// # Errors
    ///
    /// Returns [`CommandError::InvalidArgumentSpec`] when the name or an alias
    /// is empty or repeated, an argument name is empty or repeated, or an
    /// argument format can never match (empty choices, empty literal, custom
    /// pattern that does not compile).
    pub fn new(
        name: impl Into<String>,
        arguments: Vec<ArgumentSpec>,
        options: CommandOptions,
    ) -> CommandResult<Self> {
        let name = name.into();
        validate(&name, &arguments, &options.aliases)?;

        let matcher = compile_matcher(&name, &options.aliases, &arguments)
            .map_err(|e| CommandError::invalid_spec(&name, format!("matcher does not compile: {e}")))?;

        Ok(Self {
            name,
            arguments,
            aliases: options.aliases,
            summary: options.summary,
            description: options.description,
            op_command: options.op_command,
            matcher,
        })
    }

    /// Starts a fluent definition.
    pub fn builder(name: impl Into<String>) -> CommandBuilder {
        CommandBuilder::new(name)
    }

    /// The primary name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Alternate names, in declaration order.
    pub fn aliases(&self) -> &[String] {
        &self.aliases
    }

    /// The primary name followed by every alias.
    pub fn names(&self) -> Vec<&str> {
        std::iter::once(self.name.as_str())
            .chain(self.aliases.iter().map(String::as_str))
            .collect()
    }

    /// The argument list, in declaration order.
    pub fn arguments(&self) -> &[ArgumentSpec] {
        &self.arguments
    }

    /// Short summary, if any.
    pub fn summary(&self) -> Option<&str> {
        self.summary.as_deref()
    }

    /// Long description, if any.
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Whether the command is reserved for operators.
    pub fn is_op_command(&self) -> bool {
        self.op_command
    }

    /// The compiled matcher.
    ///
    /// Anchored at the end of the text only, so a command embedded after a
    /// trigger prefix still matches.
    pub fn matcher(&self) -> &Regex {
        &self.matcher
    }

    /// Returns `true` if `text` invokes this command.
    pub fn is_match(&self, text: &str) -> bool {
        self.matcher.is_match(text)
    }

    /// Matches `text` and extracts one value per declared argument.
    pub fn captures(&self, text: &str) -> Option<CommandArgs> {
        let caps = self.matcher.captures(text)?;
        Some(self.extract(&caps))
    }

    /// Like [`captures`](Self::captures), but the name or alias must open
    /// `text`.
    ///
    /// Use this on text that directly follows a trigger prefix, so that
    /// `!I said help` does not invoke `help`.
    pub fn captures_at_start(&self, text: &str) -> Option<CommandArgs> {
        // The leftmost match starts at 0 whenever any match does.
        let caps = self.matcher.captures(text)?;
        if caps.get(0).is_some_and(|m| m.start() == 0) {
            Some(self.extract(&caps))
        } else {
            None
        }
    }

    fn extract(&self, caps: &regex::Captures<'_>) -> CommandArgs {
        let entries = self
            .arguments
            .iter()
            .enumerate()
            .map(|(i, arg)| {
                let value = caps
                    .name(&capture_name(i))
                    .map(|m| m.as_str().to_string());
                (arg.name.clone(), value)
            })
            .collect();
        CommandArgs { entries }
    }

    /// Usage string with the default `!` prefix, e.g. `!grant NAME (LEVEL)`.
    pub fn usage(&self) -> String {
        self.usage_with_prefix(DEFAULT_PREFIX)
    }

    /// Usage string with a custom trigger prefix.
    pub fn usage_with_prefix(&self, prefix: &str) -> String {
        let mut usage = format!("{prefix}{}", self.name);
        for arg in &self.arguments {
            usage.push(' ');
            usage.push_str(&arg.usage());
        }
        usage
    }
}

impl fmt::Debug for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Command")
            .field("name", &self.name)
            .field("aliases", &self.aliases)
            .field("arguments", &self.arguments)
            .field("op_command", &self.op_command)
            .field("matcher", &self.matcher.as_str())
            .finish()
    }
}

fn capture_name(index: usize) -> String {
    format!("arg{index}")
}

fn validate(name: &str, arguments: &[ArgumentSpec], aliases: &[String]) -> CommandResult<()> {
    if name.is_empty() {
        return Err(CommandError::invalid_spec(name, "command name is empty"));
    }

    let mut names = HashSet::from([name]);
    for alias in aliases {
        if alias.is_empty() {
            return Err(CommandError::invalid_spec(name, "alias is empty"));
        }
        if !names.insert(alias.as_str()) {
            return Err(CommandError::invalid_spec(
                name,
                format!("name '{alias}' is declared more than once"),
            ));
        }
    }

    let mut seen = HashSet::new();
    for arg in arguments {
        if arg.name.is_empty() {
            return Err(CommandError::invalid_spec(name, "argument name is empty"));
        }
        if !seen.insert(arg.name.as_str()) {
            return Err(CommandError::invalid_spec(
                name,
                format!("duplicate argument '{}'", arg.name),
            ));
        }
        arg.format
            .validate()
            .map_err(|reason| CommandError::invalid_spec(name, format!("argument '{}': {reason}", arg.name)))?;
    }

    Ok(())
}

fn compile_matcher(
    name: &str,
    aliases: &[String],
    arguments: &[ArgumentSpec],
) -> Result<Regex, regex::Error> {
    let names = std::iter::once(name)
        .chain(aliases.iter().map(String::as_str))
        .map(PatternNode::literal);
    let mut builder = PatternBuilder::new().push(PatternNode::alternation(names));

    for (i, arg) in arguments.iter().enumerate() {
        let value = PatternNode::capture(capture_name(i), arg.format.to_node());
        if arg.optional {
            builder.add(PatternNode::optional(PatternNode::sequence([
                PatternNode::Whitespace,
                value,
            ])));
        } else {
            builder.add(PatternNode::Whitespace);
            builder.add(value);
        }
    }

    builder.push(PatternNode::EndOfText).build()
}

/// Fluent builder for [`Command`].
#[derive(Debug, Clone)]
pub struct CommandBuilder {
    name: String,
    arguments: Vec<ArgumentSpec>,
    options: CommandOptions,
}

impl CommandBuilder {
    /// Creates a builder for a command with the given primary name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            arguments: Vec::new(),
            options: CommandOptions::default(),
        }
    }

    /// Appends an argument.
    pub fn argument(mut self, argument: ArgumentSpec) -> Self {
        self.arguments.push(argument);
        self
    }

    /// Appends an alias.
    pub fn alias(mut self, alias: impl Into<String>) -> Self {
        self.options.aliases.push(alias.into());
        self
    }

    /// Sets the summary.
    pub fn summary(mut self, summary: impl Into<String>) -> Self {
        self.options.summary = Some(summary.into());
        self
    }

    /// Sets the description.
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.options.description = Some(description.into());
        self
    }

    /// Marks the command as operator-only (default: `false`).
    pub fn op_command(mut self, enabled: bool) -> Self {
        self.options.op_command = enabled;
        self
    }

    /// Validates and compiles the command.
    pub fn build(self) -> CommandResult<Command> {
        Command::new(self.name, self.arguments, self.options)
    }
}

/// Argument values extracted from one invocation.
///
/// Holds exactly one entry per declared argument, in declaration order. An
/// optional argument that was left out is `None`, never an empty string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandArgs {
    entries: Vec<(String, Option<String>)>,
}

impl CommandArgs {
    /// Number of declared arguments.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the command declares no arguments.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Value at a position, `None` if absent or out of range.
    pub fn get(&self, index: usize) -> Option<&str> {
        self.entries.get(index).and_then(|(_, v)| v.as_deref())
    }

    /// Value of the argument with the given name.
    pub fn value(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .and_then(|(_, v)| v.as_deref())
    }

    /// Returns `true` if the named argument received a value.
    pub fn is_present(&self, name: &str) -> bool {
        self.value(name).is_some()
    }

    /// All values in declaration order.
    pub fn values(&self) -> Vec<Option<&str>> {
        self.entries.iter().map(|(_, v)| v.as_deref()).collect()
    }

    /// Iterates `(name, value)` pairs in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&str>)> {
        self.entries
            .iter()
            .map(|(n, v)| (n.as_str(), v.as_deref()))
    }

    /// Parses the named argument, `Ok(None)` if it is absent.
    pub fn parse<T: FromStr>(&self, name: &str) -> Result<Option<T>, T::Err> {
        self.value(name).map(str::parse).transpose()
    }
}
