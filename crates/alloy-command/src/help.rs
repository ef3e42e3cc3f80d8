//! Help text rendering.
//!
//! These helpers produce the plain-text lines of a `help` command. Delivering
//! them (reply, notice, private message) is left to the caller.

use crate::argument::{ArgumentSpec, TypeTag};
use crate::command::Command;
use crate::dispatcher::Dispatcher;
use crate::error::CommandResult;

/// Primary name of the built-in help command.
pub const HELP_COMMAND: &str = "help";

/// Display name of the help command's optional argument.
pub const HELP_ARGUMENT: &str = "COMMAND";

/// Builds the `help` command: `!help (COMMAND)`.
pub fn help_command() -> CommandResult<Command> {
    Command::builder(HELP_COMMAND)
        .argument(ArgumentSpec::optional(HELP_ARGUMENT, TypeTag::String))
        .summary("List all commands or displays help information for the given COMMAND")
        .description(
            "List all possible commands when supplied with no arguments otherwise finds the \
             specified COMMAND and prints the usage and description.",
        )
        .build()
}

/// One `<usage> - <summary>` line per command, in the given order.
///
/// Commands without a summary render as the bare usage.
pub fn render_listing<'a, I>(commands: I, prefix: &str) -> Vec<String>
where
    I: IntoIterator<Item = &'a Command>,
{
    commands
        .into_iter()
        .map(|cmd| match cmd.summary() {
            Some(summary) => format!("{} - {summary}", cmd.usage_with_prefix(prefix)),
            None => cmd.usage_with_prefix(prefix),
        })
        .collect()
}

/// Detailed help for every command whose primary name is `name`.
///
/// Prints each match's usage, then a blank line and the first match's
/// description. Unknown names produce a single error line.
pub fn render_detail(dispatcher: &Dispatcher, name: &str, prefix: &str) -> Vec<String> {
    let found = dispatcher.lookup_by_name(name);
    let Some(first) = found.first() else {
        return vec![format!("help: Unknown command {name:?}")];
    };

    let mut lines: Vec<String> = found
        .iter()
        .map(|cmd| cmd.usage_with_prefix(prefix))
        .collect();
    lines.push(String::new());
    if let Some(description) = first.description() {
        lines.push(description.to_string());
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dispatcher() -> Dispatcher {
        let mut dispatcher = Dispatcher::new();
        dispatcher
            .register(
                "admin",
                Command::builder("grant")
                    .argument(ArgumentSpec::required("name", TypeTag::String))
                    .argument(ArgumentSpec::optional("level", TypeTag::Integer))
                    .summary("Grants access")
                    .description("Grants a certain level of access to the user")
                    .build()
                    .unwrap(),
            )
            .unwrap();
        dispatcher
            .register("misc", Command::builder("ping").build().unwrap())
            .unwrap();
        dispatcher
            .register(
                "legacy",
                Command::builder("grant")
                    .argument(ArgumentSpec::required("user", TypeTag::String))
                    .description("Old grant")
                    .build()
                    .unwrap(),
            )
            .unwrap();
        dispatcher
            .register("help", help_command().unwrap())
            .unwrap();
        dispatcher
    }

    #[test]
    fn test_help_command_usage() {
        let cmd = help_command().unwrap();
        assert_eq!(cmd.usage(), "!help (COMMAND)");
        assert_eq!(cmd.captures("help").unwrap().get(0), None);
        assert_eq!(cmd.captures("help grant").unwrap().get(0), Some("grant"));
    }

    #[test]
    fn test_listing() {
        let dispatcher = dispatcher();
        let lines = render_listing(dispatcher.commands().map(|c| &**c), "!");
        assert_eq!(
            lines,
            vec![
                "!grant NAME (LEVEL) - Grants access",
                "!ping",
                "!grant USER",
                "!help (COMMAND) - List all commands or displays help information for the given COMMAND",
            ]
        );
    }

    #[test]
    fn test_detail() {
        let lines = render_detail(&dispatcher(), "grant", "!");
        assert_eq!(
            lines,
            vec![
                "!grant NAME (LEVEL)",
                "!grant USER",
                "",
                "Grants a certain level of access to the user",
            ]
        );
    }

    #[test]
    fn test_detail_without_description() {
        let lines = render_detail(&dispatcher(), "ping", ".");
        assert_eq!(lines, vec![".ping", ""]);
    }

    #[test]
    fn test_unknown_command() {
        let lines = render_detail(&dispatcher(), "nope", "!");
        assert_eq!(lines, vec![r#"help: Unknown command "nope""#]);
    }
}
