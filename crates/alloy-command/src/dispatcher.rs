//! Command dispatcher.
//!
//! The [`Dispatcher`] holds every group's [`CommandRegistry`] in insertion
//! order and routes text to the first command whose matcher accepts it:
//!
//! 1. Groups are checked in the order they were added
//! 2. Within a group, commands are checked in registration order
//! 3. The first match wins; there is no scoring
//!
//! ```rust,ignore
//! use alloy_command::{Dispatcher, Command};
//!
//! let mut dispatcher = Dispatcher::new();
//! dispatcher.register("admin", Command::builder("kick").build()?)?;
//!
//! match dispatcher.dispatch("kick") {
//!     Some(hit) => println!("{} from {}", hit.command.name(), hit.group),
//!     None => println!("just chatter"),
//! }
//! ```
//!
//! Once built, a dispatcher is only read. Share it behind an `Arc` and dispatch
//! from any number of tasks without locking.

use std::sync::Arc;

use tracing::{debug, trace};

use crate::command::{Command, CommandArgs};
use crate::error::CommandResult;
use crate::registry::CommandRegistry;

/// The result of a successful dispatch.
#[derive(Debug, Clone)]
pub struct CommandMatch<'a> {
    /// Group that owns the matched command.
    pub group: &'a str,
    /// The matched command.
    pub command: &'a Arc<Command>,
    /// Extracted argument values.
    pub args: CommandArgs,
}

/// Routes text to registered commands across all groups.
#[derive(Debug, Clone, Default)]
pub struct Dispatcher {
    groups: Vec<CommandRegistry>,
}

impl Dispatcher {
    /// Creates an empty dispatcher.
    pub fn new() -> Self {
        Self { groups: Vec::new() }
    }

    /// Returns the registry of `group`, appending an empty one if needed.
    pub fn group_mut(&mut self, group: &str) -> &mut CommandRegistry {
        let index = match self.groups.iter().position(|r| r.group() == group) {
            Some(index) => index,
            None => {
                self.groups.push(CommandRegistry::new(group));
                self.groups.len() - 1
            }
        };
        &mut self.groups[index]
    }

    /// Returns the registry of `group`, if it exists.
    pub fn group(&self, group: &str) -> Option<&CommandRegistry> {
        self.groups.iter().find(|r| r.group() == group)
    }

    /// Registers `command` in `group`.
    pub fn register(&mut self, group: &str, command: Command) -> CommandResult<Arc<Command>> {
        self.group_mut(group).register(command)
    }

    /// Iterates the groups in insertion order.
    pub fn groups(&self) -> impl Iterator<Item = &CommandRegistry> {
        self.groups.iter()
    }

    /// Iterates every command across all groups, in insertion order.
    pub fn commands(&self) -> impl Iterator<Item = &Arc<Command>> {
        self.groups.iter().flat_map(CommandRegistry::iter)
    }

    /// Total number of commands.
    pub fn command_count(&self) -> usize {
        self.groups.iter().map(CommandRegistry::len).sum()
    }

    /// Finds the first command whose matcher accepts `text`.
    ///
    /// Returns `None` for ordinary text that invokes nothing.
    pub fn dispatch(&self, text: &str) -> Option<CommandMatch<'_>> {
        self.find_match(text, Command::captures)
    }

    /// Like [`dispatch`](Self::dispatch), but only accepts commands whose
    /// name or alias opens `text`.
    ///
    /// This is the entry point for text left after stripping a trigger
    /// prefix: `!debug bob` must not run a command aliased `g`.
    pub fn dispatch_at_start(&self, text: &str) -> Option<CommandMatch<'_>> {
        self.find_match(text, Command::captures_at_start)
    }

    fn find_match<F>(&self, text: &str, captures: F) -> Option<CommandMatch<'_>>
    where
        F: Fn(&Command, &str) -> Option<CommandArgs>,
    {
        for registry in &self.groups {
            for command in registry.iter() {
                if let Some(args) = captures(&**command, text) {
                    debug!(
                        group = %registry.group(),
                        command = %command.name(),
                        "Command matched"
                    );
                    return Some(CommandMatch {
                        group: registry.group(),
                        command,
                        args,
                    });
                }
            }
        }

        trace!(text, "No command matched");
        None
    }

    /// Returns every command whose primary name is exactly `name`.
    ///
    /// Aliases are ignored, so unrelated commands that happen to share an
    /// alias do not show up.
    pub fn lookup_by_name(&self, name: &str) -> Vec<Arc<Command>> {
        self.commands()
            .filter(|cmd| cmd.name() == name)
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::argument::{ArgumentSpec, TypeTag};
    use crate::error::CommandError;

    #[test]
    fn test_no_match() {
        let mut dispatcher = Dispatcher::new();
        dispatcher
            .register("a", Command::builder("kick").build().unwrap())
            .unwrap();
        assert!(dispatcher.dispatch("hello there").is_none());
        assert!(Dispatcher::new().dispatch("kick").is_none());
    }

    #[test]
    fn test_first_registered_wins() {
        let mut dispatcher = Dispatcher::new();
        dispatcher
            .register(
                "first",
                Command::builder("say")
                    .argument(ArgumentSpec::required("word", TypeTag::String))
                    .build()
                    .unwrap(),
            )
            .unwrap();
        dispatcher
            .register(
                "second",
                Command::builder("say")
                    .argument(ArgumentSpec::required("text", TypeTag::Text))
                    .build()
                    .unwrap(),
            )
            .unwrap();

        let hit = dispatcher.dispatch("say hi").unwrap();
        assert_eq!(hit.group, "first");
        assert_eq!(hit.args.value("word"), Some("hi"));

        let hit = dispatcher.dispatch("say hi there").unwrap();
        assert_eq!(hit.group, "second");
        assert_eq!(hit.args.value("text"), Some("hi there"));
    }

    #[test]
    fn test_dispatch_at_start() {
        let mut dispatcher = Dispatcher::new();
        dispatcher
            .register(
                "admin",
                Command::builder("grant")
                    .alias("g")
                    .argument(ArgumentSpec::required("name", TypeTag::String))
                    .build()
                    .unwrap(),
            )
            .unwrap();
        dispatcher
            .register("misc", Command::builder("help").build().unwrap())
            .unwrap();

        assert!(dispatcher.dispatch("debug bob").is_some());
        assert!(dispatcher.dispatch_at_start("debug bob").is_none());
        assert!(dispatcher.dispatch_at_start("I said help").is_none());

        let hit = dispatcher.dispatch_at_start("g bob").unwrap();
        assert_eq!(hit.command.name(), "grant");
        assert_eq!(hit.args.value("name"), Some("bob"));
        assert_eq!(dispatcher.dispatch_at_start("help").unwrap().group, "misc");
    }

    #[test]
    fn test_duplicate_alias_across_groups() {
        let mut dispatcher = Dispatcher::new();
        let a = Command::builder("kick").alias("x").build().unwrap();
        let b = Command::builder("ban").alias("x").build().unwrap();
        let c = Command::builder("mute").alias("x").build().unwrap();

        dispatcher.register("one", a).unwrap();
        assert!(dispatcher.register("two", b).is_ok());
        assert!(matches!(
            dispatcher.register("one", c),
            Err(CommandError::DuplicateName { .. })
        ));
    }

    #[test]
    fn test_lookup_by_name_ignores_aliases() {
        let mut dispatcher = Dispatcher::new();
        dispatcher
            .register("one", Command::builder("help").build().unwrap())
            .unwrap();
        dispatcher
            .register("two", Command::builder("manual").alias("help").build().unwrap())
            .unwrap();
        dispatcher
            .register("three", Command::builder("help").summary("other").build().unwrap())
            .unwrap();

        let found = dispatcher.lookup_by_name("help");
        assert_eq!(found.len(), 2);
        assert!(found.iter().all(|c| c.name() == "help"));
        assert_eq!(found[1].summary(), Some("other"));
        assert!(dispatcher.lookup_by_name("nope").is_empty());
    }

    #[test]
    fn test_group_order_and_reuse() {
        let mut dispatcher = Dispatcher::new();
        dispatcher
            .register("b", Command::builder("one").build().unwrap())
            .unwrap();
        dispatcher
            .register("a", Command::builder("two").build().unwrap())
            .unwrap();
        dispatcher
            .register("b", Command::builder("three").build().unwrap())
            .unwrap();

        let groups: Vec<_> = dispatcher.groups().map(|g| g.group()).collect();
        assert_eq!(groups, vec!["b", "a"]);

        let names: Vec<_> = dispatcher.commands().map(|c| c.name()).collect();
        assert_eq!(names, vec!["one", "three", "two"]);
        assert_eq!(dispatcher.command_count(), 3);
        assert_eq!(dispatcher.group("a").unwrap().len(), 1);
    }
}
