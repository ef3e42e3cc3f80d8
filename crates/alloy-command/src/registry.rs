//! Per-group command registry.
//!
//! A [`CommandRegistry`] is the flat, ordered command list owned by one group
//! (typically one plugin). Names and aliases share a single namespace inside
//! the group; different groups never collide with each other.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::argument::ArgumentSpec;
use crate::command::{Command, CommandOptions};
use crate::error::{CommandError, CommandResult};

/// Ordered list of commands belonging to one group.
#[derive(Debug, Clone)]
pub struct CommandRegistry {
    group: String,
    commands: Vec<Arc<Command>>,
}

impl CommandRegistry {
    /// Creates an empty registry for `group`.
    pub fn new(group: impl Into<String>) -> Self {
        Self {
            group: group.into(),
            commands: Vec::new(),
        }
    }

    /// The owning group's name.
    pub fn group(&self) -> &str {
        &self.group
    }

    /// Appends a compiled command.
    ///
    /// # Errors
    ///
    /// Returns [`CommandError::DuplicateName`] if the command's name or any
    /// alias equals a name or alias already registered in this group. The
    /// registry is left unchanged in that case.
    pub fn register(&mut self, command: Command) -> CommandResult<Arc<Command>> {
        if let Some(taken) = command.names().into_iter().find(|name| self.find(name).is_some()) {
            warn!(
                group = %self.group,
                command = %command.name(),
                name = taken,
                "Command name collides with an existing command"
            );
            return Err(CommandError::DuplicateName {
                group: self.group.clone(),
                name: taken.to_string(),
            });
        }

        debug!(
            group = %self.group,
            command = %command.name(),
            matcher = %command.matcher().as_str(),
            "Registered command"
        );

        let command = Arc::new(command);
        self.commands.push(Arc::clone(&command));
        Ok(command)
    }

    /// Compiles and registers a command in one step.
    pub fn command(
        &mut self,
        name: impl Into<String>,
        arguments: Vec<ArgumentSpec>,
        options: CommandOptions,
    ) -> CommandResult<Arc<Command>> {
        let command = Command::new(name, arguments, options)?;
        self.register(command)
    }

    /// Finds the command answering to `name`, by primary name or alias.
    pub fn find(&self, name: &str) -> Option<&Arc<Command>> {
        self.commands
            .iter()
            .find(|cmd| cmd.names().contains(&name))
    }

    /// Iterates commands in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &Arc<Command>> {
        self.commands.iter()
    }

    /// Number of registered commands.
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// Returns `true` if no command has been registered.
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::argument::TypeTag;

    fn cmd(name: &str, aliases: &[&str]) -> Command {
        let mut builder = Command::builder(name);
        for alias in aliases {
            builder = builder.alias(*alias);
        }
        builder.build().unwrap()
    }

    #[test]
    fn test_register_preserves_order() {
        let mut registry = CommandRegistry::new("admin");
        registry.register(cmd("kick", &[])).unwrap();
        registry.register(cmd("ban", &[])).unwrap();
        registry
            .command(
                "grant",
                vec![ArgumentSpec::required("name", TypeTag::String)],
                CommandOptions::default(),
            )
            .unwrap();

        let names: Vec<_> = registry.iter().map(|c| c.name()).collect();
        assert_eq!(names, vec!["kick", "ban", "grant"]);
        assert_eq!(registry.len(), 3);
    }

    #[test]
    fn test_shared_alias_is_rejected() {
        let mut registry = CommandRegistry::new("admin");
        registry.register(cmd("kick", &["x"])).unwrap();

        let err = registry.register(cmd("ban", &["x"])).unwrap_err();
        assert_eq!(
            err,
            CommandError::DuplicateName {
                group: "admin".into(),
                name: "x".into(),
            }
        );
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_alias_against_primary_name() {
        let mut registry = CommandRegistry::new("g");
        registry.register(cmd("kick", &[])).unwrap();
        assert!(registry.register(cmd("boot", &["kick"])).is_err());
        assert!(registry.register(cmd("kick", &[])).is_err());
    }

    #[test]
    fn test_names_are_case_sensitive() {
        let mut registry = CommandRegistry::new("g");
        registry.register(cmd("kick", &[])).unwrap();
        assert!(registry.register(cmd("Kick", &[])).is_ok());
    }

    #[test]
    fn test_find_by_alias() {
        let mut registry = CommandRegistry::new("g");
        registry.register(cmd("kick", &["k"])).unwrap();
        assert_eq!(registry.find("k").unwrap().name(), "kick");
        assert!(registry.find("ban").is_none());
    }
}
