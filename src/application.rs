//! The assembled console application.

use std::fmt;

use anyhow::{Result, bail};
use tracing::debug;

use crate::commands::Command;

/// A console application: a name, a version, and commands registered under
/// unique names in registration order.
pub struct Application {
    name: String,
    version: String,
    commands: Vec<Box<dyn Command>>,
}

impl Application {
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Application {
            name: name.into(),
            version: version.into(),
            commands: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    /// Register a command under its own name.
    ///
    /// Registering a second command with an already-taken name replaces the
    /// earlier one and keeps its position.
    pub fn add(&mut self, command: Box<dyn Command>) {
        debug!(command = command.name(), "registering command");
        match self
            .commands
            .iter_mut()
            .find(|existing| existing.name() == command.name())
        {
            Some(slot) => *slot = command,
            None => self.commands.push(command),
        }
    }

    /// Look up a registered command by name.
    pub fn get(&self, name: &str) -> Option<&dyn Command> {
        self.commands
            .iter()
            .find(|command| command.name() == name)
            .map(|command| command.as_ref())
    }

    /// Names of all registered commands, in registration order.
    pub fn command_names(&self) -> Vec<&str> {
        self.commands.iter().map(|command| command.name()).collect()
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Execute the registered command with this name.
    pub async fn run(&mut self, command_name: &str) -> Result<()> {
        let Some(command) = self
            .commands
            .iter_mut()
            .find(|command| command.name() == command_name)
        else {
            bail!(
                "command \"{command_name}\" is not registered in \"{}\"",
                self.name
            );
        };

        debug!(command = command_name, "executing command");
        command.execute().await
    }
}

impl fmt::Debug for Application {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Application")
            .field("name", &self.name)
            .field("version", &self.version)
            .field("commands", &self.command_names())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::Ordering;

    use super::*;
    use crate::commands::fakes::FakeCommand;

    #[test]
    fn test_commands_are_registered_in_order() {
        let mut application = Application::new("app", "1.0.0");
        application.add(Box::new(FakeCommand::new("first")));
        application.add(Box::new(FakeCommand::new("second")));
        application.add(Box::new(FakeCommand::new("third")));

        assert_eq!(application.command_names(), vec!["first", "second", "third"]);
        assert!(application.get("second").is_some());
        assert!(application.get("fourth").is_none());
    }

    #[test]
    fn test_registering_a_duplicate_name_replaces_in_place() {
        let mut application = Application::new("app", "1.0.0");
        application.add(Box::new(FakeCommand::new("first")));
        application.add(Box::new(FakeCommand::new("second")));
        application.add(Box::new(FakeCommand::new("first")));

        assert_eq!(application.command_names(), vec!["first", "second"]);
        assert_eq!(application.len(), 2);
    }

    #[tokio::test]
    async fn test_run_dispatches_to_the_named_command() {
        let command = FakeCommand::new("command");
        let executions = command.execution_counter();

        let mut application = Application::new("app", "1.0.0");
        application.add(Box::new(command));

        application.run("command").await.unwrap();
        assert_eq!(executions.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_run_unknown_command_fails() {
        let mut application = Application::new("app", "1.0.0");

        let error = application.run("missing").await.unwrap_err();
        assert_eq!(
            error.to_string(),
            "command \"missing\" is not registered in \"app\""
        );
    }
}
