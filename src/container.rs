//! This module defines the service-lookup side of assembly. By abstracting the
//! container behind a trait, the assembler can be driven by any
//! dependency-injection implementation and mocked in tests.
//!
//! What a container hands back is opaque: a [`Service`] pairs the type-erased
//! value with its concrete type name, so diagnostics can say what was actually
//! produced when it turns out not to be a command.

use std::any::Any;
use std::collections::HashMap;

use anyhow::{Result, anyhow};
use tracing::trace;

use crate::commands::Command;

/// Lookup capability of a service container.
pub trait ServiceLookup {
    /// Whether the container knows a service under this identifier.
    fn has(&self, id: &str) -> bool;

    /// Produce the service registered under this identifier.
    ///
    /// Errors are infrastructure failures of the container itself and are
    /// propagated to the assembler's caller untranslated.
    fn get(&self, id: &str) -> Result<Service>;
}

/// A value produced by a container.
pub struct Service {
    value: Box<dyn Any + Send>,
    type_name: &'static str,
}

impl std::fmt::Debug for Service {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Service")
            .field("type_name", &self.type_name)
            .finish_non_exhaustive()
    }
}

impl Service {
    /// Wrap an arbitrary value.
    pub fn new<T: Any + Send>(value: T) -> Self {
        Service {
            value: Box::new(value),
            type_name: std::any::type_name::<T>(),
        }
    }

    /// Wrap a command so that [`into_command`](Service::into_command) recovers it.
    pub fn command<C: Command + 'static>(command: C) -> Self {
        Service {
            value: Box::new(Box::new(command) as Box<dyn Command>),
            type_name: std::any::type_name::<C>(),
        }
    }

    /// Concrete type name of the wrapped value.
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Check the command capability contract.
    ///
    /// Returns the wrapped command, or the service back unchanged when the
    /// wrapped value is not a command.
    pub fn into_command(self) -> Result<Box<dyn Command>, Service> {
        let Service { value, type_name } = self;
        value
            .downcast::<Box<dyn Command>>()
            .map(|command| *command)
            .map_err(|value| Service { value, type_name })
    }
}

/// In-memory container backed by factory closures.
///
/// Each [`get`](ServiceLookup::get) invokes the registered factory and yields
/// a fresh service.
#[derive(Default)]
pub struct ServiceRegistry {
    factories: HashMap<String, Box<dyn Fn() -> Service + Send + Sync>>,
}

impl ServiceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a service factory under an identifier.
    pub fn register<F>(&mut self, id: impl Into<String>, factory: F)
    where
        F: Fn() -> Service + Send + Sync + 'static,
    {
        self.factories.insert(id.into(), Box::new(factory));
    }

    /// Register a command factory under an identifier.
    pub fn register_command<C, F>(&mut self, id: impl Into<String>, factory: F)
    where
        C: Command + 'static,
        F: Fn() -> C + Send + Sync + 'static,
    {
        self.register(id, move || Service::command(factory()));
    }
}

impl ServiceLookup for ServiceRegistry {
    fn has(&self, id: &str) -> bool {
        self.factories.contains_key(id)
    }

    fn get(&self, id: &str) -> Result<Service> {
        trace!(service = id, "container lookup");
        let factory = self
            .factories
            .get(id)
            .ok_or_else(|| anyhow!("no service registered under \"{id}\""))?;
        Ok(factory())
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::fakes::FakeCommand;

    #[test]
    fn test_service_wrapping_a_command_passes_the_capability_check() {
        let service = Service::command(FakeCommand::new("command"));

        let command = service.into_command().ok().unwrap();
        assert_eq!(command.name(), "command");
    }

    #[test]
    fn test_service_wrapping_a_non_command_fails_the_capability_check() {
        let service = Service::new(42u32);

        let service = service.into_command().err().unwrap();
        assert_eq!(service.type_name(), "u32");
    }

    #[test]
    fn test_registry_has() {
        let mut registry = ServiceRegistry::new();
        registry.register_command("TestCommand", || FakeCommand::new("command"));

        assert!(registry.has("TestCommand"));
        assert!(!registry.has("OtherCommand"));
    }

    #[test]
    fn test_registry_get_yields_a_fresh_service_per_call() {
        let mut registry = ServiceRegistry::new();
        registry.register_command("TestCommand", || FakeCommand::new("command"));

        let first = registry.get("TestCommand").unwrap().into_command().ok().unwrap();
        let second = registry.get("TestCommand").unwrap().into_command().ok().unwrap();
        assert_eq!(first.name(), second.name());
    }

    #[test]
    fn test_registry_get_unknown_service_fails() {
        let registry = ServiceRegistry::new();

        let error = registry.get("TestCommand").unwrap_err();
        assert_eq!(
            error.to_string(),
            "no service registered under \"TestCommand\""
        );
    }
}
