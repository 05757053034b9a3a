//! This module contains the assembly logic for the application.
//!
//! The main entry point is the [`assemble`] function which turns the
//! configuration descriptor for a requested application into a ready
//! [`Application`], resolving each configured command reference against the
//! service container.

use tracing::debug;

use crate::{
    application::Application,
    commands::Command,
    config::{CommandRef, ConsoleConfig, value_type_name},
    container::ServiceLookup,
};

/// Name and version used when the configuration does not provide one.
pub const UNKNOWN: &str = "UNKNOWN";

/// Failure to turn a configuration entry into a registered command.
#[derive(Debug, thiserror::Error)]
pub enum ResolveError {
    /// The configuration names a service the container does not know.
    #[error("Unable to resolve \"{0}\".")]
    ServiceNotFound(String),
    /// A resolved value does not satisfy the command contract.
    #[error(
        "Console commands provided by configuration must either be a class name \
         or instance of a Command, but \"{0}\" given."
    )]
    ServiceNotCreated(String),
    /// The container itself failed while producing a service.
    #[error(transparent)]
    Container(#[from] anyhow::Error),
}

/// Assemble the application described under `requested_name`.
///
/// Missing descriptors and missing fields fall back to defaults: name and
/// version become [`UNKNOWN`] and the command list is empty. Command
/// references are resolved in list order and registered immediately.
/// The first failure aborts assembly; remaining entries are not processed and
/// the partially-built application is dropped, never returned.
pub fn assemble(
    container: &dyn ServiceLookup,
    requested_name: &str,
    mut config: ConsoleConfig,
) -> Result<Application, ResolveError> {
    let descriptor = config.take(requested_name).unwrap_or_default();

    let name = descriptor.name.unwrap_or_else(|| UNKNOWN.to_string());
    let version = descriptor.version.unwrap_or_else(|| UNKNOWN.to_string());
    debug!(app = requested_name, %name, %version, "assembling application");

    let mut application = Application::new(name, version);

    for reference in descriptor.commands {
        application.add(resolve_command(reference, container)?);
    }

    Ok(application)
}

/// Resolve a single command reference.
///
/// String identifiers go through the container; whatever comes back must still
/// satisfy the command contract. Everything that is neither a command nor a
/// known identifier is rejected with a description of its actual type.
fn resolve_command(
    reference: CommandRef,
    container: &dyn ServiceLookup,
) -> Result<Box<dyn Command>, ResolveError> {
    match reference {
        CommandRef::Instance(command) => Ok(command),
        CommandRef::Id(id) => {
            if !container.has(&id) {
                return Err(ResolveError::ServiceNotFound(id));
            }
            container.get(&id)?.into_command().map_err(|service| {
                ResolveError::ServiceNotCreated(service.type_name().to_string())
            })
        }
        CommandRef::Other(value) => Err(ResolveError::ServiceNotCreated(
            value_type_name(&value).to_string(),
        )),
    }
}
