//! Assemble a console application from declarative configuration.
//!
//! This crate bridges a configuration map and a service container: given a
//! descriptor naming an application and listing its commands, [`assemble`]
//! builds an [`Application`], substituting string identifiers with command
//! objects retrieved through [`ServiceLookup`] and rejecting anything that is
//! not a command.
//!
//! The configuration side is a plain serde model ([`ConsoleConfig`] /
//! [`AppDescriptor`]), so descriptors can come from a JSON document or be
//! built programmatically with already-constructed commands. The container
//! side is whatever implements [`ServiceLookup`]; [`ServiceRegistry`] is a
//! small factory-backed implementation for hosts without their own container.

pub mod application;
pub mod commands;
pub mod config;
pub mod container;
pub mod factory;

pub use application::Application;
pub use commands::Command;
pub use config::{AppDescriptor, CommandRef, ConsoleConfig};
pub use container::{Service, ServiceLookup, ServiceRegistry};
pub use factory::{ResolveError, UNKNOWN, assemble};
