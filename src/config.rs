//! Declarative configuration model for console applications.
//!
//! The configuration is a map from application identifier to a descriptor
//! holding the application name, version, and the list of command references
//! to resolve at assembly time. Descriptors usually come from a JSON document,
//! but can also be built programmatically with [`AppDescriptor::builder`] when
//! commands are constructed up front.

use std::collections::HashMap;
use std::fmt;

use anyhow::{Context, Result};
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use typed_builder::TypedBuilder;

use crate::commands::Command;

/// Full configuration map: application identifier to descriptor.
#[derive(Debug, Default, Deserialize)]
#[serde(transparent)]
pub struct ConsoleConfig(HashMap<String, AppDescriptor>);

impl ConsoleConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a configuration map from a JSON document.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("parsing console configuration")
    }

    /// Insert a descriptor under an application identifier.
    pub fn insert(&mut self, app_id: impl Into<String>, descriptor: AppDescriptor) {
        self.0.insert(app_id.into(), descriptor);
    }

    /// Builder-style [`insert`](ConsoleConfig::insert).
    pub fn with(mut self, app_id: impl Into<String>, descriptor: AppDescriptor) -> Self {
        self.insert(app_id, descriptor);
        self
    }

    /// Remove and return the descriptor for an application identifier.
    pub(crate) fn take(&mut self, app_id: &str) -> Option<AppDescriptor> {
        self.0.remove(app_id)
    }
}

/// Per-application configuration: name, version, and command references.
///
/// All fields are optional. Assembly substitutes defaults for a missing name
/// and version and treats a missing command list as empty.
#[derive(Debug, Default, Deserialize, TypedBuilder)]
#[serde(default)]
pub struct AppDescriptor {
    #[builder(default, setter(strip_option, into))]
    pub name: Option<String>,
    #[builder(default, setter(strip_option, into))]
    pub version: Option<String>,
    #[builder(default)]
    pub commands: Vec<CommandRef>,
}

/// A single entry of a descriptor's command list.
///
/// Configuration documents can only produce [`Id`](CommandRef::Id) and
/// [`Other`](CommandRef::Other); [`Instance`](CommandRef::Instance) is for
/// callers assembling configuration programmatically with commands they
/// already constructed.
pub enum CommandRef {
    /// Service identifier to look up in the container.
    Id(String),
    /// Already-constructed command, used as-is.
    Instance(Box<dyn Command>),
    /// Any other configuration shape. Rejected at resolution time.
    Other(Value),
}

impl CommandRef {
    /// Reference a command by its service identifier.
    pub fn id(id: impl Into<String>) -> Self {
        CommandRef::Id(id.into())
    }

    /// Reference an already-constructed command.
    pub fn instance(command: impl Command + 'static) -> Self {
        CommandRef::Instance(Box::new(command))
    }
}

impl fmt::Debug for CommandRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CommandRef::Id(id) => f.debug_tuple("Id").field(id).finish(),
            CommandRef::Instance(command) => {
                f.debug_tuple("Instance").field(&command.name()).finish()
            }
            CommandRef::Other(value) => f.debug_tuple("Other").field(value).finish(),
        }
    }
}

/// Strings deserialize to [`CommandRef::Id`]; every other shape is kept as
/// [`CommandRef::Other`] so resolution can report what was actually given.
impl<'de> Deserialize<'de> for CommandRef {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match Value::deserialize(deserializer)? {
            Value::String(id) => CommandRef::Id(id),
            other => CommandRef::Other(other),
        })
    }
}

/// Human-readable type name of a configuration value, used in diagnostics.
pub(crate) fn value_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(n) if n.is_f64() => "float",
        Value::Number(_) => "integer",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
