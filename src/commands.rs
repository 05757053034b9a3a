//! This module contains the core trait for console commands.
//!
//! A command is a unit of console-invokable behavior with a unique name.
//! The application registers commands under their own name and dispatches
//! execution to them.

use anyhow::Result;
use async_trait::async_trait;

/// Trait for all console commands.
///
/// A command is a unit of work that can be executed. It is registered into an
/// [`Application`](crate::Application) under its [`name`](Command::name).
#[async_trait]
pub trait Command: Send {
    /// Unique name the command is registered under.
    fn name(&self) -> &str;

    /// Execute the command.
    async fn execute(&mut self) -> Result<()>;
}

#[cfg(test)]
pub mod fakes {
    use std::sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    };

    use super::*;

    /// Command whose executions can be observed from outside the application.
    pub struct FakeCommand {
        name: String,
        executions: Arc<AtomicUsize>,
    }

    impl FakeCommand {
        pub fn new(name: impl Into<String>) -> Self {
            FakeCommand {
                name: name.into(),
                executions: Arc::new(AtomicUsize::new(0)),
            }
        }

        /// Counter incremented once per execution.
        pub fn execution_counter(&self) -> Arc<AtomicUsize> {
            Arc::clone(&self.executions)
        }
    }

    #[async_trait]
    impl Command for FakeCommand {
        fn name(&self) -> &str {
            &self.name
        }

        async fn execute(&mut self) -> Result<()> {
            self.executions.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }
}
