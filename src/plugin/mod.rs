//! Action observers notified before every fold.
//!
//! Plugins form a static, ordered chain. Each one sees every action exactly
//! once, before the state mapper and the effect producer. A plugin error
//! stops the chain and is fatal to the pipeline.

mod tracing_plugin;

use std::sync::Arc;

use crate::error::PluginError;
use crate::mvi::Action;

pub use tracing_plugin::TracingPlugin;

/// Read-only observer of produced actions.
pub trait MviPlugin<A: Action>: Send + Sync + 'static {
    /// Label used in error reports and logs.
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }

    /// Called once per action, before it is folded into state.
    fn on_action(&self, action: &A) -> Result<(), PluginError>;
}

/// Ordered list of plugins, fixed at construction.
pub struct PluginChain<A: Action> {
    plugins: Vec<Arc<dyn MviPlugin<A>>>,
}

impl<A: Action> PluginChain<A> {
    pub fn new(plugins: Vec<Arc<dyn MviPlugin<A>>>) -> Self {
        Self { plugins }
    }

    pub fn len(&self) -> usize {
        self.plugins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.plugins.is_empty()
    }

    /// Notify every plugin in registration order, stopping at the first error.
    pub fn notify(&self, action: &A) -> Result<(), PluginError> {
        for plugin in &self.plugins {
            plugin.on_action(action)?;
        }
        Ok(())
    }
}

impl<A: Action> Default for PluginChain<A> {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}
