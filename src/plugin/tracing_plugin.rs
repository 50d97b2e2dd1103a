use tracing::Level;

use super::MviPlugin;
use crate::error::PluginError;
use crate::mvi::Action;

/// Emits one `tracing` event per action.
#[derive(Debug, Clone, Copy)]
pub struct TracingPlugin {
    level: Level,
}

impl TracingPlugin {
    pub fn new(level: Level) -> Self {
        Self { level }
    }
}

impl Default for TracingPlugin {
    fn default() -> Self {
        Self::new(Level::DEBUG)
    }
}

impl<A: Action> MviPlugin<A> for TracingPlugin {
    fn name(&self) -> &str {
        "tracing"
    }

    fn on_action(&self, action: &A) -> Result<(), PluginError> {
        if self.level == Level::ERROR {
            tracing::error!(?action, "Action");
        } else if self.level == Level::WARN {
            tracing::warn!(?action, "Action");
        } else if self.level == Level::INFO {
            tracing::info!(?action, "Action");
        } else if self.level == Level::DEBUG {
            tracing::debug!(?action, "Action");
        } else {
            tracing::trace!(?action, "Action");
        }
        Ok(())
    }
}
