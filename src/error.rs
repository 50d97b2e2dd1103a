//! Error types for the container pipeline.
//!
//! Processing and plugin failures are fatal to the pipeline that raised
//! them; they end up in [`TerminationCause::Failed`](crate::container::TerminationCause).

use std::fmt::{Debug, Display};

use thiserror::Error;

use crate::config::ConfigError;

/// Abnormal termination of an intent processor's action stream.
#[derive(Debug, Error)]
#[error(transparent)]
pub struct ProcessError(#[from] anyhow::Error);

impl ProcessError {
    /// Wrap a concrete error raised while producing actions.
    pub fn new<E>(error: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self(anyhow::Error::new(error))
    }

    /// Build an error from a plain message.
    pub fn msg<M>(message: M) -> Self
    where
        M: Display + Debug + Send + Sync + 'static,
    {
        Self(anyhow::Error::msg(message))
    }
}

/// A plugin rejected an action.
#[derive(Debug, Error)]
#[error("Plugin '{plugin}' failed: {source}")]
pub struct PluginError {
    pub plugin: String,
    #[source]
    pub source: anyhow::Error,
}

impl PluginError {
    pub fn new(plugin: impl Into<String>, source: impl Into<anyhow::Error>) -> Self {
        Self {
            plugin: plugin.into(),
            source: source.into(),
        }
    }
}

/// Errors surfaced by the container.
#[derive(Debug, Error)]
pub enum ContainerError {
    /// An intent processor's stream yielded an error
    #[error("Intent processing failed: {0}")]
    Process(#[from] ProcessError),

    /// A plugin returned an error while observing an action
    #[error(transparent)]
    Plugin(#[from] PluginError),

    /// The mapper, the producer or a plugin panicked
    #[error("Pipeline panicked: {message}")]
    Panicked { message: String },

    /// `build()` was called outside a tokio runtime without an explicit handle
    #[error("No tokio runtime available to run the container")]
    NoRuntime,

    /// Invalid container configuration
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}
