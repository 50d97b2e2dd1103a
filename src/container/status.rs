//! Container lifecycle.
//!
//! ```text
//! Active ──(scope cancelled | pipeline failed | handles dropped)──→ Terminated
//! ```
//!
//! The transition is one-way. A terminated container keeps serving its
//! last published state but processes nothing further.

use std::sync::Arc;

use crate::error::ContainerError;

/// Why a container stopped.
#[derive(Debug, Clone)]
pub enum TerminationCause {
    /// The owning scope was cancelled.
    Cancelled,
    /// Every container handle was dropped and in-flight work drained.
    Closed,
    /// A processor, plugin, mapper or producer failed.
    Failed(Arc<ContainerError>),
}

impl TerminationCause {
    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Failed(_))
    }

    /// The error that brought the pipeline down, if any.
    pub fn error(&self) -> Option<&ContainerError> {
        match self {
            Self::Failed(err) => Some(err),
            _ => None,
        }
    }
}

/// Observable lifecycle state of a container.
#[derive(Debug, Clone)]
pub enum ContainerStatus {
    /// Pipeline subscribed and processing intents.
    Active,
    /// Pipeline released; state is frozen.
    Terminated(TerminationCause),
}

impl ContainerStatus {
    pub fn is_active(&self) -> bool {
        matches!(self, Self::Active)
    }

    pub fn is_terminated(&self) -> bool {
        matches!(self, Self::Terminated(_))
    }

    pub fn cause(&self) -> Option<&TerminationCause> {
        match self {
            Self::Terminated(cause) => Some(cause),
            Self::Active => None,
        }
    }
}
