//! Unidirectional-data-flow (MVI) state container.
//!
//! Intents go in, actions come out of an injected async processor, each
//! action is folded into an immutable view state and may produce a one-shot
//! side effect. Both are published to any number of observers.
//!
//! ```text
//! submit(intent) ─→ IntentProcessor ─→ plugins ─→ StateMapper ─→ observe_state()
//!                    (concurrent)                 EffectProducer → observe_effects()
//! ```

pub mod config;
pub mod container;
pub mod error;
pub mod logging;
pub mod mvi;
pub mod plugin;
pub mod scope;

pub use config::{ConfigError, ContainerConfig, MAX_EFFECT_BUFFER};
pub use container::{
    ContainerStatus, EffectStream, MviContainer, MviContainerBuilder, StateStream,
    TerminationCause,
};
pub use error::{ContainerError, PluginError, ProcessError};
pub use mvi::{
    Action, ActionStream, EffectProducer, IntentProcessor, SideEffect, StateMapper, UserIntent,
    ViewState,
};
pub use plugin::{MviPlugin, PluginChain, TracingPlugin};
pub use scope::Scope;
