//! The MVI container.
//!
//! [`MviContainer`] wires the injected capabilities into a single pipeline
//! task and exposes the three operations a view layer needs: submit an
//! intent, observe the state, observe the effects.

mod outlets;
mod pipeline;
mod status;

use std::marker::PhantomData;
use std::sync::Arc;

use tokio::runtime::Handle;
use tokio::sync::{mpsc, watch};
use tracing::Instrument;
use uuid::Uuid;

use crate::config::ContainerConfig;
use crate::error::ContainerError;
use crate::mvi::{
    Action, EffectProducer, IntentProcessor, SideEffect, StateMapper, UserIntent, ViewState,
};
use crate::plugin::{MviPlugin, PluginChain};
use crate::scope::Scope;

use outlets::{state_stream, EffectSlot};
use pipeline::Pipeline;

pub use outlets::{EffectStream, StateStream};
pub use status::{ContainerStatus, TerminationCause};

/// Handle on a running container.
///
/// Cheap to clone; all clones drive the same pipeline. The container
/// terminates when its scope is cancelled, when the pipeline fails, or when
/// the last handle is dropped and in-flight work has drained.
pub struct MviContainer<I, A, S, E>
where
    I: UserIntent,
    A: Action,
    S: ViewState,
    E: SideEffect,
{
    id: Uuid,
    name: Arc<str>,
    intents: mpsc::UnboundedSender<I>,
    state: watch::Receiver<S>,
    effects: EffectSlot<E>,
    status: watch::Receiver<ContainerStatus>,
    _action: PhantomData<fn() -> A>,
}

impl<I, A, S, E> MviContainer<I, A, S, E>
where
    I: UserIntent,
    A: Action,
    S: ViewState,
    E: SideEffect,
{
    /// Start configuring a container bound to `scope`.
    pub fn builder(
        scope: &Scope,
        processor: impl IntentProcessor<I, A>,
        mapper: impl StateMapper<A, S>,
        producer: impl EffectProducer<A, S, E>,
        initial_state: S,
    ) -> MviContainerBuilder<I, A, S, E> {
        MviContainerBuilder {
            scope: scope.clone(),
            processor: Arc::new(processor),
            mapper: Arc::new(mapper),
            producer: Arc::new(producer),
            initial_state,
            plugins: Vec::new(),
            runtime: None,
            config: ContainerConfig::default(),
        }
    }

    /// Fire-and-forget intent submission.
    ///
    /// Never blocks and never fails. Intents submitted after termination
    /// are dropped.
    pub fn submit(&self, intent: I) {
        if let Err(mpsc::error::SendError(intent)) = self.intents.send(intent) {
            tracing::trace!(container = %self.id, ?intent, "Container terminated; intent dropped");
        }
    }

    /// The latest published state.
    pub fn current_state(&self) -> S {
        self.state.borrow().clone()
    }

    /// Stream of states, starting with the current one.
    pub fn observe_state(&self) -> StateStream<S> {
        state_stream(self.state.clone())
    }

    /// Stream of effects produced from now on.
    pub fn observe_effects(&self) -> EffectStream<E> {
        self.effects.subscribe()
    }

    /// Lifecycle status right now.
    pub fn status(&self) -> ContainerStatus {
        self.status.borrow().clone()
    }

    /// Watch receiver that sees every status change.
    pub fn observe_status(&self) -> watch::Receiver<ContainerStatus> {
        self.status.clone()
    }

    /// Whether the pipeline is still running.
    pub fn is_active(&self) -> bool {
        self.status.borrow().is_active()
    }

    /// Wait for the container to terminate.
    pub async fn terminated(&self) -> TerminationCause {
        let mut status = self.status.clone();
        let terminal = status
            .wait_for(ContainerStatus::is_terminated)
            .await
            .map(|current| (*current).clone());
        match terminal {
            Ok(ContainerStatus::Terminated(cause)) => cause,
            _ => TerminationCause::Cancelled,
        }
    }

    /// Per-instance id, also recorded on the pipeline's log span.
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Configured name of this container.
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl<I, A, S, E> Clone for MviContainer<I, A, S, E>
where
    I: UserIntent,
    A: Action,
    S: ViewState,
    E: SideEffect,
{
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            name: Arc::clone(&self.name),
            intents: self.intents.clone(),
            state: self.state.clone(),
            effects: self.effects.clone(),
            status: self.status.clone(),
            _action: PhantomData,
        }
    }
}

/// Configures and starts an [`MviContainer`].
pub struct MviContainerBuilder<I, A, S, E>
where
    I: UserIntent,
    A: Action,
    S: ViewState,
    E: SideEffect,
{
    scope: Scope,
    processor: Arc<dyn IntentProcessor<I, A>>,
    mapper: Arc<dyn StateMapper<A, S>>,
    producer: Arc<dyn EffectProducer<A, S, E>>,
    initial_state: S,
    plugins: Vec<Arc<dyn MviPlugin<A>>>,
    runtime: Option<Handle>,
    config: ContainerConfig,
}

impl<I, A, S, E> MviContainerBuilder<I, A, S, E>
where
    I: UserIntent,
    A: Action,
    S: ViewState,
    E: SideEffect,
{
    /// Append a plugin to the observer chain.
    pub fn plugin(mut self, plugin: impl MviPlugin<A>) -> Self {
        self.plugins.push(Arc::new(plugin));
        self
    }

    /// Append several plugins, keeping their order.
    pub fn plugins(mut self, plugins: impl IntoIterator<Item = Arc<dyn MviPlugin<A>>>) -> Self {
        self.plugins.extend(plugins);
        self
    }

    /// Run the pipeline on this runtime instead of the ambient one.
    pub fn runtime(mut self, handle: Handle) -> Self {
        self.runtime = Some(handle);
        self
    }

    /// Replace the default config; it is validated in [`build`](Self::build).
    pub fn config(mut self, config: ContainerConfig) -> Self {
        self.config = config;
        self
    }

    /// Spawn the pipeline and return the container handle.
    ///
    /// # Errors
    /// Returns error if the config is invalid, or if no runtime handle was
    /// given and the caller is not inside a tokio runtime.
    pub fn build(self) -> Result<MviContainer<I, A, S, E>, ContainerError> {
        self.config.validate()?;
        let runtime = match self.runtime {
            Some(handle) => handle,
            None => Handle::try_current().map_err(|_| ContainerError::NoRuntime)?,
        };

        let id = Uuid::new_v4();
        let (intent_tx, intent_rx) = mpsc::unbounded_channel();
        let (state_tx, state_rx) = watch::channel(self.initial_state);
        let (status_tx, status_rx) = watch::channel(ContainerStatus::Active);
        let effects = EffectSlot::new(self.config.effect_buffer);

        let pipeline = Pipeline {
            scope: self.scope,
            processor: self.processor,
            mapper: self.mapper,
            producer: self.producer,
            plugins: PluginChain::new(self.plugins),
            state: state_tx,
            effects: effects.clone(),
            log_transitions: self.config.log_transitions,
        };

        let span = tracing::info_span!("mvi_container", id = %id, name = %self.config.name);
        runtime.spawn(pipeline.run(intent_rx, status_tx).instrument(span));

        Ok(MviContainer {
            id,
            name: Arc::from(self.config.name),
            intents: intent_tx,
            state: state_rx,
            effects,
            status: status_rx,
            _action: PhantomData,
        })
    }
}
