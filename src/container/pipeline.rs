//! Intent → action → state/effect pipeline.
//!
//! One task per container owns the pipeline. Intents are fanned out to the
//! processor and every resulting action stream joins a single fan-in set;
//! whichever stream has an action ready is folded next. Folding itself is
//! strictly sequential: notify plugins, map state, derive effect, publish.

use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use futures::stream::SelectAll;
use futures::{FutureExt, StreamExt};
use tokio::sync::{mpsc, watch};

use super::outlets::EffectSlot;
use super::status::{ContainerStatus, TerminationCause};
use crate::error::ContainerError;
use crate::mvi::{
    Action, ActionStream, EffectProducer, IntentProcessor, SideEffect, StateMapper, UserIntent,
    ViewState,
};
use crate::plugin::PluginChain;
use crate::scope::Scope;

pub(crate) struct Pipeline<I, A, S, E>
where
    I: UserIntent,
    A: Action,
    S: ViewState,
    E: SideEffect,
{
    pub(crate) scope: Scope,
    pub(crate) processor: Arc<dyn IntentProcessor<I, A>>,
    pub(crate) mapper: Arc<dyn StateMapper<A, S>>,
    pub(crate) producer: Arc<dyn EffectProducer<A, S, E>>,
    pub(crate) plugins: PluginChain<A>,
    pub(crate) state: watch::Sender<S>,
    pub(crate) effects: EffectSlot<E>,
    pub(crate) log_transitions: bool,
}

impl<I, A, S, E> Pipeline<I, A, S, E>
where
    I: UserIntent,
    A: Action,
    S: ViewState,
    E: SideEffect,
{
    /// Run until cancelled, failed or drained, then release every outlet.
    ///
    /// The effect slot is closed and the terminal status published even if
    /// the task is dropped mid-flight (runtime shutdown).
    pub(crate) async fn run(
        self,
        intents: mpsc::UnboundedReceiver<I>,
        status: watch::Sender<ContainerStatus>,
    ) {
        let mut teardown = scopeguard::guard(
            (self.effects.clone(), status, None::<TerminationCause>),
            |(effects, status, cause)| {
                effects.close();
                status.send_replace(ContainerStatus::Terminated(
                    cause.unwrap_or(TerminationCause::Cancelled),
                ));
            },
        );

        let cause = match AssertUnwindSafe(self.drive(intents)).catch_unwind().await {
            Ok(Ok(cause)) => cause,
            Ok(Err(err)) => TerminationCause::Failed(Arc::new(err)),
            Err(panic) => TerminationCause::Failed(Arc::new(ContainerError::Panicked {
                message: panic_message(&*panic),
            })),
        };

        match &cause {
            TerminationCause::Failed(err) => tracing::error!(error = %err, "Pipeline failed"),
            TerminationCause::Cancelled => tracing::info!("Scope cancelled; container terminated"),
            TerminationCause::Closed => tracing::info!("All handles dropped; container closed"),
        }
        teardown.2 = Some(cause);
    }

    async fn drive(
        self,
        mut intents: mpsc::UnboundedReceiver<I>,
    ) -> Result<TerminationCause, ContainerError> {
        let mut in_flight: SelectAll<ActionStream<A>> = SelectAll::new();
        let mut accepting = true;
        tracing::debug!(plugins = self.plugins.len(), "Pipeline started");

        loop {
            if !accepting && in_flight.is_empty() {
                return Ok(TerminationCause::Closed);
            }

            tokio::select! {
                biased;

                _ = self.scope.cancelled() => return Ok(TerminationCause::Cancelled),

                intent = intents.recv(), if accepting => match intent {
                    Some(intent) => {
                        tracing::debug!(?intent, "Start processing intent");
                        in_flight.push(self.processor.process(intent));
                    }
                    None => {
                        tracing::debug!(in_flight = in_flight.len(), "Ingestion closed; draining");
                        accepting = false;
                    }
                },

                // `None` means the last stream just finished; loop back so the
                // drain check above can see the empty set.
                next = in_flight.next(), if !in_flight.is_empty() => match next {
                    Some(action) => {
                        if self.scope.is_cancelled() {
                            return Ok(TerminationCause::Cancelled);
                        }
                        self.fold(action?)?;
                    }
                    None => continue,
                },
            }
        }
    }

    fn fold(&self, action: A) -> Result<(), ContainerError> {
        self.plugins.notify(&action)?;

        let current = self.state.borrow().clone();
        let next = self.mapper.map_state(&action, &current);
        let effect = self.producer.produce(&action, &current);

        if self.log_transitions {
            tracing::trace!(?action, state = ?next, ?effect, "Produced");
        }

        self.state.send_replace(next);
        if let Some(effect) = effect {
            self.effects.send(effect);
        }
        Ok(())
    }
}

fn panic_message(panic: &(dyn Any + Send)) -> String {
    if let Some(message) = panic.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = panic.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic".to_string()
    }
}
