//! Publication side of the pipeline: the latest-value state slot and the
//! buffered one-shot effect channel.

use std::sync::Arc;

use futures::stream::{self, BoxStream, StreamExt};
use parking_lot::Mutex;
use tokio::sync::broadcast::error::RecvError;
use tokio::sync::{broadcast, watch};

use crate::mvi::{SideEffect, ViewState};

/// Latest-wins stream of view states.
///
/// Yields the current state on subscription, then every newly published
/// state. Slow readers skip intermediate values. Ends once the container
/// terminates.
pub type StateStream<S> = BoxStream<'static, S>;

/// Stream of one-shot effects delivered after subscription.
///
/// Ends once the container terminates and buffered effects are drained.
pub type EffectStream<E> = BoxStream<'static, E>;

pub(crate) fn state_stream<S: ViewState>(mut receiver: watch::Receiver<S>) -> StateStream<S> {
    let current = receiver.borrow_and_update().clone();
    let updates = stream::unfold(receiver, |mut receiver| async move {
        receiver.changed().await.ok()?;
        let next = receiver.borrow_and_update().clone();
        Some((next, receiver))
    });
    stream::once(async move { current }).chain(updates).boxed()
}

fn effect_stream<E: SideEffect>(receiver: broadcast::Receiver<E>) -> EffectStream<E> {
    stream::unfold(receiver, |mut receiver| async move {
        loop {
            match receiver.recv().await {
                Ok(effect) => return Some((effect, receiver)),
                Err(RecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "Effect subscriber lagged; oldest effects dropped");
                }
                Err(RecvError::Closed) => return None,
            }
        }
    })
    .boxed()
}

/// Shared handle on the effect broadcaster.
///
/// Holds the only sender. Closing the slot drops it, which ends every
/// subscriber's stream after its buffered effects are drained.
pub(crate) struct EffectSlot<E> {
    sender: Arc<Mutex<Option<broadcast::Sender<E>>>>,
}

impl<E> Clone for EffectSlot<E> {
    fn clone(&self) -> Self {
        Self {
            sender: Arc::clone(&self.sender),
        }
    }
}

impl<E: SideEffect> EffectSlot<E> {
    pub(crate) fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self {
            sender: Arc::new(Mutex::new(Some(sender))),
        }
    }

    pub(crate) fn subscribe(&self) -> EffectStream<E> {
        match self.sender.lock().as_ref() {
            Some(sender) => effect_stream(sender.subscribe()),
            None => stream::empty().boxed(),
        }
    }

    /// Deliver to every current subscriber. Never blocks.
    pub(crate) fn send(&self, effect: E) {
        if let Some(sender) = self.sender.lock().as_ref() {
            if let Err(broadcast::error::SendError(effect)) = sender.send(effect) {
                tracing::trace!(?effect, "No effect subscribers; effect discarded");
            }
        }
    }

    pub(crate) fn close(&self) {
        self.sender.lock().take();
    }
}
