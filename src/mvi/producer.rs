//! Effect producer capability.

use super::action::Action;
use super::effect::SideEffect;
use super::state::ViewState;

/// Derives an optional one-shot effect from an action.
///
/// Receives the same pre-fold state snapshot as the
/// [`StateMapper`](super::StateMapper), never the state the mapper is
/// about to produce.
pub trait EffectProducer<A: Action, S: ViewState, E: SideEffect>: Send + Sync + 'static {
    fn produce(&self, action: &A, state: &S) -> Option<E>;
}

impl<A, S, E, F> EffectProducer<A, S, E> for F
where
    A: Action,
    S: ViewState,
    E: SideEffect,
    F: Fn(&A, &S) -> Option<E> + Send + Sync + 'static,
{
    fn produce(&self, action: &A, state: &S) -> Option<E> {
        self(action, state)
    }
}
