//! State mapper capability.

use super::action::Action;
use super::state::ViewState;

/// Folds an action into the current state.
///
/// Must be synchronous and total: return the next state, or a clone of
/// `state` when the action does not change anything. It runs on the shared
/// pipeline task, so blocking here stalls every other in-flight action.
pub trait StateMapper<A: Action, S: ViewState>: Send + Sync + 'static {
    fn map_state(&self, action: &A, state: &S) -> S;
}

impl<A, S, F> StateMapper<A, S> for F
where
    A: Action,
    S: ViewState,
    F: Fn(&A, &S) -> S + Send + Sync + 'static,
{
    fn map_state(&self, action: &A, state: &S) -> S {
        self(action, state)
    }
}
