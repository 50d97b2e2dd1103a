//! Base trait for one-shot side effects.

use std::fmt::Debug;

/// Marker trait for side effects.
///
/// A side effect (show a toast, play a sound) is delivered to the listeners
/// present when it is produced and then discarded. It is never stored in
/// state and never replayed to late subscribers.
pub trait SideEffect: Debug + Clone + Send + Sync + 'static {}
