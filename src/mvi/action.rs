//! Base trait for actions produced while processing an intent.

use std::fmt::Debug;

/// Marker trait for action objects.
///
/// An action carries whatever the processing step decided is relevant to
/// the next state and effect. Plugins, the state mapper and the effect
/// producer all receive it by reference.
pub trait Action: Debug + Send + Sync + 'static {}
