//! Base trait for intents (user/system requests) in MVI architecture.

use std::fmt::Debug;

/// Marker trait for intent objects.
///
/// Intents represent:
/// - User actions (button clicks, key presses)
/// - System events (API responses, timers)
///
/// Intents are handed to an [`IntentProcessor`](super::IntentProcessor)
/// which turns each one into zero or more actions.
pub trait UserIntent: Debug + Send + 'static {}
