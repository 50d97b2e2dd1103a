//! Intent processor capability.

use futures::stream::BoxStream;

use super::action::Action;
use super::intent::UserIntent;
use crate::error::ProcessError;

/// Lazily produced sequence of actions for a single intent.
///
/// The stream may suspend between items (network calls, timers). An `Err`
/// item terminates the sequence abnormally and tears down the pipeline;
/// processors that want isolation convert their failures into actions.
pub type ActionStream<A> = BoxStream<'static, Result<A, ProcessError>>;

/// Turns an intent into a stream of actions by talking to the model layer.
///
/// Called once per submitted intent. Streams from different intents are
/// polled concurrently, so the returned stream must own everything it needs.
pub trait IntentProcessor<I: UserIntent, A: Action>: Send + Sync + 'static {
    fn process(&self, intent: I) -> ActionStream<A>;
}

impl<I, A, F> IntentProcessor<I, A> for F
where
    I: UserIntent,
    A: Action,
    F: Fn(I) -> ActionStream<A> + Send + Sync + 'static,
{
    fn process(&self, intent: I) -> ActionStream<A> {
        self(intent)
    }
}
