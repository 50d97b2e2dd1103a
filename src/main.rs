use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use futures::stream::{self, StreamExt};
use mvi_container::logging::init_tracing;
use mvi_container::{
    Action, ActionStream, ContainerConfig, IntentProcessor, MviContainer, Scope, SideEffect,
    TracingPlugin, UserIntent, ViewState,
};

/// Counter demo embedding an MVI container.
#[derive(Debug, Parser)]
#[command(name = "mvi-counter")]
struct Cli {
    /// Number of increment intents to submit.
    #[arg(long, default_value_t = 25)]
    increments: u64,

    /// Simulated processing latency per intent, in milliseconds.
    #[arg(long, default_value_t = 20)]
    delay_ms: u64,

    /// Container config file (defaults to the user config dir).
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Debug)]
enum CounterIntent {
    Increment,
}

impl UserIntent for CounterIntent {}

#[derive(Debug)]
enum CounterAction {
    Started,
    Incremented,
}

impl Action for CounterAction {}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct CounterState {
    count: u64,
    pending: u64,
}

impl ViewState for CounterState {}

#[derive(Debug, Clone, PartialEq, Eq)]
enum CounterEffect {
    Milestone(u64),
}

impl SideEffect for CounterEffect {}

type CounterContainer = MviContainer<CounterIntent, CounterAction, CounterState, CounterEffect>;

struct CounterProcessor {
    delay: Duration,
}

impl IntentProcessor<CounterIntent, CounterAction> for CounterProcessor {
    fn process(&self, intent: CounterIntent) -> ActionStream<CounterAction> {
        let delay = self.delay;
        match intent {
            CounterIntent::Increment => stream::once(async { Ok(CounterAction::Started) })
                .chain(stream::once(async move {
                    tokio::time::sleep(delay).await;
                    Ok(CounterAction::Incremented)
                }))
                .boxed(),
        }
    }
}

fn map_counter(action: &CounterAction, state: &CounterState) -> CounterState {
    match action {
        CounterAction::Started => CounterState {
            pending: state.pending + 1,
            ..state.clone()
        },
        CounterAction::Incremented => CounterState {
            count: state.count + 1,
            pending: state.pending.saturating_sub(1),
        },
    }
}

fn milestone(action: &CounterAction, state: &CounterState) -> Option<CounterEffect> {
    match action {
        CounterAction::Incremented if (state.count + 1) % 10 == 0 => {
            Some(CounterEffect::Milestone(state.count + 1))
        }
        _ => None,
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => ContainerConfig::load_from(path)?,
        None => ContainerConfig::load()?,
    };

    let scope = Scope::new();
    let container = CounterContainer::builder(
        &scope,
        CounterProcessor {
            delay: Duration::from_millis(cli.delay_ms),
        },
        map_counter,
        milestone,
        CounterState::default(),
    )
    .plugin(TracingPlugin::default())
    .config(config.named("counter"))
    .build()?;

    let mut states = container.observe_state();
    let mut effects = container.observe_effects();
    for _ in 0..cli.increments {
        container.submit(CounterIntent::Increment);
    }

    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    loop {
        tokio::select! {
            _ = &mut ctrl_c, if !scope.is_cancelled() => scope.cancel(),
            Some(state) = states.next() => {
                println!("state: count={} pending={}", state.count, state.pending);
                if state.count == cli.increments && state.pending == 0 {
                    scope.cancel();
                }
            }
            Some(effect) = effects.next() => match effect {
                CounterEffect::Milestone(count) => println!("effect: reached {count}"),
            },
            else => break,
        }
    }

    let cause = container.terminated().await;
    tracing::info!(?cause, "Counter finished");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn started_marks_intent_pending() {
        let state = map_counter(&CounterAction::Started, &CounterState::default());
        assert_eq!(state, CounterState { count: 0, pending: 1 });
    }

    #[test]
    fn incremented_settles_pending() {
        let state = map_counter(
            &CounterAction::Incremented,
            &CounterState { count: 4, pending: 2 },
        );
        assert_eq!(state, CounterState { count: 5, pending: 1 });
    }

    #[test]
    fn milestone_fires_on_every_tenth_increment() {
        let before = CounterState { count: 9, pending: 1 };
        assert_eq!(
            milestone(&CounterAction::Incremented, &before),
            Some(CounterEffect::Milestone(10))
        );
        assert_eq!(milestone(&CounterAction::Started, &before), None);
        assert_eq!(
            milestone(&CounterAction::Incremented, &CounterState::default()),
            None
        );
    }

    #[test]
    fn cli_defaults() {
        let cli = Cli::parse_from(["mvi-counter"]);
        assert_eq!(cli.increments, 25);
        assert_eq!(cli.delay_ms, 20);
        assert!(cli.config.is_none());
    }
}
