//! Shared fixtures: a scripted processor and recording capabilities.

#![allow(dead_code, unused_imports)]

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use futures::stream::{self, StreamExt};
use mvi_container::{
    Action, ActionStream, ContainerConfig, ContainerStatus, EffectProducer, IntentProcessor,
    MviContainer, MviPlugin, PluginError, ProcessError, Scope, SideEffect, StateMapper,
    TerminationCause, UserIntent, ViewState,
};
use parking_lot::Mutex;

pub const WAIT: Duration = Duration::from_secs(2);

#[derive(Debug)]
pub enum TestIntent {
    /// Emit these actions immediately, in order.
    Emit(Vec<u32>),
    /// Sleep before each action.
    Delayed { values: Vec<u32>, delay_ms: u64 },
    /// Yield one action, then fail the stream.
    FailAfter(u32),
    /// Never produce anything; raises the flag when the stream is dropped.
    Hang(Arc<AtomicBool>),
}

impl UserIntent for TestIntent {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TestAction(pub u32);

impl Action for TestAction {}

/// Records every action folded into it, in fold order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TestState {
    pub applied: Vec<u32>,
}

impl ViewState for TestState {}

impl TestState {
    pub fn with(values: &[u32]) -> Self {
        Self {
            applied: values.to_vec(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestEffect(pub u32);

impl SideEffect for TestEffect {}

pub type TestContainer = MviContainer<TestIntent, TestAction, TestState, TestEffect>;

/// Shared call log: "plugin-name:1", "map:1", "produce:1", ...
pub type Journal = Arc<Mutex<Vec<String>>>;

struct DropFlag(Arc<AtomicBool>);

impl Drop for DropFlag {
    fn drop(&mut self) {
        self.0.store(true, Ordering::SeqCst);
    }
}

pub struct ScriptedProcessor {
    received: Arc<Mutex<Vec<String>>>,
}

impl IntentProcessor<TestIntent, TestAction> for ScriptedProcessor {
    fn process(&self, intent: TestIntent) -> ActionStream<TestAction> {
        self.received.lock().push(format!("{:?}", intent));
        match intent {
            TestIntent::Emit(values) => {
                stream::iter(values.into_iter().map(|v| Ok(TestAction(v)))).boxed()
            }
            TestIntent::Delayed { values, delay_ms } => stream::iter(values)
                .then(move |v| async move {
                    tokio::time::sleep(Duration::from_millis(delay_ms)).await;
                    Ok(TestAction(v))
                })
                .boxed(),
            TestIntent::FailAfter(value) => stream::iter(vec![
                Ok(TestAction(value)),
                Err(ProcessError::msg("processor failed")),
            ])
            .boxed(),
            TestIntent::Hang(flag) => stream::unfold(DropFlag(flag), |guard| async move {
                futures::future::pending::<()>().await;
                Some((Ok(TestAction(0)), guard))
            })
            .boxed(),
        }
    }
}

pub struct RecordingMapper {
    journal: Journal,
    seen: Arc<Mutex<Vec<(u32, TestState)>>>,
    panic_on: Option<u32>,
}

impl StateMapper<TestAction, TestState> for RecordingMapper {
    fn map_state(&self, action: &TestAction, state: &TestState) -> TestState {
        self.journal.lock().push(format!("map:{}", action.0));
        self.seen.lock().push((action.0, state.clone()));
        if self.panic_on == Some(action.0) {
            panic!("mapper rejected {}", action.0);
        }
        let mut next = state.clone();
        next.applied.push(action.0);
        next
    }
}

pub struct RecordingProducer {
    journal: Journal,
    seen: Arc<Mutex<Vec<(u32, TestState)>>>,
    effect_when: fn(u32) -> bool,
}

impl EffectProducer<TestAction, TestState, TestEffect> for RecordingProducer {
    fn produce(&self, action: &TestAction, state: &TestState) -> Option<TestEffect> {
        self.journal.lock().push(format!("produce:{}", action.0));
        self.seen.lock().push((action.0, state.clone()));
        (self.effect_when)(action.0).then_some(TestEffect(action.0))
    }
}

pub struct RecordingPlugin {
    name: &'static str,
    journal: Journal,
    fail_on: Option<u32>,
}

impl MviPlugin<TestAction> for RecordingPlugin {
    fn name(&self) -> &str {
        self.name
    }

    fn on_action(&self, action: &TestAction) -> Result<(), PluginError> {
        self.journal.lock().push(format!("{}:{}", self.name, action.0));
        if self.fail_on == Some(action.0) {
            return Err(PluginError::new(
                self.name,
                anyhow::anyhow!("refused action {}", action.0),
            ));
        }
        Ok(())
    }
}

pub fn never(_: u32) -> bool {
    false
}

pub fn always(_: u32) -> bool {
    true
}

/// Recorders shared between the fixture's capabilities and the test body.
#[derive(Default)]
pub struct Fixture {
    pub journal: Journal,
    pub received: Arc<Mutex<Vec<String>>>,
    pub mapper_seen: Arc<Mutex<Vec<(u32, TestState)>>>,
    pub producer_seen: Arc<Mutex<Vec<(u32, TestState)>>>,
}

impl Fixture {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn processor(&self) -> ScriptedProcessor {
        ScriptedProcessor {
            received: Arc::clone(&self.received),
        }
    }

    pub fn mapper(&self) -> RecordingMapper {
        RecordingMapper {
            journal: Arc::clone(&self.journal),
            seen: Arc::clone(&self.mapper_seen),
            panic_on: None,
        }
    }

    pub fn panicking_mapper(&self, value: u32) -> RecordingMapper {
        RecordingMapper {
            panic_on: Some(value),
            ..self.mapper()
        }
    }

    pub fn producer(&self, effect_when: fn(u32) -> bool) -> RecordingProducer {
        RecordingProducer {
            journal: Arc::clone(&self.journal),
            seen: Arc::clone(&self.producer_seen),
            effect_when,
        }
    }

    pub fn plugin(&self, name: &'static str) -> RecordingPlugin {
        RecordingPlugin {
            name,
            journal: Arc::clone(&self.journal),
            fail_on: None,
        }
    }

    pub fn failing_plugin(&self, name: &'static str, value: u32) -> RecordingPlugin {
        RecordingPlugin {
            fail_on: Some(value),
            ..self.plugin(name)
        }
    }

    /// Container with no plugins and the given effect rule.
    pub fn container(&self, scope: &Scope, effect_when: fn(u32) -> bool) -> TestContainer {
        TestContainer::builder(
            scope,
            self.processor(),
            self.mapper(),
            self.producer(effect_when),
            TestState::default(),
        )
        .build()
        .expect("container should build inside a runtime")
    }

    pub fn journal(&self) -> Vec<String> {
        self.journal.lock().clone()
    }
}

/// Wait until the published state satisfies `predicate`.
pub async fn settle<F>(container: &TestContainer, mut predicate: F) -> TestState
where
    F: FnMut(&TestState) -> bool,
{
    let mut states = container.observe_state();
    tokio::time::timeout(WAIT, async {
        while let Some(state) = states.next().await {
            if predicate(&state) {
                return state;
            }
        }
        panic!("state stream ended before predicate matched");
    })
    .await
    .expect("timed out waiting for state")
}

pub async fn termination(container: &TestContainer) -> TerminationCause {
    tokio::time::timeout(WAIT, container.terminated())
        .await
        .expect("timed out waiting for termination")
}
