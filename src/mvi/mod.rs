//! Model-View-Intent (MVI) architecture primitives.
//!
//! This module provides the role markers and the injected capabilities
//! that the [`MviContainer`](crate::container::MviContainer) wires together.
//!
//! # Architecture
//!
//! ```text
//! Intent ──→ IntentProcessor ──→ Action* ──┬─→ StateMapper ───→ ViewState ──→ View
//!    ↑                                     └─→ EffectProducer → SideEffect ─→ View
//!    └──────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! - **UserIntent**: User actions or system events submitted to the container
//! - **Action**: Intermediate result of processing one intent
//! - **ViewState**: Immutable snapshot of everything the view renders
//! - **SideEffect**: One-shot instruction delivered to current listeners only

mod action;
mod effect;
mod intent;
mod mapper;
mod processor;
mod producer;
mod state;

pub use action::Action;
pub use effect::SideEffect;
pub use intent::UserIntent;
pub use mapper::StateMapper;
pub use processor::{ActionStream, IntentProcessor};
pub use producer::EffectProducer;
pub use state::ViewState;
