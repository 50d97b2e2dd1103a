//! Base trait for view state in MVI architecture.

use std::fmt::Debug;

/// Marker trait for view state objects.
///
/// States should be:
/// - Immutable (Clone to create new states)
/// - Self-contained (all data needed to render the view)
///
/// A container holds exactly one current state; every new state fully
/// replaces the previous one.
pub trait ViewState: Debug + Clone + Send + Sync + 'static {}
