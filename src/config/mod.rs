//! Container configuration.
//!
//! Hosts either build a [`ContainerConfig`] in code or load it from a TOML
//! file; every field has a default so an empty file is valid.

mod loader;
mod types;

pub use loader::ConfigError;
pub use types::{ContainerConfig, DEFAULT_EFFECT_BUFFER, MAX_EFFECT_BUFFER};
