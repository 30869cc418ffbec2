//! Infrastructure implementations.
//!
//! Contains port trait implementations for external dependencies.

pub mod json_store;
pub mod ports;

pub use json_store::{ActorDocument, JsonActorStore};
