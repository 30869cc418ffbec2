//! Port traits for infrastructure boundaries.
//!
//! These are the only abstractions in the engine. Ports exist for:
//! - The item store (possessions and capacity)
//! - Layout persistence

mod error;
mod repos;

pub use error::RepoError;
pub use repos::*;
