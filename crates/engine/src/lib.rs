//! Ambersteel Engine library.
//!
//! Application layer around the inventory grid aggregate.
//!
//! ## Structure
//!
//! - `config` - Environment configuration
//! - `infrastructure/` - Port traits and the JSON file store
//! - `use_cases/` - Load, move, take, remove and synchronize
//! - `interaction/` - Pointer and key handling for a grid view

pub mod config;
pub mod infrastructure;
pub mod interaction;
pub mod use_cases;

pub use config::{ConfigError, EngineConfig};
pub use use_cases::InventoryGridUseCases;
