//! Domain Events
//!
//! Return types from aggregate mutations, communicating what happened when
//! state was modified. They carry no persistence concerns of their own.

pub mod grid_events;

pub use grid_events::*;
