//! Ambersteel Domain - the inventory grid placement engine
//!
//! Pure, synchronous types: no I/O, no async, no logging. The engine crate
//! wires these into storage, use cases and pointer interaction.

extern crate self as ambersteel_domain;

pub mod aggregates;
pub mod entities;
pub mod error;
pub mod events;
pub mod ids;
pub mod value_objects;

pub use aggregates::ItemGrid;
pub use entities::{GridItem, InventoryIndex, ItemPlacement};
pub use error::DomainError;
pub use events::{AddOutcome, GridChange, SwappedItem, SyncReport};
pub use ids::{ActorId, ItemId, MAX_ID_LENGTH};
pub use value_objects::{
    GridDimensions, GridPosition, GridRect, ItemOrientation, ItemShape, OverlapHit,
    PlacementRejection, PlacementVerdict, MAX_TILE_COUNT,
};
