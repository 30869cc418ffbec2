//! Domain entities - Core business objects with identity

mod grid_item;
mod inventory_index;
mod placement;

pub use grid_item::GridItem;
pub use inventory_index::InventoryIndex;
pub use placement::ItemPlacement;
