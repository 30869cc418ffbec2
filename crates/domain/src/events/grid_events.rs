//! Item grid domain events
//!
//! These types communicate what happened when the grid was modified,
//! allowing callers to decide whether the layout must be persisted.

use crate::entities::ItemPlacement;
use crate::ids::ItemId;
use crate::value_objects::{GridPosition, ItemOrientation};

/// An item relocated as part of a swap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SwappedItem {
    pub item_id: ItemId,
    pub from: GridPosition,
    pub to: GridPosition,
}

/// Outcome of applying a move.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridChange {
    /// The item was dropped where it already was.
    Unchanged,
    Moved {
        item_id: ItemId,
        from: GridPosition,
        to: GridPosition,
        orientation: ItemOrientation,
        swapped: Vec<SwappedItem>,
    },
}

impl GridChange {
    pub fn is_changed(&self) -> bool {
        matches!(self, Self::Moved { .. })
    }
}

/// Outcome of adding an item to the grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddOutcome {
    Placed(ItemPlacement),
    /// No free slot in either orientation.
    InventoryFull,
}

/// Outcome of reconciling the grid with the item store.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncReport {
    /// Placements dropped, either because the item is no longer a
    /// possession or because its new shape found no room.
    pub removed: Vec<ItemId>,
    /// Items whose declared shape changed and that were laid out again.
    pub reshaped: Vec<ItemId>,
    /// Placements created for possessions that were not on the grid.
    pub added: Vec<ItemPlacement>,
    /// Possessions that found no free slot.
    pub unplaced: Vec<ItemId>,
}

impl SyncReport {
    /// True when the layout differs from before the sync.
    pub fn is_changed(&self) -> bool {
        !self.removed.is_empty() || !self.reshaped.is_empty() || !self.added.is_empty()
    }
}
