//! Inventory index - the persisted layout record
//!
//! One record per item on the grid. The whole list is written back on every
//! change; the store never patches individual entries.
//!
//! ```json
//! { "id": "Ab3", "x": 2, "y": 0, "w": 2, "h": 1, "orientation": "horizontal" }
//! ```
//!
//! `w`/`h` are the dimensions as laid out, i.e. with the orientation already
//! applied. The declared shape is recovered by undoing the swap.

use serde::{Deserialize, Serialize};

use super::ItemPlacement;
use crate::error::DomainError;
use crate::ids::ItemId;
use crate::value_objects::{GridPosition, ItemOrientation, ItemShape};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryIndex {
    pub id: ItemId,
    pub x: u32,
    pub y: u32,
    #[serde(alias = "width")]
    pub w: u32,
    #[serde(alias = "height")]
    pub h: u32,
    /// Layouts written before rotation existed carry no orientation.
    #[serde(default)]
    pub orientation: ItemOrientation,
}

impl InventoryIndex {
    pub fn position(&self) -> GridPosition {
        GridPosition::new(self.x, self.y)
    }
}

impl From<&ItemPlacement> for InventoryIndex {
    fn from(placement: &ItemPlacement) -> Self {
        let position = placement.position();
        Self {
            id: placement.item_id().clone(),
            x: position.x,
            y: position.y,
            w: placement.effective_width(),
            h: placement.effective_height(),
            orientation: placement.orientation(),
        }
    }
}

impl TryFrom<InventoryIndex> for ItemPlacement {
    type Error = DomainError;

    fn try_from(index: InventoryIndex) -> Result<Self, Self::Error> {
        let shape = ItemShape::from_oriented(index.w, index.h, index.orientation)?;
        Ok(ItemPlacement::new(
            index.id,
            GridPosition::new(index.x, index.y),
            shape,
            index.orientation,
        ))
    }
}
