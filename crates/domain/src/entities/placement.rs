//! Item placement - one item positioned on the grid

use crate::ids::ItemId;
use crate::value_objects::{GridPosition, GridRect, ItemOrientation, ItemShape};

/// An item's position, declared footprint and orientation on a grid.
///
/// The occupied rectangle is `[x, x + w) x [y, y + h)` where `(w, h)` is the
/// declared shape with the orientation applied. Placements are only mutated
/// by the owning `ItemGrid`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemPlacement {
    item_id: ItemId,
    position: GridPosition,
    shape: ItemShape,
    orientation: ItemOrientation,
}

impl ItemPlacement {
    pub fn new(
        item_id: ItemId,
        position: GridPosition,
        shape: ItemShape,
        orientation: ItemOrientation,
    ) -> Self {
        Self {
            item_id,
            position,
            shape,
            orientation,
        }
    }

    pub fn item_id(&self) -> &ItemId {
        &self.item_id
    }

    pub fn position(&self) -> GridPosition {
        self.position
    }

    /// Declared (un-rotated) footprint.
    pub fn shape(&self) -> ItemShape {
        self.shape
    }

    pub fn orientation(&self) -> ItemOrientation {
        self.orientation
    }

    pub fn effective_width(&self) -> u32 {
        self.shape.oriented(self.orientation).0
    }

    pub fn effective_height(&self) -> u32 {
        self.shape.oriented(self.orientation).1
    }

    /// Cells occupied by this placement.
    pub fn rect(&self) -> GridRect {
        let (width, height) = self.shape.oriented(self.orientation);
        GridRect::at(self.position, width, height)
    }

    /// The rectangle this placement would occupy at another spot.
    pub fn rect_at(&self, position: GridPosition, orientation: ItemOrientation) -> GridRect {
        let (width, height) = self.shape.oriented(orientation);
        GridRect::at(position, width, height)
    }

    pub(crate) fn set_position(&mut self, position: GridPosition) {
        self.position = position;
    }

    pub(crate) fn set_orientation(&mut self, orientation: ItemOrientation) {
        self.orientation = orientation;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn horizontal_placement_swaps_footprint() {
        let placement = ItemPlacement::new(
            ItemId::new("sword").unwrap(),
            GridPosition::new(1, 0),
            ItemShape::new(1, 2).unwrap(),
            ItemOrientation::Horizontal,
        );
        assert_eq!(placement.effective_width(), 2);
        assert_eq!(placement.effective_height(), 1);
        assert_eq!(placement.rect(), GridRect::new(1, 0, 2, 1));
    }
}
