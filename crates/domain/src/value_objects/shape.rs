//! Declared item footprint

use serde::{Deserialize, Serialize};

use super::ItemOrientation;
use crate::error::DomainError;

/// The intrinsic, un-rotated footprint of an item in grid cells.
///
/// # Invariants
///
/// - `width >= 1` and `height >= 1`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "ItemShapeData", into = "ItemShapeData")]
pub struct ItemShape {
    width: u32,
    height: u32,
}

impl ItemShape {
    /// Create a validated shape.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if either dimension is zero.
    pub fn new(width: u32, height: u32) -> Result<Self, DomainError> {
        if width == 0 || height == 0 {
            return Err(DomainError::validation(format!(
                "Item shape must be at least 1x1, got {}x{}",
                width, height
            )));
        }
        Ok(Self { width, height })
    }

    /// A single-cell item.
    pub fn unit() -> Self {
        Self {
            width: 1,
            height: 1,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Effective `(width, height)` when laid out with `orientation`.
    pub fn oriented(&self, orientation: ItemOrientation) -> (u32, u32) {
        orientation.apply(self.width, self.height)
    }

    /// Recover a declared shape from persisted, already-oriented dimensions.
    pub fn from_oriented(
        width: u32,
        height: u32,
        orientation: ItemOrientation,
    ) -> Result<Self, DomainError> {
        let (base_width, base_height) = orientation.apply(width, height);
        Self::new(base_width, base_height)
    }
}

impl Default for ItemShape {
    fn default() -> Self {
        Self::unit()
    }
}

impl std::fmt::Display for ItemShape {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Wire form of [`ItemShape`], validated on the way in.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
struct ItemShapeData {
    width: u32,
    height: u32,
}

impl TryFrom<ItemShapeData> for ItemShape {
    type Error = DomainError;

    fn try_from(data: ItemShapeData) -> Result<Self, Self::Error> {
        Self::new(data.width, data.height)
    }
}

impl From<ItemShape> for ItemShapeData {
    fn from(shape: ItemShape) -> Self {
        Self {
            width: shape.width,
            height: shape.height,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_dimension_is_rejected() {
        assert!(ItemShape::new(0, 2).is_err());
        assert!(ItemShape::new(2, 0).is_err());
        assert!(ItemShape::new(1, 1).is_ok());
    }

    #[test]
    fn oriented_swaps_for_horizontal() {
        let shape = ItemShape::new(1, 2).unwrap();
        assert_eq!(shape.oriented(ItemOrientation::Vertical), (1, 2));
        assert_eq!(shape.oriented(ItemOrientation::Horizontal), (2, 1));
    }

    #[test]
    fn from_oriented_inverts_the_swap() {
        let shape = ItemShape::from_oriented(2, 1, ItemOrientation::Horizontal).unwrap();
        assert_eq!(shape, ItemShape::new(1, 2).unwrap());
    }

    #[test]
    fn deserialize_validates() {
        let shape: ItemShape = serde_json::from_str(r#"{"width":2,"height":3}"#).unwrap();
        assert_eq!((shape.width(), shape.height()), (2, 3));
        assert!(serde_json::from_str::<ItemShape>(r#"{"width":0,"height":3}"#).is_err());
    }
}
