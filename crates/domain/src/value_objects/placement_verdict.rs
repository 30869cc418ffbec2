//! Results of placement queries against an item grid

use serde::{Deserialize, Serialize};

use crate::entities::ItemPlacement;
use crate::ids::ItemId;

/// Why a proposed move cannot be applied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "kind")]
pub enum PlacementRejection {
    /// The target rectangle leaves the grid.
    OutOfBounds,
    /// An item only partly inside the target; a swap cannot resolve it.
    PartialOverlap { item_id: ItemId },
    /// A swap candidate would land outside the grid or on another item once
    /// moved into the vacated space.
    SwapBlocked { item_id: ItemId },
    /// The target cells are taken and the operation does not swap.
    Occupied { item_id: ItemId },
}

impl std::fmt::Display for PlacementRejection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::OutOfBounds => write!(f, "target exceeds the grid"),
            Self::PartialOverlap { item_id } => {
                write!(f, "target partially overlaps item {}", item_id)
            }
            Self::SwapBlocked { item_id } => {
                write!(f, "item {} cannot be swapped into the vacated space", item_id)
            }
            Self::Occupied { item_id } => write!(f, "target is occupied by item {}", item_id),
        }
    }
}

/// An existing placement intersecting a queried rectangle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverlapHit {
    pub placement: ItemPlacement,
    /// `false` when the placement lies fully inside the queried rectangle.
    pub is_partial: bool,
}

/// Answer to "can this item go there?".
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlacementVerdict {
    /// Target equals the current position and orientation.
    Unchanged,
    /// The move is valid. Candidates (possibly none) are swapped into the
    /// space the moved item leaves behind.
    Allowed { swap_candidates: Vec<ItemPlacement> },
    Rejected(PlacementRejection),
}

impl PlacementVerdict {
    pub fn is_allowed(&self) -> bool {
        !matches!(self, Self::Rejected(_))
    }

    pub fn swap_candidates(&self) -> &[ItemPlacement] {
        match self {
            Self::Allowed { swap_candidates } => swap_candidates,
            _ => &[],
        }
    }
}
