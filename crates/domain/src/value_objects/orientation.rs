//! Item orientation on the grid

use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// How an item is laid onto the grid.
///
/// `Vertical` uses the declared footprint as-is; `Horizontal` swaps width and
/// height (a 90 degree turn). No other transform exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemOrientation {
    #[default]
    Vertical,
    Horizontal,
}

impl ItemOrientation {
    /// The other orientation.
    pub fn rotated(self) -> Self {
        match self {
            Self::Vertical => Self::Horizontal,
            Self::Horizontal => Self::Vertical,
        }
    }

    /// Apply this orientation to a declared `(width, height)` pair.
    ///
    /// The swap is its own inverse, so this also recovers declared dimensions
    /// from oriented ones.
    pub fn apply(self, width: u32, height: u32) -> (u32, u32) {
        match self {
            Self::Vertical => (width, height),
            Self::Horizontal => (height, width),
        }
    }
}

impl std::fmt::Display for ItemOrientation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Vertical => write!(f, "vertical"),
            Self::Horizontal => write!(f, "horizontal"),
        }
    }
}

impl std::str::FromStr for ItemOrientation {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "vertical" => Ok(Self::Vertical),
            "horizontal" => Ok(Self::Horizontal),
            _ => Err(DomainError::parse(format!("Unknown item orientation: {}", s))),
        }
    }
}
