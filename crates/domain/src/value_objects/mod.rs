//! Value objects - Immutable objects defined by their attributes

mod grid_geometry;
mod orientation;
mod placement_verdict;
mod shape;

pub use grid_geometry::{GridDimensions, GridPosition, GridRect, MAX_TILE_COUNT};
pub use orientation::ItemOrientation;
pub use placement_verdict::{OverlapHit, PlacementRejection, PlacementVerdict};
pub use shape::ItemShape;
