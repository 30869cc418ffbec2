//! Grid coordinates, rectangles and capacity

use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Upper bound on grid capacity and on column count. The occupancy table
/// holds `column_count * row_count` cells, which stays below twice this.
pub const MAX_TILE_COUNT: u32 = 1 << 16;

/// A 0-based cell coordinate (column `x`, row `y`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct GridPosition {
    pub x: u32,
    pub y: u32,
}

impl GridPosition {
    pub fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }

    /// Offset by a signed delta. `None` when the result leaves the `u32` range.
    pub fn offset(self, dx: i64, dy: i64) -> Option<Self> {
        let x = u32::try_from(i64::from(self.x) + dx).ok()?;
        let y = u32::try_from(i64::from(self.y) + dy).ok()?;
        Some(Self { x, y })
    }

    /// Signed delta from `origin` to `self`.
    pub fn delta_from(self, origin: GridPosition) -> (i64, i64) {
        (
            i64::from(self.x) - i64::from(origin.x),
            i64::from(self.y) - i64::from(origin.y),
        )
    }
}

impl std::fmt::Display for GridPosition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// A rectangle of grid cells: `[x, x + width) x [y, y + height)`.
///
/// Ends are computed in `u64` so rectangles near `u32::MAX` never overflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GridRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl GridRect {
    pub fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn at(position: GridPosition, width: u32, height: u32) -> Self {
        Self::new(position.x, position.y, width, height)
    }

    /// Exclusive right edge.
    pub fn right(&self) -> u64 {
        u64::from(self.x) + u64::from(self.width)
    }

    /// Exclusive bottom edge.
    pub fn bottom(&self) -> u64 {
        u64::from(self.y) + u64::from(self.height)
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// True when both rectangles share at least one cell.
    pub fn intersects(&self, other: &GridRect) -> bool {
        if self.is_empty() || other.is_empty() {
            return false;
        }
        u64::from(self.x) < other.right()
            && u64::from(other.x) < self.right()
            && u64::from(self.y) < other.bottom()
            && u64::from(other.y) < self.bottom()
    }

    /// True when every cell of `other` lies inside `self`.
    pub fn contains_rect(&self, other: &GridRect) -> bool {
        other.x >= self.x
            && other.y >= self.y
            && other.right() <= self.right()
            && other.bottom() <= self.bottom()
    }

    /// Every cell of the rectangle in row-major order.
    ///
    /// Only call this on rectangles already known to be in bounds.
    pub fn cells(&self) -> impl Iterator<Item = (u32, u32)> + '_ {
        let rect = *self;
        (0..rect.height).flat_map(move |dy| (0..rect.width).map(move |dx| (rect.x + dx, rect.y + dy)))
    }
}

impl std::fmt::Display for GridRect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}x{} at ({}, {})",
            self.width, self.height, self.x, self.y
        )
    }
}

/// Capacity of an item grid.
///
/// The grid has a fixed number of columns; rows follow from the total tile
/// count. When `tile_count` is not a multiple of `column_count` the last row
/// is only partially present: tiles fill rows left to right, so the leftmost
/// `tile_count % column_count` columns are one row taller than the rest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GridDimensions {
    column_count: u32,
    tile_count: u32,
}

impl GridDimensions {
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if `column_count` is zero, or if
    /// `column_count` or `tile_count` exceeds [`MAX_TILE_COUNT`].
    pub fn new(column_count: u32, tile_count: u32) -> Result<Self, DomainError> {
        if column_count == 0 {
            return Err(DomainError::validation("Grid must have at least one column"));
        }
        if column_count > MAX_TILE_COUNT {
            return Err(DomainError::validation(format!(
                "Grid cannot have more than {} columns",
                MAX_TILE_COUNT
            )));
        }
        if tile_count > MAX_TILE_COUNT {
            return Err(DomainError::validation(format!(
                "Grid capacity cannot exceed {} tiles",
                MAX_TILE_COUNT
            )));
        }
        Ok(Self {
            column_count,
            tile_count,
        })
    }

    pub fn column_count(&self) -> u32 {
        self.column_count
    }

    pub fn tile_count(&self) -> u32 {
        self.tile_count
    }

    /// `ceil(tile_count / column_count)`
    pub fn row_count(&self) -> u32 {
        self.tile_count.div_ceil(self.column_count)
    }

    /// Number of rows present in `column`; zero for columns past the grid.
    pub fn rows_in_column(&self, column: u32) -> u32 {
        if column >= self.column_count {
            return 0;
        }
        let full_rows = self.tile_count / self.column_count;
        if column < self.tile_count % self.column_count {
            full_rows + 1
        } else {
            full_rows
        }
    }

    pub fn contains_cell(&self, x: u32, y: u32) -> bool {
        y < self.rows_in_column(x)
    }

    /// True when every column touched by `rect` exists and is tall enough.
    pub fn contains_rect(&self, rect: &GridRect) -> bool {
        if rect.is_empty() || rect.right() > u64::from(self.column_count) {
            return false;
        }
        (rect.x..rect.x + rect.width)
            .all(|column| rect.bottom() <= u64::from(self.rows_in_column(column)))
    }
}
