//! Item grid aggregate - the placement index of an actor's inventory
//!
//! # Rustic DDD Design
//!
//! - **Private fields**: placements are only changed through the methods below
//! - **Valid by construction**: every constructor and mutation keeps the
//!   invariants; a rejected operation leaves the grid untouched
//! - **Domain events**: mutations return outcome types (`GridChange`,
//!   `AddOutcome`, `SyncReport`)
//!
//! # Invariants
//!
//! - No two placements share a cell
//! - Every placement lies inside the grid (see `GridDimensions::contains_rect`)
//! - Item ids are unique
//!
//! # Moves and swaps
//!
//! Dropping an item onto other items is allowed when every item under the
//! drop target lies fully inside it. Those items are moved into the space the
//! dropped item leaves behind, keeping their offsets relative to the target
//! origin. An item only partly under the target blocks the move.

use std::collections::{HashMap, HashSet};
use std::fmt::Write as _;

use crate::entities::{GridItem, InventoryIndex, ItemPlacement};
use crate::error::DomainError;
use crate::events::{AddOutcome, GridChange, SwappedItem, SyncReport};
use crate::ids::ItemId;
use crate::value_objects::{
    GridDimensions, GridPosition, GridRect, ItemOrientation, OverlapHit, PlacementRejection,
    PlacementVerdict,
};

/// Glyphs used by [`ItemGrid::render_ascii`], cycled per placement.
const RENDER_GLYPHS: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

/// Fixed-column grid of unit cells holding rotatable rectangular items.
///
/// # Example
///
/// ```
/// use ambersteel_domain::aggregates::ItemGrid;
/// use ambersteel_domain::{AddOutcome, GridDimensions, GridItem, GridPosition, ItemId, ItemOrientation, ItemShape};
///
/// let mut grid = ItemGrid::new(GridDimensions::new(4, 8).unwrap());
/// let sword = GridItem::new(ItemId::new("sword").unwrap(), ItemShape::new(1, 2).unwrap());
/// assert!(matches!(grid.add_item(&sword, None).unwrap(), AddOutcome::Placed(_)));
///
/// let verdict = grid
///     .can_place(&sword.id, GridPosition::new(2, 0), ItemOrientation::Horizontal)
///     .unwrap();
/// assert!(verdict.is_allowed());
/// ```
#[derive(Debug, Clone)]
pub struct ItemGrid {
    dimensions: GridDimensions,
    /// Insertion order doubles as persisted order.
    placements: Vec<ItemPlacement>,
    /// Row-major `column_count * row_count` table of indices into `placements`.
    cells: Vec<Option<usize>>,
}

impl ItemGrid {
    // =========================================================================
    // Constructors
    // =========================================================================

    /// Create an empty grid.
    pub fn new(dimensions: GridDimensions) -> Self {
        let cell_count = dimensions.column_count() as usize * dimensions.row_count() as usize;
        Self {
            dimensions,
            placements: Vec::new(),
            cells: vec![None; cell_count],
        }
    }

    /// Seed a grid from a persisted layout, failing on the first entry that
    /// breaks an invariant.
    ///
    /// # Errors
    ///
    /// - `DomainError::Validation` for zero-sized entries
    /// - `DomainError::Constraint` for duplicate item ids
    /// - `DomainError::InvalidPlacement` for entries outside the grid or on
    ///   top of an earlier entry
    pub fn from_layout(
        dimensions: GridDimensions,
        indices: impl IntoIterator<Item = InventoryIndex>,
    ) -> Result<Self, DomainError> {
        let mut grid = Self::new(dimensions);
        for index in indices {
            grid.seed(index)?;
        }
        Ok(grid)
    }

    /// Seed a grid from a persisted layout, setting aside entries that cannot
    /// be laid out as stored (for example after the capacity shrank).
    ///
    /// Returns the grid and the displaced entries, in their stored order.
    pub fn restore(
        dimensions: GridDimensions,
        indices: impl IntoIterator<Item = InventoryIndex>,
    ) -> (Self, Vec<InventoryIndex>) {
        let mut grid = Self::new(dimensions);
        let mut displaced = Vec::new();
        for index in indices {
            if grid.seed(index.clone()).is_err() {
                displaced.push(index);
            }
        }
        (grid, displaced)
    }

    fn seed(&mut self, index: InventoryIndex) -> Result<(), DomainError> {
        let placement = ItemPlacement::try_from(index)?;
        if self.index_of(placement.item_id()).is_some() {
            return Err(DomainError::constraint(format!(
                "Item {} appears more than once in the layout",
                placement.item_id()
            )));
        }
        self.check_vacant(&placement, placement.rect())?;
        self.insert(placement);
        Ok(())
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn dimensions(&self) -> GridDimensions {
        self.dimensions
    }

    pub fn placements(&self) -> &[ItemPlacement] {
        &self.placements
    }

    pub fn placement(&self, item_id: &ItemId) -> Option<&ItemPlacement> {
        self.index_of(item_id).map(|index| &self.placements[index])
    }

    pub fn contains(&self, item_id: &ItemId) -> bool {
        self.index_of(item_id).is_some()
    }

    pub fn len(&self) -> usize {
        self.placements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.placements.is_empty()
    }

    /// The placement covering cell `(x, y)`, if any.
    pub fn occupant_at(&self, x: u32, y: u32) -> Option<&ItemPlacement> {
        if !self.dimensions.contains_cell(x, y) {
            return None;
        }
        self.cells[self.cell_index(x, y)].map(|index| &self.placements[index])
    }

    /// Number of tiles not covered by any item.
    pub fn free_cell_count(&self) -> u32 {
        let occupied = self.cells.iter().filter(|cell| cell.is_some()).count();
        // occupied cells are a subset of the tiles
        self.dimensions.tile_count() - occupied as u32
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// Every placement intersecting `rect`, tagged with whether it lies only
    /// partly inside it.
    pub fn find_items_within(&self, rect: GridRect) -> Vec<OverlapHit> {
        self.placements
            .iter()
            .filter(|placement| placement.rect().intersects(&rect))
            .map(|placement| OverlapHit {
                placement: placement.clone(),
                is_partial: !rect.contains_rect(&placement.rect()),
            })
            .collect()
    }

    /// Decide whether `item_id` may move to `target` with `orientation`.
    ///
    /// Side-effect free; safe to call on every pointer move of a drag.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::NotFound` if the item is not on this grid.
    pub fn can_place(
        &self,
        item_id: &ItemId,
        target: GridPosition,
        orientation: ItemOrientation,
    ) -> Result<PlacementVerdict, DomainError> {
        let moving = self
            .placement(item_id)
            .ok_or_else(|| DomainError::not_found("ItemPlacement", item_id.as_str()))?;

        if moving.position() == target && moving.orientation() == orientation {
            return Ok(PlacementVerdict::Unchanged);
        }

        let target_rect = moving.rect_at(target, orientation);
        if !self.dimensions.contains_rect(&target_rect) {
            return Ok(PlacementVerdict::Rejected(PlacementRejection::OutOfBounds));
        }

        let hits: Vec<OverlapHit> = self
            .find_items_within(target_rect)
            .into_iter()
            .filter(|hit| hit.placement.item_id() != item_id)
            .collect();

        if let Some(partial) = hits.iter().find(|hit| hit.is_partial) {
            return Ok(PlacementVerdict::Rejected(
                PlacementRejection::PartialOverlap {
                    item_id: partial.placement.item_id().clone(),
                },
            ));
        }

        let swap_candidates: Vec<ItemPlacement> = hits.into_iter().map(|hit| hit.placement).collect();
        if let Err(blocked) = self.swap_destinations(moving, target, target_rect, &swap_candidates) {
            return Ok(PlacementVerdict::Rejected(PlacementRejection::SwapBlocked {
                item_id: blocked,
            }));
        }

        Ok(PlacementVerdict::Allowed { swap_candidates })
    }

    /// First origin, scanning rows top to bottom and columns left to right,
    /// where an item of declared `width x height` fits on empty cells.
    ///
    /// `None` means the grid has no room for it.
    pub fn find_free_origin(
        &self,
        width: u32,
        height: u32,
        orientation: ItemOrientation,
    ) -> Option<GridPosition> {
        let (width, height) = orientation.apply(width, height);
        if width == 0 || height == 0 {
            return None;
        }
        (0..self.dimensions.row_count())
            .flat_map(|y| (0..self.dimensions.column_count()).map(move |x| GridPosition::new(x, y)))
            .find(|origin| {
                let rect = GridRect::at(*origin, width, height);
                self.dimensions.contains_rect(&rect) && self.is_vacant(&rect)
            })
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Move `item_id` to `target`, swapping the items under the target into
    /// the vacated space.
    ///
    /// # Errors
    ///
    /// - `DomainError::NotFound` if the item is not on this grid
    /// - `DomainError::InvalidPlacement` if `can_place` rejects the move; the
    ///   grid is left unchanged
    pub fn apply_move(
        &mut self,
        item_id: &ItemId,
        target: GridPosition,
        orientation: ItemOrientation,
    ) -> Result<GridChange, DomainError> {
        let swap_candidates = match self.can_place(item_id, target, orientation)? {
            PlacementVerdict::Unchanged => return Ok(GridChange::Unchanged),
            PlacementVerdict::Rejected(reason) => {
                return Err(DomainError::invalid_placement(item_id.as_str(), reason))
            }
            PlacementVerdict::Allowed { swap_candidates } => swap_candidates,
        };

        let index = self
            .index_of(item_id)
            .ok_or_else(|| DomainError::not_found("ItemPlacement", item_id.as_str()))?;
        let moving = &self.placements[index];
        let from = moving.position();
        let target_rect = moving.rect_at(target, orientation);

        // Resolve every destination before touching state
        let destinations = self
            .swap_destinations(moving, target, target_rect, &swap_candidates)
            .map_err(|blocked| {
                DomainError::invalid_placement(
                    item_id.as_str(),
                    PlacementRejection::SwapBlocked { item_id: blocked },
                )
            })?;

        let mut swapped = Vec::with_capacity(destinations.len());
        for (candidate, destination) in swap_candidates.iter().zip(destinations) {
            let candidate_index = self
                .index_of(candidate.item_id())
                .ok_or_else(|| DomainError::not_found("ItemPlacement", candidate.item_id().as_str()))?;
            swapped.push(SwappedItem {
                item_id: candidate.item_id().clone(),
                from: candidate.position(),
                to: destination,
            });
            self.placements[candidate_index].set_position(destination);
        }

        let moving = &mut self.placements[index];
        moving.set_position(target);
        moving.set_orientation(orientation);
        self.rebuild_cells();

        Ok(GridChange::Moved {
            item_id: item_id.clone(),
            from,
            to: target,
            orientation,
            swapped,
        })
    }

    /// Put `item` on the grid.
    ///
    /// With an explicit `slot` the item must fit there on empty cells.
    /// Without one, the first free origin is used, trying the declared
    /// orientation before the rotated one.
    ///
    /// # Errors
    ///
    /// - `DomainError::Constraint` if the item is already on the grid
    /// - `DomainError::InvalidPlacement` if the explicit slot is out of
    ///   bounds or occupied
    pub fn add_item(
        &mut self,
        item: &GridItem,
        slot: Option<(GridPosition, ItemOrientation)>,
    ) -> Result<AddOutcome, DomainError> {
        if self.contains(&item.id) {
            return Err(DomainError::constraint(format!(
                "Item {} is already on the grid",
                item.id
            )));
        }

        let (position, orientation) = match slot {
            Some(slot) => slot,
            None => match self.first_free_slot(item) {
                Some(slot) => slot,
                None => return Ok(AddOutcome::InventoryFull),
            },
        };

        let placement = ItemPlacement::new(item.id.clone(), position, item.shape, orientation);
        self.check_vacant(&placement, placement.rect())?;
        self.insert(placement.clone());
        Ok(AddOutcome::Placed(placement))
    }

    /// Take an item off the grid.
    pub fn remove_item(&mut self, item_id: &ItemId) -> Option<ItemPlacement> {
        let index = self.index_of(item_id)?;
        let removed = self.placements.remove(index);
        self.rebuild_cells();
        Some(removed)
    }

    /// Reconcile the grid with the items the actor currently carries.
    ///
    /// - placements of items not in `items` are removed
    /// - items whose declared shape changed keep their spot when it still
    ///   fits, otherwise they are laid out again at the first free slot
    /// - items not yet on the grid are added at the first free slot
    pub fn synchronize(&mut self, items: &[GridItem]) -> SyncReport {
        let mut report = SyncReport::default();
        let by_id: HashMap<&ItemId, &GridItem> = items.iter().map(|item| (&item.id, item)).collect();

        let mut reshaped: Vec<(ItemPlacement, &GridItem)> = Vec::new();
        let mut kept = Vec::with_capacity(self.placements.len());
        for placement in self.placements.drain(..) {
            match by_id.get(placement.item_id()) {
                None => report.removed.push(placement.item_id().clone()),
                Some(item) if item.shape != placement.shape() => reshaped.push((placement, *item)),
                Some(_) => kept.push(placement),
            }
        }
        self.placements = kept;
        self.rebuild_cells();

        for (old, item) in reshaped {
            let same_spot = ItemPlacement::new(
                item.id.clone(),
                old.position(),
                item.shape,
                old.orientation(),
            );
            let placed = if self.check_vacant(&same_spot, same_spot.rect()).is_ok() {
                self.insert(same_spot);
                true
            } else {
                matches!(self.add_item(item, None), Ok(AddOutcome::Placed(_)))
            };
            if placed {
                report.reshaped.push(item.id.clone());
            } else {
                report.removed.push(item.id.clone());
                report.unplaced.push(item.id.clone());
            }
        }

        let mut seen: HashSet<&ItemId> = HashSet::new();
        for item in items {
            if !seen.insert(&item.id) || self.contains(&item.id) {
                continue;
            }
            match self.add_item(item, None) {
                Ok(AddOutcome::Placed(placement)) => report.added.push(placement),
                Ok(AddOutcome::InventoryFull) | Err(_) => report.unplaced.push(item.id.clone()),
            }
        }

        report
    }

    // =========================================================================
    // Persistence and display
    // =========================================================================

    /// The full layout, one record per placement, for wholesale persistence.
    pub fn to_layout(&self) -> Vec<InventoryIndex> {
        self.placements.iter().map(InventoryIndex::from).collect()
    }

    /// Text picture of the grid: one glyph per placement, `.` for free tiles
    /// and a blank where the partial last row has no tile, followed by a
    /// legend.
    pub fn render_ascii(&self) -> String {
        let mut out = String::new();
        for y in 0..self.dimensions.row_count() {
            for x in 0..self.dimensions.column_count() {
                let glyph = if !self.dimensions.contains_cell(x, y) {
                    ' '
                } else {
                    match self.cells[self.cell_index(x, y)] {
                        Some(index) => RENDER_GLYPHS[index % RENDER_GLYPHS.len()] as char,
                        None => '.',
                    }
                };
                out.push(glyph);
            }
            out.push('\n');
        }
        for (index, placement) in self.placements.iter().enumerate() {
            let _ = writeln!(
                out,
                "{} = {} {} {} at {}",
                RENDER_GLYPHS[index % RENDER_GLYPHS.len()] as char,
                placement.item_id(),
                placement.shape(),
                placement.orientation(),
                placement.position()
            );
        }
        out
    }

    // =========================================================================
    // Internals
    // =========================================================================

    fn index_of(&self, item_id: &ItemId) -> Option<usize> {
        self.placements
            .iter()
            .position(|placement| placement.item_id() == item_id)
    }

    fn cell_index(&self, x: u32, y: u32) -> usize {
        y as usize * self.dimensions.column_count() as usize + x as usize
    }

    fn is_vacant(&self, rect: &GridRect) -> bool {
        rect.cells()
            .all(|(x, y)| self.cells[self.cell_index(x, y)].is_none())
    }

    /// Bounds and emptiness check for a placement about to be inserted.
    fn check_vacant(&self, placement: &ItemPlacement, rect: GridRect) -> Result<(), DomainError> {
        if !self.dimensions.contains_rect(&rect) {
            return Err(DomainError::invalid_placement(
                placement.item_id().as_str(),
                PlacementRejection::OutOfBounds,
            ));
        }
        if let Some(hit) = self.find_items_within(rect).into_iter().next() {
            return Err(DomainError::invalid_placement(
                placement.item_id().as_str(),
                PlacementRejection::Occupied {
                    item_id: hit.placement.item_id().clone(),
                },
            ));
        }
        Ok(())
    }

    fn first_free_slot(&self, item: &GridItem) -> Option<(GridPosition, ItemOrientation)> {
        let mut orientations = vec![ItemOrientation::Vertical];
        if item.shape.width() != item.shape.height() {
            orientations.push(ItemOrientation::Horizontal);
        }
        orientations.into_iter().find_map(|orientation| {
            self.find_free_origin(item.shape.width(), item.shape.height(), orientation)
                .map(|origin| (origin, orientation))
        })
    }

    /// Where each swap candidate lands: its offset from the target origin,
    /// re-applied from the moved item's current origin.
    ///
    /// Fails with the id of the first candidate that would leave the grid,
    /// land on the moved item's new cells, or land on an item that is not
    /// part of the swap.
    fn swap_destinations(
        &self,
        moving: &ItemPlacement,
        target: GridPosition,
        target_rect: GridRect,
        candidates: &[ItemPlacement],
    ) -> Result<Vec<GridPosition>, ItemId> {
        let origin = moving.position();
        let bystanders: Vec<&ItemPlacement> = self
            .placements
            .iter()
            .filter(|placement| {
                placement.item_id() != moving.item_id()
                    && !candidates
                        .iter()
                        .any(|candidate| candidate.item_id() == placement.item_id())
            })
            .collect();

        candidates
            .iter()
            .map(|candidate| -> Result<GridPosition, ItemId> {
                let (dx, dy) = candidate.position().delta_from(target);
                let destination = origin
                    .offset(dx, dy)
                    .ok_or_else(|| candidate.item_id().clone())?;
                let rect = candidate.rect_at(destination, candidate.orientation());
                let blocked = !self.dimensions.contains_rect(&rect)
                    || rect.intersects(&target_rect)
                    || bystanders
                        .iter()
                        .any(|bystander| bystander.rect().intersects(&rect));
                if blocked {
                    Err(candidate.item_id().clone())
                } else {
                    Ok(destination)
                }
            })
            .collect()
    }

    fn insert(&mut self, placement: ItemPlacement) {
        let index = self.placements.len();
        for (x, y) in placement.rect().cells() {
            let cell = self.cell_index(x, y);
            self.cells[cell] = Some(index);
        }
        self.placements.push(placement);
    }

    fn rebuild_cells(&mut self) {
        self.cells.iter_mut().for_each(|cell| *cell = None);
        for (index, placement) in self.placements.iter().enumerate() {
            for (x, y) in placement.rect().cells() {
                let cell = y as usize * self.dimensions.column_count() as usize + x as usize;
                self.cells[cell] = Some(index);
            }
        }
    }
}
