//! Drag session: hover, drag indicator and drop outcome.

use ambersteel_domain::{
    GridPosition, ItemGrid, ItemId, ItemOrientation, ItemPlacement, PlacementRejection,
    PlacementVerdict,
};

use crate::use_cases::inventory_grid::MoveRequest;

/// Cursor the view should show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CursorHint {
    #[default]
    Default,
    /// Over an item that can be picked up.
    Grab,
    /// An item is being dragged.
    Grabbing,
}

/// What the view draws while an item is dragged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DragIndicator {
    pub item_id: ItemId,
    /// Where the drag started.
    pub origin: GridPosition,
    /// Cell under the pointer; `None` while outside the grid.
    pub target: Option<GridPosition>,
    pub orientation: ItemOrientation,
    pub valid: bool,
}

/// Result of releasing the pointer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropOutcome {
    /// Hand to `MoveItem`.
    Commit(MoveRequest),
    /// Dropped where it started, same orientation.
    Unchanged,
    Rejected(PlacementRejection),
    /// No drag was in progress.
    NoDrag,
}

/// Selection state of one grid view.
#[derive(Debug, Clone)]
pub struct DragSession {
    tile_size: u32,
    editable: bool,
    pointer_inside: bool,
    hover: Option<ItemId>,
    cursor: CursorHint,
    drag: Option<DragIndicator>,
}

impl DragSession {
    /// `tile_size` is the pixel edge of one grid cell; zero is treated as one.
    pub fn new(tile_size: u32) -> Self {
        Self {
            tile_size: tile_size.max(1),
            editable: true,
            pointer_inside: false,
            hover: None,
            cursor: CursorHint::Default,
            drag: None,
        }
    }

    pub fn tile_size(&self) -> u32 {
        self.tile_size
    }

    pub fn is_editable(&self) -> bool {
        self.editable
    }

    /// A read-only view still tracks hover but never starts a drag. Turning
    /// editing off cancels a drag in progress.
    pub fn set_editable(&mut self, editable: bool) {
        self.editable = editable;
        if !editable && self.drag.take().is_some() {
            self.cursor = CursorHint::Default;
        }
    }

    pub fn hover(&self) -> Option<&ItemId> {
        self.hover.as_ref()
    }

    pub fn cursor(&self) -> CursorHint {
        self.cursor
    }

    pub fn indicator(&self) -> Option<&DragIndicator> {
        self.drag.as_ref()
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    /// Grid cell containing a pixel, flooring by tile size. `None` left of or
    /// above the grid.
    pub fn cell_at(&self, px: f64, py: f64) -> Option<GridPosition> {
        let to_cell = |pixel: f64| {
            let cell = (pixel / f64::from(self.tile_size)).floor();
            if cell.is_finite() && cell >= 0.0 && cell <= f64::from(u32::MAX) {
                Some(cell as u32)
            } else {
                None
            }
        };
        Some(GridPosition::new(to_cell(px)?, to_cell(py)?))
    }

    /// Start dragging the item under the pointer. Returns true when a drag
    /// started.
    pub fn pointer_down(&mut self, px: f64, py: f64, grid: &ItemGrid) -> bool {
        self.pointer_inside = true;
        if !self.editable || self.drag.is_some() {
            return false;
        }
        let Some(placement) = self.item_at(px, py, grid) else {
            return false;
        };

        let item_id = placement.item_id().clone();
        let origin = placement.position();
        let orientation = placement.orientation();
        tracing::debug!(item_id = %item_id, origin = %origin, "Drag started");

        self.hover = Some(item_id.clone());
        self.cursor = CursorHint::Grabbing;
        self.drag = Some(DragIndicator {
            item_id,
            origin,
            target: Some(origin),
            orientation,
            valid: true,
        });
        self.refresh_indicator(grid);
        true
    }

    pub fn pointer_move(&mut self, px: f64, py: f64, grid: &ItemGrid) {
        self.pointer_inside = true;
        if self.drag.is_some() {
            let target = self.cell_at(px, py);
            if let Some(drag) = self.drag.as_mut() {
                drag.target = target;
            }
            self.refresh_indicator(grid);
        } else {
            self.update_hover(px, py, grid);
        }
    }

    /// Toggle the drag orientation and re-check the current target.
    pub fn rotate(&mut self, grid: &ItemGrid) {
        if let Some(drag) = self.drag.as_mut() {
            drag.orientation = drag.orientation.rotated();
            self.refresh_indicator(grid);
        }
    }

    /// Finish the drag at the pointer position.
    pub fn pointer_up(&mut self, px: f64, py: f64, grid: &ItemGrid) -> DropOutcome {
        let Some(drag) = self.drag.take() else {
            return DropOutcome::NoDrag;
        };
        self.pointer_inside = true;
        self.update_hover(px, py, grid);

        let Some(target) = self.cell_at(px, py) else {
            tracing::debug!(item_id = %drag.item_id, "Dropped outside the grid");
            return DropOutcome::Rejected(PlacementRejection::OutOfBounds);
        };

        match grid.can_place(&drag.item_id, target, drag.orientation) {
            Ok(PlacementVerdict::Unchanged) => DropOutcome::Unchanged,
            Ok(PlacementVerdict::Allowed { .. }) => DropOutcome::Commit(MoveRequest {
                item_id: drag.item_id,
                target,
                orientation: Some(drag.orientation),
            }),
            Ok(PlacementVerdict::Rejected(reason)) => {
                tracing::debug!(item_id = %drag.item_id, target = %target, reason = %reason, "Drop rejected");
                DropOutcome::Rejected(reason)
            }
            Err(e) => {
                tracing::debug!(item_id = %drag.item_id, error = %e, "Dragged item left the grid");
                DropOutcome::NoDrag
            }
        }
    }

    /// The pointer left the view. Hover clears unless a drag is in progress.
    pub fn pointer_leave(&mut self) {
        self.pointer_inside = false;
        if self.drag.is_none() {
            self.hover = None;
            self.cursor = CursorHint::Default;
        }
    }

    fn item_at<'g>(
        &self,
        px: f64,
        py: f64,
        grid: &'g ItemGrid,
    ) -> Option<&'g ItemPlacement> {
        let cell = self.cell_at(px, py)?;
        grid.occupant_at(cell.x, cell.y)
    }

    fn update_hover(&mut self, px: f64, py: f64, grid: &ItemGrid) {
        if !self.pointer_inside {
            return;
        }
        self.hover = self
            .item_at(px, py, grid)
            .map(|placement| placement.item_id().clone());
        self.cursor = if self.hover.is_some() {
            CursorHint::Grab
        } else {
            CursorHint::Default
        };
    }

    fn refresh_indicator(&mut self, grid: &ItemGrid) {
        let Some(drag) = self.drag.as_mut() else {
            return;
        };
        drag.valid = match drag.target {
            Some(target) => grid
                .can_place(&drag.item_id, target, drag.orientation)
                .map(|verdict| verdict.is_allowed())
                .unwrap_or(false),
            None => false,
        };
    }
}
