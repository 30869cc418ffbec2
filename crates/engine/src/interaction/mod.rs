//! Pointer interaction with an inventory grid.
//!
//! Turns pointer and key events into selection state and move requests. Holds
//! no placement authority: every verdict comes from the grid aggregate, and
//! committing a move is the caller's job (see `MoveItem`).

mod drag;

pub use drag::{CursorHint, DragIndicator, DragSession, DropOutcome};
