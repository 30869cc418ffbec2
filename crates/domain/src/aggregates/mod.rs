//! Aggregate roots - domain objects that own their related data
//!
//! Each aggregate:
//! - Owns all its constituent parts (enforced by Rust ownership)
//! - Exposes behavior through methods, not public fields
//! - Returns domain events from mutations
//!
//! | Concern | Rustic Equivalent |
//! |---------|-------------------|
//! | Aggregate root guards | Ownership (borrow checker enforces) |
//! | Value Object immutability | `Copy` types + no `&mut` methods |
//! | Domain Events | Return enums from mutations |

pub mod item_grid;

pub use item_grid::ItemGrid;
