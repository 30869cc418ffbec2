//! Shared fixtures for inventory grid use case tests.

use ambersteel_domain::{ActorId, GridItem, InventoryIndex, ItemId, ItemOrientation, ItemShape};

use crate::infrastructure::ports::{MockLayoutRepo, MockPossessionRepo};

pub fn actor() -> ActorId {
    ActorId::new("Ac1").unwrap()
}

pub fn item_id(id: &str) -> ItemId {
    ItemId::new(id).unwrap()
}

pub fn item(id: &str, width: u32, height: u32) -> GridItem {
    GridItem::new(item_id(id), ItemShape::new(width, height).unwrap())
}

/// A vertical layout record.
pub fn index(id: &str, x: u32, y: u32, w: u32, h: u32) -> InventoryIndex {
    InventoryIndex {
        id: item_id(id),
        x,
        y,
        w,
        h,
        orientation: ItemOrientation::Vertical,
    }
}

/// Possession store answering reads for one actor.
pub fn possessions(max_bulk: u32, items: Vec<GridItem>) -> MockPossessionRepo {
    let mut repo = MockPossessionRepo::new();
    repo.expect_get_max_bulk()
        .returning(move |_| Ok(Some(max_bulk)));
    repo.expect_get_possessions()
        .returning(move |_| Ok(items.clone()));
    repo
}

/// Layout store answering loads; saves must be expected by the caller.
pub fn layouts(stored: Option<Vec<InventoryIndex>>) -> MockLayoutRepo {
    let mut repo = MockLayoutRepo::new();
    repo.expect_load().returning(move |_| Ok(stored.clone()));
    repo
}
