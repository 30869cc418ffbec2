//! Inventory grid use cases.
//!
//! Every use case loads the grid fresh, mutates it, and saves the whole
//! layout back. Nothing is cached between calls.

use std::sync::Arc;

use crate::infrastructure::ports::{LayoutRepo, PossessionRepo};

mod error;
mod load;
mod move_item;
mod remove_item;
mod synchronize;
mod take_item;

#[cfg(test)]
mod test_support;

pub use error::InventoryGridError;
pub use load::{LoadInventoryGrid, LoadedGrid};
pub use move_item::{MoveItem, MoveRequest};
pub use remove_item::RemoveItem;
pub use synchronize::SynchronizeGrid;
pub use take_item::TakeItem;

/// Container for inventory grid use cases.
pub struct InventoryGridUseCases {
    pub load: Arc<LoadInventoryGrid>,
    pub move_item: Arc<MoveItem>,
    pub take_item: Arc<TakeItem>,
    pub remove_item: Arc<RemoveItem>,
    pub synchronize: Arc<SynchronizeGrid>,
}

impl InventoryGridUseCases {
    pub fn new(
        possession_repo: Arc<dyn PossessionRepo>,
        layout_repo: Arc<dyn LayoutRepo>,
        grid_columns: u32,
    ) -> Self {
        let load = Arc::new(LoadInventoryGrid::new(
            possession_repo.clone(),
            layout_repo.clone(),
            grid_columns,
        ));
        Self {
            move_item: Arc::new(MoveItem::new(load.clone(), layout_repo.clone())),
            take_item: Arc::new(TakeItem::new(
                load.clone(),
                possession_repo.clone(),
                layout_repo.clone(),
            )),
            remove_item: Arc::new(RemoveItem::new(
                load.clone(),
                possession_repo,
                layout_repo.clone(),
            )),
            synchronize: Arc::new(SynchronizeGrid::new(load.clone(), layout_repo)),
            load,
        }
    }
}
