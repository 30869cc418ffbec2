//! Synchronize grid use case.
//!
//! Brings the stored layout in line with the item store: drops entries for
//! items no longer carried, lays out new and reshaped items.

use std::sync::Arc;

use ambersteel_domain::{ActorId, SyncReport};

use crate::infrastructure::ports::LayoutRepo;

use super::error::InventoryGridError;
use super::load::LoadInventoryGrid;

pub struct SynchronizeGrid {
    load: Arc<LoadInventoryGrid>,
    layout_repo: Arc<dyn LayoutRepo>,
}

impl SynchronizeGrid {
    pub fn new(load: Arc<LoadInventoryGrid>, layout_repo: Arc<dyn LayoutRepo>) -> Self {
        Self { load, layout_repo }
    }

    /// Saves only when the stored layout was out of date.
    pub async fn execute(&self, actor_id: &ActorId) -> Result<SyncReport, InventoryGridError> {
        let loaded = self.load.execute(actor_id).await?;
        if loaded.is_dirty() {
            self.layout_repo
                .save(actor_id, &loaded.grid.to_layout())
                .await?;
            tracing::info!(
                actor_id = %actor_id,
                displaced = loaded.displaced.len(),
                removed = loaded.sync.removed.len(),
                added = loaded.sync.added.len(),
                unplaced = loaded.sync.unplaced.len(),
                "Synchronized grid"
            );
        }
        Ok(loaded.sync)
    }
}
