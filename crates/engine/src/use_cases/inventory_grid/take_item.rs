//! Take item use case.
//!
//! Puts a new possession on the actor's grid at the first free slot. The item
//! is only handed to the item store once it has a place.

use std::sync::Arc;

use ambersteel_domain::{ActorId, AddOutcome, GridItem, ItemPlacement};

use crate::infrastructure::ports::{LayoutRepo, PossessionRepo};

use super::error::InventoryGridError;
use super::load::LoadInventoryGrid;

/// Take item use case.
///
/// Orchestrates: grid load, free slot search (either orientation), layout
/// save, possession write.
pub struct TakeItem {
    load: Arc<LoadInventoryGrid>,
    possession_repo: Arc<dyn PossessionRepo>,
    layout_repo: Arc<dyn LayoutRepo>,
}

impl TakeItem {
    pub fn new(
        load: Arc<LoadInventoryGrid>,
        possession_repo: Arc<dyn PossessionRepo>,
        layout_repo: Arc<dyn LayoutRepo>,
    ) -> Self {
        Self {
            load,
            possession_repo,
            layout_repo,
        }
    }

    /// # Returns
    /// * `Ok(ItemPlacement)` - where the item landed
    /// * `Err(InventoryGridError::InventoryFull)` - no slot; nothing is written
    pub async fn execute(
        &self,
        actor_id: &ActorId,
        item: GridItem,
    ) -> Result<ItemPlacement, InventoryGridError> {
        let mut loaded = self.load.execute(actor_id).await?;
        if loaded.possessions.iter().any(|p| p.id == item.id) {
            return Err(InventoryGridError::AlreadyCarried(item.id));
        }

        let placement = match loaded.grid.add_item(&item, None)? {
            AddOutcome::Placed(placement) => placement,
            AddOutcome::InventoryFull => {
                tracing::warn!(
                    actor_id = %actor_id,
                    item_id = %item.id,
                    shape = %item.shape,
                    "Inventory full, item not taken"
                );
                return Err(InventoryGridError::InventoryFull);
            }
        };

        self.layout_repo
            .save(actor_id, &loaded.grid.to_layout())
            .await?;
        self.possession_repo.add_possession(actor_id, &item).await?;

        tracing::info!(
            actor_id = %actor_id,
            item_id = %item.id,
            position = %placement.position(),
            orientation = %placement.orientation(),
            "Took item"
        );
        Ok(placement)
    }
}
