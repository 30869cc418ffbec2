//! Remove item use case.
//!
//! Takes an item off the actor: frees its cells and drops the possession.

use std::sync::Arc;

use ambersteel_domain::{ActorId, ItemId, ItemPlacement};

use crate::infrastructure::ports::{LayoutRepo, PossessionRepo};

use super::error::InventoryGridError;
use super::load::LoadInventoryGrid;

pub struct RemoveItem {
    load: Arc<LoadInventoryGrid>,
    possession_repo: Arc<dyn PossessionRepo>,
    layout_repo: Arc<dyn LayoutRepo>,
}

impl RemoveItem {
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

    /// Returns the freed placement, or `None` when the item was carried but
    /// had no room on the grid.
    pub async fn execute(
        &self,
        actor_id: &ActorId,
        item_id: &ItemId,
    ) -> Result<Option<ItemPlacement>, InventoryGridError> {
        let mut loaded = self.load.execute(actor_id).await?;
        if !loaded.possessions.iter().any(|p| &p.id == item_id) {
            return Err(InventoryGridError::ItemNotInPossession(item_id.clone()));
        }

        let removed = loaded.grid.remove_item(item_id);
        self.layout_repo
            .save(actor_id, &loaded.grid.to_layout())
            .await?;
        let was_stored = self
            .possession_repo
            .remove_possession(actor_id, item_id)
            .await?;
        if !was_stored {
            tracing::warn!(
                actor_id = %actor_id,
                item_id = %item_id,
                "Possession was already gone from the item store"
            );
        }

        tracing::info!(actor_id = %actor_id, item_id = %item_id, "Removed item");
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::use_cases::inventory_grid::test_support::{
        actor, index, item, item_id, layouts, possessions,
    };
    use ambersteel_domain::GridPosition;

    fn use_case(
        possession_repo: crate::infrastructure::ports::MockPossessionRepo,
        layout_repo: crate::infrastructure::ports::MockLayoutRepo,
    ) -> RemoveItem {
        let possession_repo: Arc<dyn PossessionRepo> = Arc::new(possession_repo);
        let layout_repo: Arc<dyn LayoutRepo> = Arc::new(layout_repo);
        let load = Arc::new(LoadInventoryGrid::new(
            possession_repo.clone(),
            layout_repo.clone(),
            4,
        ));
        RemoveItem::new(load, possession_repo, layout_repo)
    }

    #[tokio::test]
    async fn when_carried_frees_cells_and_drops_possession() {
        let mut possession_repo = possessions(8, vec![item("a", 1, 1), item("b", 2, 2)]);
        possession_repo
            .expect_remove_possession()
            .withf(|_, id| id.as_str() == "b")
            .times(1)
            .returning(|_, _| Ok(true));
        let mut layout_repo = layouts(Some(vec![index("a", 0, 0, 1, 1), index("b", 1, 0, 2, 2)]));
        layout_repo
            .expect_save()
            .withf(|_, layout| layout.len() == 1 && layout[0] == index("a", 0, 0, 1, 1))
            .times(1)
            .returning(|_, _| Ok(()));

        let removed = use_case(possession_repo, layout_repo)
            .execute(&actor(), &item_id("b"))
            .await
            .unwrap()
            .unwrap();

        assert_eq!(removed.position(), GridPosition::new(1, 0));
    }

    #[tokio::test]
    async fn when_possession_vanished_still_frees_cells() {
        let mut possession_repo = possessions(8, vec![item("a", 1, 1)]);
        possession_repo
            .expect_remove_possession()
            .times(1)
            .returning(|_, _| Ok(false));
        let mut layout_repo = layouts(Some(vec![index("a", 0, 0, 1, 1)]));
        layout_repo
            .expect_save()
            .withf(|_, layout| layout.is_empty())
            .times(1)
            .returning(|_, _| Ok(()));

        let removed = use_case(possession_repo, layout_repo)
            .execute(&actor(), &item_id("a"))
            .await
            .unwrap();

        assert_eq!(removed.map(|p| p.position()), Some(GridPosition::new(0, 0)));
    }

    #[tokio::test]
    async fn when_not_carried_returns_error() {
        let mut possession_repo = possessions(8, vec![]);
        possession_repo.expect_remove_possession().never();
        let mut layout_repo = layouts(Some(vec![]));
        layout_repo.expect_save().never();

        let result = use_case(possession_repo, layout_repo)
            .execute(&actor(), &item_id("ghost"))
            .await;

        assert!(matches!(
            result,
            Err(InventoryGridError::ItemNotInPossession(_))
        ));
    }
}
