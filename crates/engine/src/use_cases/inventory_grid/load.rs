//! Load inventory grid use case.
//!
//! Builds an actor's grid from its capacity, its stored layout and its
//! current possessions.

use std::sync::Arc;

use ambersteel_domain::{ActorId, GridDimensions, GridItem, InventoryIndex, ItemGrid, SyncReport};

use crate::infrastructure::ports::{LayoutRepo, PossessionRepo};

use super::error::InventoryGridError;

/// A grid as loaded, with what had to be corrected on the way.
#[derive(Debug, Clone)]
pub struct LoadedGrid {
    pub grid: ItemGrid,
    pub possessions: Vec<GridItem>,
    /// Stored entries that could not be laid out as recorded.
    pub displaced: Vec<InventoryIndex>,
    /// Reconciliation of the stored layout with the possessions.
    pub sync: SyncReport,
}

impl LoadedGrid {
    /// True when the in-memory layout no longer matches what is stored.
    pub fn is_dirty(&self) -> bool {
        !self.displaced.is_empty() || self.sync.is_changed()
    }
}

/// Load inventory grid use case.
///
/// Orchestrates: capacity lookup, lenient restore of the stored layout,
/// reconciliation with possessions. Never writes.
pub struct LoadInventoryGrid {
    possession_repo: Arc<dyn PossessionRepo>,
    layout_repo: Arc<dyn LayoutRepo>,
    grid_columns: u32,
}

impl LoadInventoryGrid {
    pub fn new(
        possession_repo: Arc<dyn PossessionRepo>,
        layout_repo: Arc<dyn LayoutRepo>,
        grid_columns: u32,
    ) -> Self {
        Self {
            possession_repo,
            layout_repo,
            grid_columns,
        }
    }

    pub async fn execute(&self, actor_id: &ActorId) -> Result<LoadedGrid, InventoryGridError> {
        let max_bulk = self
            .possession_repo
            .get_max_bulk(actor_id)
            .await?
            .ok_or_else(|| InventoryGridError::ActorNotFound(actor_id.clone()))?;
        let dimensions = GridDimensions::new(self.grid_columns, max_bulk)?;

        let layout = self.layout_repo.load(actor_id).await?.unwrap_or_default();
        let (mut grid, displaced) = ItemGrid::restore(dimensions, layout);
        for entry in &displaced {
            tracing::warn!(
                actor_id = %actor_id,
                item_id = %entry.id,
                x = entry.x,
                y = entry.y,
                "Stored grid entry no longer fits, laying it out again"
            );
        }

        let possessions = self.possession_repo.get_possessions(actor_id).await?;
        let sync = grid.synchronize(&possessions);
        for item_id in &sync.unplaced {
            tracing::warn!(actor_id = %actor_id, item_id = %item_id, "No room on the grid for item");
        }
        if sync.is_changed() {
            tracing::debug!(
                actor_id = %actor_id,
                removed = sync.removed.len(),
                reshaped = sync.reshaped.len(),
                added = sync.added.len(),
                "Reconciled grid with possessions"
            );
        }

        Ok(LoadedGrid {
            grid,
            possessions,
            displaced,
            sync,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::ports::{MockLayoutRepo, MockPossessionRepo, RepoError};
    use crate::use_cases::inventory_grid::test_support::{actor, index, item, layouts, possessions};
    use ambersteel_domain::{GridPosition, ItemId};

    #[tokio::test]
    async fn when_actor_not_found_returns_error() {
        let mut possession_repo = MockPossessionRepo::new();
        possession_repo.expect_get_max_bulk().returning(|_| Ok(None));

        let use_case =
            LoadInventoryGrid::new(Arc::new(possession_repo), Arc::new(MockLayoutRepo::new()), 4);
        let result = use_case.execute(&actor()).await;

        assert!(matches!(result, Err(InventoryGridError::ActorNotFound(_))));
    }

    #[tokio::test]
    async fn stored_layout_in_sync_is_clean() {
        let use_case = LoadInventoryGrid::new(
            Arc::new(possessions(8, vec![item("a", 1, 1), item("b", 1, 2)])),
            Arc::new(layouts(Some(vec![index("a", 3, 0, 1, 1), index("b", 0, 0, 1, 2)]))),
            4,
        );

        let loaded = use_case.execute(&actor()).await.unwrap();

        assert!(!loaded.is_dirty());
        assert_eq!(
            loaded
                .grid
                .placement(&ItemId::new("a").unwrap())
                .unwrap()
                .position(),
            GridPosition::new(3, 0)
        );
    }

    #[tokio::test]
    async fn missing_layout_places_every_possession() {
        let use_case = LoadInventoryGrid::new(
            Arc::new(possessions(8, vec![item("a", 1, 1), item("b", 2, 1)])),
            Arc::new(layouts(None)),
            4,
        );

        let loaded = use_case.execute(&actor()).await.unwrap();

        assert!(loaded.is_dirty());
        assert_eq!(loaded.sync.added.len(), 2);
        assert_eq!(loaded.grid.len(), 2);
    }

    #[tokio::test]
    async fn displaced_entries_are_laid_out_again() {
        // b overlaps a in storage
        let use_case = LoadInventoryGrid::new(
            Arc::new(possessions(8, vec![item("a", 2, 2), item("b", 1, 1)])),
            Arc::new(layouts(Some(vec![index("a", 0, 0, 2, 2), index("b", 1, 1, 1, 1)]))),
            4,
        );

        let loaded = use_case.execute(&actor()).await.unwrap();

        assert_eq!(loaded.displaced.len(), 1);
        assert!(loaded.is_dirty());
        assert_eq!(
            loaded
                .grid
                .placement(&ItemId::new("b").unwrap())
                .unwrap()
                .position(),
            GridPosition::new(2, 0)
        );
    }

    #[tokio::test]
    async fn when_repo_error_propagates() {
        let mut possession_repo = MockPossessionRepo::new();
        possession_repo
            .expect_get_max_bulk()
            .returning(|_| Err(RepoError::storage("read_actor", "disk unavailable")));

        let use_case =
            LoadInventoryGrid::new(Arc::new(possession_repo), Arc::new(MockLayoutRepo::new()), 4);
        let result = use_case.execute(&actor()).await;

        assert!(matches!(result, Err(InventoryGridError::Repo(_))));
    }
}
