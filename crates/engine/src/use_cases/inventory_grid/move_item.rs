//! Move item use case.
//!
//! Commits a drag: moves an item on the grid, swapping the items under the
//! drop target, and persists the new layout.

use std::sync::Arc;

use ambersteel_domain::{ActorId, DomainError, GridChange, GridPosition, ItemId, ItemOrientation};

use crate::infrastructure::ports::LayoutRepo;

use super::error::InventoryGridError;
use super::load::LoadInventoryGrid;

/// A move as produced by a drop gesture.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveRequest {
    pub item_id: ItemId,
    pub target: GridPosition,
    /// `None` keeps the item's current orientation.
    pub orientation: Option<ItemOrientation>,
}

/// Move item use case.
///
/// Orchestrates: grid load, placement check, move and swap, layout save.
/// Rejected and unchanged moves leave storage untouched.
pub struct MoveItem {
    load: Arc<LoadInventoryGrid>,
    layout_repo: Arc<dyn LayoutRepo>,
}

impl MoveItem {
    pub fn new(load: Arc<LoadInventoryGrid>, layout_repo: Arc<dyn LayoutRepo>) -> Self {
        Self { load, layout_repo }
    }

    pub async fn execute(
        &self,
        actor_id: &ActorId,
        request: MoveRequest,
    ) -> Result<GridChange, InventoryGridError> {
        let mut loaded = self.load.execute(actor_id).await?;
        let Some(placement) = loaded.grid.placement(&request.item_id) else {
            return Err(InventoryGridError::ItemNotFound(request.item_id));
        };
        let orientation = request.orientation.unwrap_or(placement.orientation());

        let change = match loaded
            .grid
            .apply_move(&request.item_id, request.target, orientation)
        {
            Ok(change) => change,
            Err(DomainError::InvalidPlacement { reason, .. }) => {
                tracing::warn!(
                    actor_id = %actor_id,
                    item_id = %request.item_id,
                    target = %request.target,
                    reason = %reason,
                    "Rejected item move"
                );
                return Err(InventoryGridError::Rejected(reason));
            }
            Err(e) => return Err(e.into()),
        };

        if let GridChange::Moved {
            from, to, swapped, ..
        } = &change
        {
            tracing::info!(
                actor_id = %actor_id,
                item_id = %request.item_id,
                from = %from,
                to = %to,
                orientation = %orientation,
                swapped = swapped.len(),
                "Moved item"
            );
        }

        if change.is_changed() || loaded.is_dirty() {
            self.layout_repo
                .save(actor_id, &loaded.grid.to_layout())
                .await?;
        }
        Ok(change)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::use_cases::inventory_grid::test_support::{
        actor, index, item, item_id, layouts, possessions,
    };
    use ambersteel_domain::{InventoryIndex, PlacementRejection, SwappedItem};

    fn request(id: &str, x: u32, y: u32, orientation: ItemOrientation) -> MoveRequest {
        MoveRequest {
            item_id: item_id(id),
            target: GridPosition::new(x, y),
            orientation: Some(orientation),
        }
    }

    fn use_case(
        items: Vec<ambersteel_domain::GridItem>,
        layout_repo: crate::infrastructure::ports::MockLayoutRepo,
    ) -> MoveItem {
        let layout_repo: Arc<dyn LayoutRepo> = Arc::new(layout_repo);
        let load = Arc::new(LoadInventoryGrid::new(
            Arc::new(possessions(8, items)),
            layout_repo.clone(),
            4,
        ));
        MoveItem::new(load, layout_repo)
    }

    #[tokio::test]
    async fn when_swap_succeeds_saves_both_positions() {
        let mut layout_repo = layouts(Some(vec![index("a", 2, 0, 1, 1), index("b", 0, 1, 1, 1)]));
        layout_repo
            .expect_save()
            .withf(|_, layout| {
                layout.contains(&index("a", 0, 1, 1, 1)) && layout.contains(&index("b", 2, 0, 1, 1))
            })
            .times(1)
            .returning(|_, _| Ok(()));

        let use_case = use_case(vec![item("a", 1, 1), item("b", 1, 1)], layout_repo);
        let change = use_case
            .execute(&actor(), request("b", 2, 0, ItemOrientation::Vertical))
            .await
            .unwrap();

        match change {
            GridChange::Moved { swapped, .. } => assert_eq!(
                swapped,
                vec![SwappedItem {
                    item_id: item_id("a"),
                    from: GridPosition::new(2, 0),
                    to: GridPosition::new(0, 1),
                }]
            ),
            GridChange::Unchanged => panic!("expected a move"),
        }
    }

    #[tokio::test]
    async fn when_partial_overlap_rejects_without_saving() {
        let mut layout_repo = layouts(Some(vec![index("a", 0, 0, 2, 2), index("b", 2, 0, 2, 1)]));
        layout_repo.expect_save().never();

        let use_case = use_case(vec![item("a", 2, 2), item("b", 2, 1)], layout_repo);
        let result = use_case
            .execute(&actor(), request("a", 1, 0, ItemOrientation::Vertical))
            .await;

        match result {
            Err(InventoryGridError::Rejected(PlacementRejection::PartialOverlap { item_id: id })) => {
                assert_eq!(id, item_id("b"))
            }
            other => panic!("expected a partial overlap, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn when_out_of_bounds_rejects() {
        let mut layout_repo = layouts(Some(vec![index("a", 0, 0, 1, 2)]));
        layout_repo.expect_save().never();

        let use_case = use_case(vec![item("a", 1, 2)], layout_repo);
        let result = use_case
            .execute(&actor(), request("a", 3, 0, ItemOrientation::Horizontal))
            .await;

        assert!(matches!(
            result,
            Err(InventoryGridError::Rejected(PlacementRejection::OutOfBounds))
        ));
    }

    #[tokio::test]
    async fn when_dropped_in_place_skips_save() {
        let mut layout_repo = layouts(Some(vec![index("a", 1, 1, 1, 1)]));
        layout_repo.expect_save().never();

        let use_case = use_case(vec![item("a", 1, 1)], layout_repo);
        let change = use_case
            .execute(&actor(), request("a", 1, 1, ItemOrientation::Vertical))
            .await
            .unwrap();

        assert_eq!(change, GridChange::Unchanged);
    }

    #[tokio::test]
    async fn when_item_not_on_grid_returns_error() {
        let mut layout_repo = layouts(Some(vec![]));
        layout_repo.expect_save().never();

        let use_case = use_case(vec![], layout_repo);
        let result = use_case
            .execute(&actor(), request("ghost", 0, 0, ItemOrientation::Vertical))
            .await;

        assert!(matches!(result, Err(InventoryGridError::ItemNotFound(_))));
    }

    #[tokio::test]
    async fn rotation_is_persisted() {
        let mut layout_repo = layouts(Some(vec![index("a", 0, 0, 1, 2)]));
        layout_repo
            .expect_save()
            .withf(|_, layout| {
                layout.len() == 1
                    && layout[0].w == 2
                    && layout[0].h == 1
                    && layout[0].orientation == ItemOrientation::Horizontal
            })
            .times(1)
            .returning(|_, _| Ok(()));

        let use_case = use_case(vec![item("a", 1, 2)], layout_repo);
        use_case
            .execute(&actor(), request("a", 2, 1, ItemOrientation::Horizontal))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn without_orientation_keeps_the_current_one() {
        let lying_down = InventoryIndex {
            orientation: ItemOrientation::Horizontal,
            ..index("a", 0, 0, 2, 1)
        };
        let mut layout_repo = layouts(Some(vec![lying_down]));
        layout_repo
            .expect_save()
            .withf(|_, layout| {
                layout.len() == 1
                    && (layout[0].x, layout[0].y) == (1, 1)
                    && layout[0].orientation == ItemOrientation::Horizontal
            })
            .times(1)
            .returning(|_, _| Ok(()));

        let use_case = use_case(vec![item("a", 1, 2)], layout_repo);
        let change = use_case
            .execute(
                &actor(),
                MoveRequest {
                    item_id: item_id("a"),
                    target: GridPosition::new(1, 1),
                    orientation: None,
                },
            )
            .await
            .unwrap();

        assert!(matches!(
            change,
            GridChange::Moved {
                orientation: ItemOrientation::Horizontal,
                ..
            }
        ));
    }
}
