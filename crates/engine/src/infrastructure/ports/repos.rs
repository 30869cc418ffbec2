//! Repository port traits for actor storage.

use ambersteel_domain::{ActorId, GridItem, InventoryIndex, ItemId};
use async_trait::async_trait;

use super::error::RepoError;

// =============================================================================
// Item Store
// =============================================================================

/// The host's item store: capacity and carried items.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PossessionRepo: Send + Sync {
    /// The actor's total grid capacity. `None` when the actor does not exist.
    async fn get_max_bulk(&self, actor_id: &ActorId) -> Result<Option<u32>, RepoError>;

    /// Items the actor currently carries, in the store's order.
    async fn get_possessions(&self, actor_id: &ActorId) -> Result<Vec<GridItem>, RepoError>;

    async fn add_possession(&self, actor_id: &ActorId, item: &GridItem) -> Result<(), RepoError>;

    /// Returns false when the actor did not carry the item.
    async fn remove_possession(&self, actor_id: &ActorId, item_id: &ItemId)
        -> Result<bool, RepoError>;
}

// =============================================================================
// Layout Persistence
// =============================================================================

/// Persisted grid layout, replaced wholesale on every save.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LayoutRepo: Send + Sync {
    /// `None` when no layout was ever saved for the actor.
    async fn load(&self, actor_id: &ActorId) -> Result<Option<Vec<InventoryIndex>>, RepoError>;

    async fn save(&self, actor_id: &ActorId, layout: &[InventoryIndex]) -> Result<(), RepoError>;
}
