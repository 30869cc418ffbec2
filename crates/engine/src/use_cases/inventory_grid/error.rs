//! Inventory grid operation errors.

use ambersteel_domain::{ActorId, DomainError, ItemId, PlacementRejection};

use crate::infrastructure::ports::RepoError;

/// Errors that can occur during inventory grid operations.
#[derive(Debug, thiserror::Error)]
pub enum InventoryGridError {
    #[error("Actor not found: {0}")]
    ActorNotFound(ActorId),
    #[error("Item not on the grid: {0}")]
    ItemNotFound(ItemId),
    #[error("Item not in possession: {0}")]
    ItemNotInPossession(ItemId),
    #[error("Item already carried: {0}")]
    AlreadyCarried(ItemId),
    #[error("Inventory is full")]
    InventoryFull,
    #[error("Placement rejected: {0}")]
    Rejected(PlacementRejection),
    #[error("Validation error: {0}")]
    Domain(#[from] DomainError),
    #[error("Repository error: {0}")]
    Repo(#[from] RepoError),
}
