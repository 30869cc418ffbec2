//! Grid item - what the item store knows about a possession

use serde::{Deserialize, Serialize};

use crate::ids::ItemId;
use crate::value_objects::ItemShape;

/// A possession that can be laid onto an inventory grid.
///
/// This is a data-carrying struct with no invariants beyond those of its
/// fields (`ItemId` and `ItemShape` are valid by construction). The grid only
/// reads `id` and `shape`; `name` is carried for logs and renderings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridItem {
    pub id: ItemId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default)]
    pub shape: ItemShape,
}

impl GridItem {
    pub fn new(id: ItemId, shape: ItemShape) -> Self {
        Self {
            id,
            name: None,
            shape,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
}
