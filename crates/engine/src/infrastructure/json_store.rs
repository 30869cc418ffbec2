//! JSON file actor store.
//!
//! One document per actor, `<actor_id>.json`, in a data directory:
//!
//! ```json
//! {
//!   "maxBulk": 12,
//!   "possessions": [{ "id": "Ab1", "name": "Rope", "shape": { "width": 1, "height": 2 } }],
//!   "gridIndices": [{ "id": "Ab1", "x": 0, "y": 0, "w": 1, "h": 2, "orientation": "vertical" }]
//! }
//! ```
//!
//! Implements both [`PossessionRepo`] and [`LayoutRepo`]. Writes go to a
//! sibling temp file first and are renamed into place.

use std::path::PathBuf;

use ambersteel_domain::{ActorId, GridItem, InventoryIndex, ItemId};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::fs;
use tokio::sync::Mutex;

use super::ports::{LayoutRepo, PossessionRepo, RepoError};

/// Everything stored for one actor.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActorDocument {
    pub max_bulk: u32,
    #[serde(default)]
    pub possessions: Vec<GridItem>,
    /// Absent until a layout is first saved.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grid_indices: Option<Vec<InventoryIndex>>,
}

pub struct JsonActorStore {
    root: PathBuf,
    /// Serializes read-modify-write cycles within this process.
    write_lock: Mutex<()>,
}

impl JsonActorStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            write_lock: Mutex::new(()),
        }
    }

    /// Read an actor's document. `None` when no file exists.
    pub async fn read(&self, actor_id: &ActorId) -> Result<Option<ActorDocument>, RepoError> {
        let path = self.path_for(actor_id)?;
        let content = match fs::read_to_string(&path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(RepoError::storage("read_actor", e)),
        };
        let document = serde_json::from_str(&content).map_err(|e| {
            RepoError::serialization(format!("{}: {}", path.display(), e))
        })?;
        Ok(Some(document))
    }

    /// Replace an actor's document.
    pub async fn write(&self, actor_id: &ActorId, document: &ActorDocument) -> Result<(), RepoError> {
        let _guard = self.write_lock.lock().await;
        self.write_unlocked(actor_id, document).await
    }

    async fn write_unlocked(
        &self,
        actor_id: &ActorId,
        document: &ActorDocument,
    ) -> Result<(), RepoError> {
        let path = self.path_for(actor_id)?;
        let tmp_path = path.with_extension("json.tmp");
        let content =
            serde_json::to_string_pretty(document).map_err(RepoError::serialization)?;

        fs::create_dir_all(&self.root)
            .await
            .map_err(|e| RepoError::storage("create_data_dir", e))?;
        fs::write(&tmp_path, content)
            .await
            .map_err(|e| RepoError::storage("write_actor", e))?;
        fs::rename(&tmp_path, &path)
            .await
            .map_err(|e| RepoError::storage("write_actor", e))?;

        tracing::debug!(actor_id = %actor_id, path = %path.display(), "Wrote actor document");
        Ok(())
    }

    /// Actor ids become file names, so anything that could escape the data
    /// directory is refused.
    fn path_for(&self, actor_id: &ActorId) -> Result<PathBuf, RepoError> {
        let name = actor_id.as_str();
        if name.starts_with('.') || name.contains(['/', '\\']) {
            return Err(RepoError::storage(
                "resolve_path",
                format!("actor id {name:?} is not a valid file name"),
            ));
        }
        Ok(self.root.join(format!("{name}.json")))
    }
}

#[async_trait]
impl PossessionRepo for JsonActorStore {
    async fn get_max_bulk(&self, actor_id: &ActorId) -> Result<Option<u32>, RepoError> {
        Ok(self.read(actor_id).await?.map(|document| document.max_bulk))
    }

    async fn get_possessions(&self, actor_id: &ActorId) -> Result<Vec<GridItem>, RepoError> {
        self.read(actor_id)
            .await?
            .map(|document| document.possessions)
            .ok_or_else(|| RepoError::not_found("Actor", actor_id))
    }

    async fn add_possession(&self, actor_id: &ActorId, item: &GridItem) -> Result<(), RepoError> {
        let _guard = self.write_lock.lock().await;
        let mut document = self
            .read(actor_id)
            .await?
            .ok_or_else(|| RepoError::not_found("Actor", actor_id))?;
        match document.possessions.iter_mut().find(|p| p.id == item.id) {
            Some(existing) => *existing = item.clone(),
            None => document.possessions.push(item.clone()),
        }
        self.write_unlocked(actor_id, &document).await
    }

    async fn remove_possession(
        &self,
        actor_id: &ActorId,
        item_id: &ItemId,
    ) -> Result<bool, RepoError> {
        let _guard = self.write_lock.lock().await;
        let mut document = self
            .read(actor_id)
            .await?
            .ok_or_else(|| RepoError::not_found("Actor", actor_id))?;
        let before = document.possessions.len();
        document.possessions.retain(|p| &p.id != item_id);
        if document.possessions.len() == before {
            return Ok(false);
        }
        self.write_unlocked(actor_id, &document).await?;
        Ok(true)
    }
}

#[async_trait]
impl LayoutRepo for JsonActorStore {
    async fn load(&self, actor_id: &ActorId) -> Result<Option<Vec<InventoryIndex>>, RepoError> {
        Ok(self
            .read(actor_id)
            .await?
            .and_then(|document| document.grid_indices))
    }

    async fn save(&self, actor_id: &ActorId, layout: &[InventoryIndex]) -> Result<(), RepoError> {
        let _guard = self.write_lock.lock().await;
        let mut document = self
            .read(actor_id)
            .await?
            .ok_or_else(|| RepoError::not_found("Actor", actor_id))?;
        document.grid_indices = Some(layout.to_vec());
        self.write_unlocked(actor_id, &document).await?;
        tracing::debug!(actor_id = %actor_id, entries = layout.len(), "Saved grid layout");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ambersteel_domain::{ItemId, ItemOrientation, ItemShape};

    fn actor() -> ActorId {
        ActorId::new("Ac1").unwrap()
    }

    fn rope() -> GridItem {
        GridItem::new(ItemId::new("Ab1").unwrap(), ItemShape::new(1, 2).unwrap()).with_name("Rope")
    }

    #[tokio::test]
    async fn missing_actor_reads_as_none() {
        let temp_dir = tempfile::tempdir().expect("tempdir");
        let store = JsonActorStore::new(temp_dir.path());

        assert_eq!(store.get_max_bulk(&actor()).await.unwrap(), None);
        assert!(store.load(&actor()).await.unwrap().is_none());
        assert!(store
            .get_possessions(&actor())
            .await
            .unwrap_err()
            .is_not_found());
    }

    #[tokio::test]
    async fn saved_layout_round_trips() {
        let temp_dir = tempfile::tempdir().expect("tempdir");
        let store = JsonActorStore::new(temp_dir.path().join("actors"));
        store
            .write(
                &actor(),
                &ActorDocument {
                    max_bulk: 8,
                    possessions: vec![rope()],
                    grid_indices: None,
                },
            )
            .await
            .unwrap();
        assert!(store.load(&actor()).await.unwrap().is_none());

        let layout = vec![InventoryIndex {
            id: ItemId::new("Ab1").unwrap(),
            x: 1,
            y: 0,
            w: 2,
            h: 1,
            orientation: ItemOrientation::Horizontal,
        }];
        store.save(&actor(), &layout).await.unwrap();

        assert_eq!(store.load(&actor()).await.unwrap(), Some(layout));
        assert_eq!(store.get_max_bulk(&actor()).await.unwrap(), Some(8));
        assert_eq!(store.get_possessions(&actor()).await.unwrap(), vec![rope()]);
        assert!(!temp_dir.path().join("actors").join("Ac1.json.tmp").exists());
    }

    #[tokio::test]
    async fn reads_legacy_records_without_orientation() {
        let temp_dir = tempfile::tempdir().expect("tempdir");
        let document = r#"{
            "maxBulk": 4,
            "possessions": [{ "id": "Ab1" }],
            "gridIndices": [{ "id": "Ab1", "x": 0, "y": 0, "width": 1, "height": 1 }]
        }"#;
        std::fs::write(temp_dir.path().join("Ac1.json"), document).expect("write fixture");
        let store = JsonActorStore::new(temp_dir.path());

        let layout = store.load(&actor()).await.unwrap().unwrap();
        assert_eq!(layout[0].w, 1);
        assert_eq!(layout[0].orientation, ItemOrientation::Vertical);
        let possessions = store.get_possessions(&actor()).await.unwrap();
        assert_eq!(possessions[0].shape, ItemShape::unit());
    }

    #[tokio::test]
    async fn possessions_can_be_added_and_removed() {
        let temp_dir = tempfile::tempdir().expect("tempdir");
        let store = JsonActorStore::new(temp_dir.path());
        store
            .write(
                &actor(),
                &ActorDocument {
                    max_bulk: 4,
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        store.add_possession(&actor(), &rope()).await.unwrap();
        // adding again replaces rather than duplicates
        store.add_possession(&actor(), &rope()).await.unwrap();
        assert_eq!(store.get_possessions(&actor()).await.unwrap(), vec![rope()]);

        assert!(store.remove_possession(&actor(), &rope().id).await.unwrap());
        assert!(!store.remove_possession(&actor(), &rope().id).await.unwrap());
        assert!(store.get_possessions(&actor()).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn saving_for_unknown_actor_is_not_found() {
        let temp_dir = tempfile::tempdir().expect("tempdir");
        let store = JsonActorStore::new(temp_dir.path());
        let err = store.save(&actor(), &[]).await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn malformed_document_is_a_serialization_error() {
        let temp_dir = tempfile::tempdir().expect("tempdir");
        std::fs::write(temp_dir.path().join("Ac1.json"), "{ not json").expect("write fixture");
        let store = JsonActorStore::new(temp_dir.path());
        assert!(matches!(
            store.get_max_bulk(&actor()).await,
            Err(RepoError::Serialization(_))
        ));
    }

    #[tokio::test]
    async fn ids_that_escape_the_data_dir_are_refused() {
        let temp_dir = tempfile::tempdir().expect("tempdir");
        let store = JsonActorStore::new(temp_dir.path());
        let sneaky = ActorId::new("../outside").unwrap();
        assert!(matches!(
            store.read(&sneaky).await,
            Err(RepoError::Storage { .. })
        ));
    }
}
