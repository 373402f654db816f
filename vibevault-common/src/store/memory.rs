//! Transient in-process store, listing in insertion order

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;

use super::{not_found, MediaStore};
use crate::model::{MediaItem, MediaPatch, NewMedia, UserId};
use crate::Result;

#[derive(Debug)]
struct Owned {
    owner: UserId,
    item: MediaItem,
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    items: RwLock<Vec<Owned>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl MediaStore for MemoryStore {
    async fn list_items(&self, user: &UserId) -> Result<Vec<MediaItem>> {
        let items = self.items.read().await;
        Ok(items
            .iter()
            .filter(|owned| &owned.owner == user)
            .map(|owned| owned.item.clone())
            .collect())
    }

    async fn create_item(&self, user: &UserId, draft: NewMedia) -> Result<MediaItem> {
        let draft = draft.validated()?;
        let item = MediaItem::from_draft(uuid::Uuid::new_v4().to_string(), draft);

        self.items.write().await.push(Owned {
            owner: user.clone(),
            item: item.clone(),
        });
        debug!("Created media {} for {}", item.id, user);
        Ok(item)
    }

    async fn update_item(&self, user: &UserId, id: &str, patch: MediaPatch) -> Result<MediaItem> {
        let patch = patch.validated()?;
        let mut items = self.items.write().await;
        let owned = items
            .iter_mut()
            .find(|owned| &owned.owner == user && owned.item.id == id)
            .ok_or_else(|| not_found(id))?;

        owned.item.apply(patch);
        Ok(owned.item.clone())
    }

    async fn delete_item(&self, user: &UserId, id: &str) -> Result<()> {
        let mut items = self.items.write().await;
        let index = items
            .iter()
            .position(|owned| &owned.owner == user && owned.item.id == id)
            .ok_or_else(|| not_found(id))?;

        items.remove(index);
        debug!("Deleted media {} for {}", id, user);
        Ok(())
    }
}
