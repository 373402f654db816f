//! Media entity store
//!
//! Every operation is scoped to one user: items owned by someone else behave
//! as if they did not exist. Payloads are validated before any state changes.
//! There is no concurrency control; the last write wins.

use async_trait::async_trait;

use crate::model::{MediaItem, MediaPatch, NewMedia, UserId};
use crate::Result;

mod memory;
#[cfg(feature = "sqlx")]
mod sqlite;

pub use memory::MemoryStore;
#[cfg(feature = "sqlx")]
pub use sqlite::SqliteStore;

#[async_trait]
pub trait MediaStore: Send + Sync {
    /// All items of `user`; ordering depends on the backend
    async fn list_items(&self, user: &UserId) -> Result<Vec<MediaItem>>;

    /// Persist a new item under a fresh identifier
    async fn create_item(&self, user: &UserId, draft: NewMedia) -> Result<MediaItem>;

    /// Apply the present fields of `patch`; `Error::NotFound` for unknown ids
    async fn update_item(&self, user: &UserId, id: &str, patch: MediaPatch) -> Result<MediaItem>;

    /// Remove an item; a second delete of the same id is `Error::NotFound`
    async fn delete_item(&self, user: &UserId, id: &str) -> Result<()>;
}

pub(crate) fn not_found(id: &str) -> crate::Error {
    crate::Error::NotFound(format!("Media {}", id))
}
