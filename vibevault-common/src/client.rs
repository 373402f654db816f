//! Library client
//!
//! Holds the one client-side view of a user's library. The list is fetched
//! once per cache generation; every successful mutation invalidates it and
//! the next read refetches the whole list. Mutations are never applied
//! optimistically, so a failure leaves the cached list as it was.

use std::sync::Arc;
use tracing::{error, info, warn};

use crate::cache::{QueryCache, QueryKey};
use crate::finder;
use crate::library::{CategoryFilter, LibraryFilter, StatusFilter};
use crate::model::{MediaItem, MediaPatch, MediaStatus, NewMedia, UserId};
use crate::session::SessionProvider;
use crate::shell::{Screen, Shell};
use crate::stats::LibraryStats;
use crate::store::MediaStore;
use crate::tags::TagEditor;
use crate::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Error,
}

/// User-visible toast
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub kind: NotificationKind,
    pub title: String,
    pub description: String,
}

impl Notification {
    fn success(title: &str, description: &str) -> Self {
        Self {
            kind: NotificationKind::Success,
            title: title.to_string(),
            description: description.to_string(),
        }
    }

    fn error(description: &str) -> Self {
        Self {
            kind: NotificationKind::Error,
            title: "Error".to_string(),
            description: description.to_string(),
        }
    }
}

pub struct LibraryClient {
    store: Arc<dyn MediaStore>,
    session: Arc<dyn SessionProvider>,
    cache: QueryCache<Vec<MediaItem>>,
    shell: Shell,
    notifications: Vec<Notification>,
}

impl LibraryClient {
    pub fn new(store: Arc<dyn MediaStore>, session: Arc<dyn SessionProvider>) -> Self {
        Self {
            store,
            session,
            cache: QueryCache::new(),
            shell: Shell::new(),
            notifications: Vec::new(),
        }
    }

    pub fn shell(&self) -> &Shell {
        &self.shell
    }

    pub fn shell_mut(&mut self) -> &mut Shell {
        &mut self.shell
    }

    pub fn notifications(&self) -> &[Notification] {
        &self.notifications
    }

    /// Hand pending toasts to the caller
    pub fn drain_notifications(&mut self) -> Vec<Notification> {
        std::mem::take(&mut self.notifications)
    }

    fn user(&self) -> Result<UserId> {
        self.session
            .current_user_id()
            .ok_or_else(|| Error::Auth("No active session".to_string()))
    }

    fn key(&self) -> Result<QueryKey> {
        Ok(QueryKey::media_items(self.user()?))
    }

    /// Cached list for the signed-in user, fetched when stale
    pub async fn media(&mut self) -> Result<&[MediaItem]> {
        let key = self.key()?;
        if !self.cache.is_fresh(&key) {
            let token = self.cache.begin_fetch(key.clone());
            let items = self.store.list_items(&key.user_id).await.map_err(|e| {
                error!("Failed to fetch media for {}: {}", key.user_id, e);
                e
            })?;
            self.cache.complete_fetch(token, items);
        }
        Ok(self.cache.get(&key).map(Vec::as_slice).unwrap_or(&[]))
    }

    fn invalidate(&mut self) {
        if let Ok(key) = self.key() {
            self.cache.invalidate(&key);
        }
    }

    fn cached_item(&self, id: &str) -> Result<MediaItem> {
        let key = self.key()?;
        self.cache
            .get(&key)
            .and_then(|items| items.iter().find(|item| item.id == id))
            .cloned()
            .ok_or_else(|| Error::NotFound(format!("Media {}", id)))
    }

    /// Item currently shown in the detail overlay
    pub async fn selected_item(&mut self) -> Result<Option<MediaItem>> {
        let Some(id) = self.shell.selected().map(str::to_string) else {
            return Ok(None);
        };
        self.media().await?;
        Ok(self.cached_item(&id).ok())
    }

    pub async fn add_media(&mut self, draft: NewMedia) -> Result<MediaItem> {
        let user = self.user()?;
        match self.store.create_item(&user, draft).await {
            Ok(item) => {
                self.invalidate();
                self.shell.navigate(Screen::Library);
                info!("Added media {} ({})", item.id, item.title);
                self.notifications.push(Notification::success(
                    "Media added",
                    "Successfully added to your library",
                ));
                Ok(item)
            }
            Err(e) => {
                warn!("Failed to add media: {}", e);
                self.notifications.push(Notification::error("Failed to add media"));
                Err(e)
            }
        }
    }

    async fn update(&mut self, id: &str, patch: MediaPatch) -> Result<MediaItem> {
        let user = self.user()?;
        match self.store.update_item(&user, id, patch).await {
            Ok(item) => {
                self.invalidate();
                self.notifications
                    .push(Notification::success("Media updated", "Your changes have been saved"));
                Ok(item)
            }
            Err(e) => {
                warn!("Failed to update media {}: {}", id, e);
                self.notifications.push(Notification::error("Failed to update media"));
                Err(e)
            }
        }
    }

    pub async fn update_vibes(&mut self, id: &str, vibes: Vec<String>) -> Result<MediaItem> {
        self.update(id, MediaPatch::vibes(vibes)).await
    }

    pub async fn update_status(&mut self, id: &str, status: MediaStatus) -> Result<MediaItem> {
        self.update(id, MediaPatch::status(status)).await
    }

    /// Add a tag to a cached item; `Ok(None)` when the tag was blank or present
    pub async fn add_vibe(&mut self, id: &str, tag: &str) -> Result<Option<MediaItem>> {
        self.media().await?;
        let item = self.cached_item(id)?;
        let mut editor = TagEditor::new(item.id, item.vibes);
        match editor.add(tag) {
            Some(patch) => self.update(id, patch).await.map(Some),
            None => Ok(None),
        }
    }

    pub async fn remove_vibe(&mut self, id: &str, index: usize) -> Result<MediaItem> {
        self.media().await?;
        let item = self.cached_item(id)?;
        let mut editor = TagEditor::new(item.id, item.vibes);
        let patch = editor
            .remove(index)
            .map_err(|e| Error::invalid("vibes", e.to_string()))?;
        self.update(id, patch).await
    }

    pub async fn remove_media(&mut self, id: &str) -> Result<()> {
        let user = self.user()?;
        match self.store.delete_item(&user, id).await {
            Ok(()) => {
                self.invalidate();
                self.shell.item_removed(id);
                self.notifications.push(Notification::success(
                    "Media removed",
                    "The item has been removed from your library",
                ));
                Ok(())
            }
            Err(e) => {
                warn!("Failed to remove media {}: {}", id, e);
                self.notifications.push(Notification::error("Failed to remove media"));
                Err(e)
            }
        }
    }

    pub async fn library_view(&mut self, filter: &LibraryFilter) -> Result<Vec<MediaItem>> {
        let items = self.media().await?;
        Ok(filter.apply(items).into_iter().cloned().collect())
    }

    pub async fn vibe_vocabulary(&mut self) -> Result<Vec<String>> {
        Ok(finder::distinct_tags(self.media().await?))
    }

    pub async fn vibe_matches(
        &mut self,
        tag: &str,
        status: StatusFilter,
        category: CategoryFilter,
    ) -> Result<Vec<MediaItem>> {
        let items = self.media().await?;
        Ok(finder::match_by_tag(items, tag, status, category)
            .into_iter()
            .cloned()
            .collect())
    }

    pub async fn stats(&mut self) -> Result<LibraryStats> {
        Ok(LibraryStats::from_items(self.media().await?))
    }

    pub fn sign_out(&mut self) {
        if let Some(user) = self.session.current_user_id() {
            self.cache.invalidate_user(&user);
        }
        self.session.sign_out();
        self.shell.sign_out();
    }
}
