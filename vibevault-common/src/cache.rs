//! Client-side query cache
//!
//! One entry per (user, resource). Invalidation bumps the entry's generation;
//! a fetch that started before the bump cannot overwrite the entry when it
//! completes, so the next read refetches instead.

use std::collections::HashMap;
use tracing::debug;

use crate::model::UserId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resource {
    MediaItems,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QueryKey {
    pub user_id: UserId,
    pub resource: Resource,
}

impl QueryKey {
    pub fn media_items(user_id: UserId) -> Self {
        Self {
            user_id,
            resource: Resource::MediaItems,
        }
    }
}

/// Issued by `begin_fetch`, redeemed by `complete_fetch`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchToken {
    key: QueryKey,
    generation: u64,
}

impl FetchToken {
    pub fn key(&self) -> &QueryKey {
        &self.key
    }
}

#[derive(Debug)]
struct Entry<T> {
    data: Option<T>,
    generation: u64,
    fresh: bool,
}

impl<T> Default for Entry<T> {
    fn default() -> Self {
        Self {
            data: None,
            generation: 0,
            fresh: false,
        }
    }
}

#[derive(Debug)]
pub struct QueryCache<T> {
    entries: HashMap<QueryKey, Entry<T>>,
}

impl<T> Default for QueryCache<T> {
    fn default() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }
}

impl<T> QueryCache<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Data for `key` if it is present and not invalidated
    pub fn get(&self, key: &QueryKey) -> Option<&T> {
        self.entries
            .get(key)
            .filter(|entry| entry.fresh)
            .and_then(|entry| entry.data.as_ref())
    }

    pub fn is_fresh(&self, key: &QueryKey) -> bool {
        self.get(key).is_some()
    }

    pub fn begin_fetch(&mut self, key: QueryKey) -> FetchToken {
        let generation = self.entries.entry(key.clone()).or_default().generation;
        FetchToken { key, generation }
    }

    /// Store a fetch result; returns false when the fetch was superseded
    pub fn complete_fetch(&mut self, token: FetchToken, data: T) -> bool {
        let entry = self.entries.entry(token.key).or_default();
        if entry.generation != token.generation {
            debug!(
                "Discarding superseded fetch (generation {} < {})",
                token.generation, entry.generation
            );
            return false;
        }
        entry.data = Some(data);
        entry.fresh = true;
        true
    }

    pub fn invalidate(&mut self, key: &QueryKey) {
        if let Some(entry) = self.entries.get_mut(key) {
            entry.generation += 1;
            entry.fresh = false;
        }
    }

    pub fn invalidate_user(&mut self, user_id: &UserId) {
        for (key, entry) in self.entries.iter_mut() {
            if &key.user_id == user_id {
                entry.generation += 1;
                entry.fresh = false;
            }
        }
    }
}
