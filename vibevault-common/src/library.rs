//! Library filter engine
//!
//! Category, status and free-text predicates are ANDed. The result keeps the
//! input order; nothing is re-sorted.

use serde::{Deserialize, Serialize};

use crate::model::{MediaItem, MediaStatus, MediaType};

/// "all" or one media type
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CategoryFilter {
    #[default]
    All,
    Movie,
    Show,
    Book,
}

impl CategoryFilter {
    pub fn matches(&self, kind: MediaType) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Movie => kind == MediaType::Movie,
            CategoryFilter::Show => kind == MediaType::Show,
            CategoryFilter::Book => kind == MediaType::Book,
        }
    }
}

impl From<Option<MediaType>> for CategoryFilter {
    fn from(kind: Option<MediaType>) -> Self {
        match kind {
            None => CategoryFilter::All,
            Some(MediaType::Movie) => CategoryFilter::Movie,
            Some(MediaType::Show) => CategoryFilter::Show,
            Some(MediaType::Book) => CategoryFilter::Book,
        }
    }
}

/// "all" or one completion status
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusFilter {
    #[default]
    All,
    NotStarted,
    InProgress,
    Completed,
}

impl StatusFilter {
    pub fn matches(&self, status: MediaStatus) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::NotStarted => status == MediaStatus::NotStarted,
            StatusFilter::InProgress => status == MediaStatus::InProgress,
            StatusFilter::Completed => status == MediaStatus::Completed,
        }
    }
}

impl From<Option<MediaStatus>> for StatusFilter {
    fn from(status: Option<MediaStatus>) -> Self {
        match status {
            None => StatusFilter::All,
            Some(MediaStatus::NotStarted) => StatusFilter::NotStarted,
            Some(MediaStatus::InProgress) => StatusFilter::InProgress,
            Some(MediaStatus::Completed) => StatusFilter::Completed,
        }
    }
}

/// Combined library view criteria
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LibraryFilter {
    #[serde(default)]
    pub category: CategoryFilter,
    #[serde(default)]
    pub status: StatusFilter,
    #[serde(default, rename = "q")]
    pub search: String,
}

impl LibraryFilter {
    pub fn new(
        category: CategoryFilter,
        status: StatusFilter,
        search: impl Into<String>,
    ) -> Self {
        Self {
            category,
            status,
            search: search.into(),
        }
    }

    pub fn matches(&self, item: &MediaItem) -> bool {
        self.category.matches(item.kind)
            && self.status.matches(item.status)
            && title_contains(&item.title, &self.search.to_lowercase())
    }

    pub fn apply<'a>(&self, items: &'a [MediaItem]) -> Vec<&'a MediaItem> {
        filter(items, self.category, self.status, &self.search)
    }
}

/// Items satisfying every predicate, in input order
pub fn filter<'a>(
    items: &'a [MediaItem],
    category: CategoryFilter,
    status: StatusFilter,
    search: &str,
) -> Vec<&'a MediaItem> {
    let needle = search.to_lowercase();
    items
        .iter()
        .filter(|item| category.matches(item.kind))
        .filter(|item| status.matches(item.status))
        .filter(|item| title_contains(&item.title, &needle))
        .collect()
}

/// Case-insensitive substring test; `needle` must already be lowercase
fn title_contains(title: &str, needle: &str) -> bool {
    needle.is_empty() || title.to_lowercase().contains(needle)
}
