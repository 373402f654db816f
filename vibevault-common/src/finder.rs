//! Vibe finder (mood matcher)
//!
//! The mood vocabulary is derived from whatever the user has tagged; there is
//! no fixed list. Matching is exact and case-sensitive because the vocabulary
//! itself is made of the exact strings the user typed.

use std::collections::BTreeSet;

use crate::library::{CategoryFilter, StatusFilter};
use crate::model::MediaItem;

/// Every tag used across the library, deduplicated, ascending
pub fn distinct_tags(items: &[MediaItem]) -> Vec<String> {
    items
        .iter()
        .flat_map(|item| item.vibes.iter())
        .cloned()
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Items carrying `tag`, optionally narrowed by status and type, in input order
pub fn match_by_tag<'a>(
    items: &'a [MediaItem],
    tag: &str,
    status: StatusFilter,
    category: CategoryFilter,
) -> Vec<&'a MediaItem> {
    items
        .iter()
        .filter(|item| item.vibes.iter().any(|v| v == tag))
        .filter(|item| status.matches(item.status))
        .filter(|item| category.matches(item.kind))
        .collect()
}
