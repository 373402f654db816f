//! Per-type library counts shown on the profile screen

use serde::Serialize;

use crate::model::{MediaItem, MediaType};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct LibraryStats {
    pub shows: usize,
    pub movies: usize,
    pub books: usize,
    pub total: usize,
}

impl LibraryStats {
    pub fn from_items(items: &[MediaItem]) -> Self {
        let mut stats = Self::default();
        for item in items {
            match item.kind {
                MediaType::Show => stats.shows += 1,
                MediaType::Movie => stats.movies += 1,
                MediaType::Book => stats.books += 1,
            }
        }
        stats.total = stats.shows + stats.movies + stats.books;
        stats
    }
}
