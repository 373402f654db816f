//! Vibe tag editor
//!
//! Tags are free-form, ordered and duplicate free (exact string equality).
//! Insertion order is meaningful: truncated displays show the first few.

use thiserror::Error;

use crate::model::MediaPatch;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TagError {
    #[error("Tag index {index} out of range for {len} tags")]
    IndexOutOfRange { index: usize, len: usize },
}

/// Append `new_tag` (trimmed) unless it is blank or already present
pub fn add_tag(tags: &[String], new_tag: &str) -> Vec<String> {
    let mut updated = tags.to_vec();
    push_tag(&mut updated, new_tag);
    updated
}

/// Remove the tag at `index`
pub fn remove_tag(tags: &[String], index: usize) -> Result<Vec<String>, TagError> {
    if index >= tags.len() {
        return Err(TagError::IndexOutOfRange {
            index,
            len: tags.len(),
        });
    }
    let mut updated = tags.to_vec();
    updated.remove(index);
    Ok(updated)
}

/// Fold an arbitrary list through `add_tag`, starting from empty
pub fn normalize<S: AsRef<str>>(tags: &[S]) -> Vec<String> {
    let mut normalized = Vec::with_capacity(tags.len());
    for tag in tags {
        push_tag(&mut normalized, tag.as_ref());
    }
    normalized
}

fn push_tag(tags: &mut Vec<String>, new_tag: &str) -> bool {
    let trimmed = new_tag.trim();
    if trimmed.is_empty() || tags.iter().any(|t| t == trimmed) {
        return false;
    }
    tags.push(trimmed.to_string());
    true
}

/// Tag list of one item under edit
///
/// Each successful mutation returns the patch that must be sent to the store;
/// no-ops return `None` so callers skip the round trip.
#[derive(Debug, Clone)]
pub struct TagEditor {
    item_id: String,
    tags: Vec<String>,
}

impl TagEditor {
    pub fn new(item_id: impl Into<String>, tags: Vec<String>) -> Self {
        Self {
            item_id: item_id.into(),
            tags,
        }
    }

    pub fn item_id(&self) -> &str {
        &self.item_id
    }

    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    pub fn add(&mut self, new_tag: &str) -> Option<MediaPatch> {
        if push_tag(&mut self.tags, new_tag) {
            Some(MediaPatch::vibes(self.tags.clone()))
        } else {
            None
        }
    }

    pub fn remove(&mut self, index: usize) -> Result<MediaPatch, TagError> {
        self.tags = remove_tag(&self.tags, index)?;
        Ok(MediaPatch::vibes(self.tags.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tags(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_add_trims_and_appends() {
        assert_eq!(add_tag(&tags(&["cozy"]), "  intense "), tags(&["cozy", "intense"]));
    }

    #[test]
    fn test_add_duplicate_is_noop() {
        let once = add_tag(&[], "cozy");
        assert_eq!(add_tag(&once, "cozy"), tags(&["cozy"]));
        assert_eq!(add_tag(&once, " cozy "), tags(&["cozy"]));
    }

    #[test]
    fn test_add_is_case_sensitive() {
        assert_eq!(add_tag(&tags(&["cozy"]), "Cozy"), tags(&["cozy", "Cozy"]));
    }

    #[test]
    fn test_add_blank_is_noop() {
        let current = tags(&["cozy"]);
        assert_eq!(add_tag(&current, "   "), current);
        assert_eq!(add_tag(&current, ""), current);
    }

    #[test]
    fn test_remove_by_index() {
        let current = tags(&["a", "b", "c"]);
        assert_eq!(remove_tag(&current, 1).unwrap(), tags(&["a", "c"]));
    }

    #[test]
    fn test_remove_out_of_range() {
        assert_eq!(
            remove_tag(&tags(&["a"]), 1),
            Err(TagError::IndexOutOfRange { index: 1, len: 1 })
        );
        assert!(remove_tag(&[], 0).is_err());
    }

    #[test]
    fn test_normalize_keeps_first_occurrence() {
        assert_eq!(
            normalize(&["b", " a", "b", "", "a "]),
            tags(&["b", "a"])
        );
    }

    #[test]
    fn test_editor_emits_vibes_only_patch() {
        let mut editor = TagEditor::new("item-1", Vec::new());

        let patch = editor.add("cozy").expect("first add changes tags");
        assert_eq!(patch, MediaPatch::vibes(tags(&["cozy"])));
        assert!(patch.status.is_none() && patch.title.is_none());

        assert!(editor.add("cozy").is_none());
        assert!(editor.add(" ").is_none());

        let patch = editor.remove(0).unwrap();
        assert_eq!(patch.vibes, Some(Vec::new()));
        assert!(editor.remove(0).is_err());
    }
}
