//! Selecting and creating clothing hashtags for a draft.

use std::sync::Arc;

use thiserror::Error;

use crate::store_backend::{validate_hashtag, HashtagRepository, StoreError, StoreResult};

#[derive(Debug, Error)]
pub enum TagError {
    #[error("Tag is empty")]
    Empty,
    #[error("Tag already selected: {0}")]
    Duplicate(String),
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Strip surrounding whitespace and a single leading `#`.
pub fn normalize_tag(raw: &str) -> String {
    let trimmed = raw.trim();
    trimmed.strip_prefix('#').unwrap_or(trimmed).trim().to_string()
}

#[derive(Clone)]
pub struct TagPicker {
    repository: Arc<dyn HashtagRepository>,
}

impl TagPicker {
    pub fn new(repository: Arc<dyn HashtagRepository>) -> Self {
        Self { repository }
    }

    pub fn vocabulary(&self) -> StoreResult<Vec<String>> {
        self.repository.list_hashtags()
    }

    /// Known tags starting with `prefix` that aren't already in `selected`.
    pub fn suggestions(&self, selected: &[String], prefix: &str) -> StoreResult<Vec<String>> {
        let prefix = normalize_tag(prefix);
        Ok(self
            .repository
            .list_hashtags()?
            .into_iter()
            .filter(|t| t.starts_with(&prefix) && !selected.contains(t))
            .collect())
    }

    /// Add a tag to `selected`, recording it in the vocabulary if new.
    ///
    /// Returns the normalized tag.
    ///
    /// # Errors
    /// `Empty` / `Duplicate` for unusable input; `Store` if the vocabulary
    /// rejects or fails to record the tag.
    pub fn select(&self, selected: &mut Vec<String>, raw: &str) -> Result<String, TagError> {
        let tag = normalize_tag(raw);
        if tag.is_empty() {
            return Err(TagError::Empty);
        }
        if selected.contains(&tag) {
            return Err(TagError::Duplicate(tag));
        }
        validate_hashtag(&tag)?;

        if !self.repository.contains(&tag)? {
            self.repository.add_hashtag(&tag)?;
            tracing::debug!("New hashtag recorded: {}", tag);
        }

        selected.push(tag.clone());
        Ok(tag)
    }

    /// Returns whether the tag was selected.
    pub fn remove(&self, selected: &mut Vec<String>, tag: &str) -> bool {
        let tag = normalize_tag(tag);
        let before = selected.len();
        selected.retain(|t| *t != tag);
        selected.len() != before
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::hashtag_store::SqliteHashtagStore;

    fn picker() -> (TagPicker, Arc<SqliteHashtagStore>) {
        let store = Arc::new(SqliteHashtagStore::in_memory().unwrap());
        store.seed(["코트", "목도리", "니트"]).unwrap();
        (TagPicker::new(store.clone()), store)
    }

    #[test]
    fn test_normalize_tag() {
        assert_eq!(normalize_tag("  #코트 "), "코트");
        assert_eq!(normalize_tag("니트"), "니트");
        assert_eq!(normalize_tag("#"), "");
    }

    #[test]
    fn test_select_known_tag() {
        let (picker, _) = picker();
        let mut selected = Vec::new();
        assert_eq!(picker.select(&mut selected, "#코트").unwrap(), "코트");
        assert_eq!(selected, vec!["코트"]);
    }

    #[test]
    fn test_select_new_tag_records_it() {
        let (picker, store) = picker();
        let mut selected = Vec::new();
        picker.select(&mut selected, "패딩").unwrap();
        assert!(store.contains("패딩").unwrap());
        assert_eq!(picker.vocabulary().unwrap().len(), 4);
    }

    #[test]
    fn test_select_duplicate() {
        let (picker, _) = picker();
        let mut selected = vec!["코트".to_string()];
        assert!(matches!(
            picker.select(&mut selected, "코트"),
            Err(TagError::Duplicate(_))
        ));
        assert_eq!(selected.len(), 1);
    }

    #[test]
    fn test_select_empty() {
        let (picker, _) = picker();
        let mut selected = Vec::new();
        assert!(matches!(picker.select(&mut selected, "  "), Err(TagError::Empty)));
    }

    #[test]
    fn test_select_invalid_not_recorded() {
        let (picker, store) = picker();
        let mut selected = Vec::new();
        assert!(matches!(
            picker.select(&mut selected, "긴 팔"),
            Err(TagError::Store(StoreError::Validation(_)))
        ));
        assert!(selected.is_empty());
        assert!(!store.contains("긴 팔").unwrap());
    }

    #[test]
    fn test_suggestions_exclude_selected() {
        let (picker, _) = picker();
        let selected = vec!["목도리".to_string()];
        assert_eq!(picker.suggestions(&selected, "").unwrap(), vec!["니트", "코트"]);
        assert_eq!(picker.suggestions(&[], "#코").unwrap(), vec!["코트"]);
    }

    #[test]
    fn test_remove() {
        let (picker, _) = picker();
        let mut selected = vec!["코트".to_string(), "니트".to_string()];
        assert!(picker.remove(&mut selected, "코트"));
        assert!(!picker.remove(&mut selected, "코트"));
        assert_eq!(selected, vec!["니트"]);
    }
}
