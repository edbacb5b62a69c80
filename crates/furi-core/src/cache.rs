//! Process-wide memo of rendered annotations.
//!
//! Entries are keyed by source text plus the sorted highlight set, since the
//! same text renders differently under different highlights. There is no
//! eviction: the cache lives as long as the hosting context and is dropped or
//! `clear`ed on teardown.

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use crate::highlight::HighlightSet;

/// Composite key: `(source text, highlight surfaces in sorted order)`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    text: String,
    highlights: Vec<String>,
}

impl CacheKey {
    pub fn new(text: &str, highlights: &HighlightSet) -> Self {
        Self {
            text: text.to_string(),
            highlights: highlights.iter().map(str::to_string).collect(),
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn highlights(&self) -> &[String] {
        &self.highlights
    }
}

/// Shared between the selection controller, its worker and batch runs; wrap
/// it in an `Arc`.
#[derive(Debug, Default)]
pub struct AnnotationCache {
    entries: RwLock<HashMap<CacheKey, String>>,
}

impl AnnotationCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &CacheKey) -> Option<String> {
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        entries.get(key).cloned()
    }

    pub fn set(&self, key: CacheKey, html: String) {
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        entries.insert(key, html);
    }

    pub fn contains(&self, key: &CacheKey) -> bool {
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        entries.clear();
    }
}
