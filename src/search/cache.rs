//! Session-lifetime result cache.

use super::request::CacheKey;
use crate::domain::Journal;
use std::collections::HashMap;

/// Maps canonical request keys to the result sets they produced.
///
/// Grows for the lifetime of the plugin instance; nothing is evicted.
#[derive(Debug, Clone, Default)]
pub struct SearchCache {
    entries: HashMap<CacheKey, Vec<Journal>>,
}

impl SearchCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn get(&self, key: &CacheKey) -> Option<&[Journal]> {
        self.entries.get(key).map(Vec::as_slice)
    }

    pub fn insert(&mut self, key: CacheKey, results: Vec<Journal>) {
        self.entries.insert(key, results);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
