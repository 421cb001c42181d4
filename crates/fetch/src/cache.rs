//! In-memory page cache.
//!
//! Pages are cached for the lifetime of the client (one page load) under
//! `(widget id, offset, limit)`. Entries are only ever added; there is no
//! eviction.

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

use plaudit_protocol::WidgetPayload;
use tracing::trace;

/// Identifies one page of one widget.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PageKey {
    /// The widget id.
    pub widget_id: String,
    /// Index of the first review in the page.
    pub offset: usize,
    /// Maximum number of reviews in the page.
    pub limit: usize,
}

impl PageKey {
    /// Creates a key.
    #[must_use]
    pub fn new(widget_id: impl Into<String>, offset: usize, limit: usize) -> Self {
        Self {
            widget_id: widget_id.into(),
            offset,
            limit,
        }
    }
}

/// Append-only cache of fetched pages.
///
/// # Examples
///
/// ```
/// use plaudit_fetch::{PageCache, PageKey};
/// use plaudit_protocol::WidgetPayload;
///
/// let cache = PageCache::default();
/// let key = PageKey::new("w_1", 0, 5);
/// assert!(cache.get(&key).is_none());
///
/// cache.insert(key.clone(), WidgetPayload::default());
/// assert!(cache.get(&key).is_some());
/// assert_eq!(cache.len(), 1);
/// ```
#[derive(Debug, Default)]
pub struct PageCache {
    pages: Mutex<HashMap<PageKey, WidgetPayload>>,
}

impl PageCache {
    /// Returns a copy of a cached page.
    #[must_use]
    pub fn get(&self, key: &PageKey) -> Option<WidgetPayload> {
        let hit = self.lock().get(key).cloned();
        trace!(?key, hit = hit.is_some(), "page cache lookup");
        hit
    }

    /// Stores a page, replacing an earlier copy under the same key.
    pub fn insert(&self, key: PageKey, page: WidgetPayload) {
        self.lock().insert(key, page);
    }

    /// Number of cached pages.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Returns `true` if nothing is cached.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<PageKey, WidgetPayload>> {
        self.pages.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
