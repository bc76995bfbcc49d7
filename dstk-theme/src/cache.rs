//! Memoization of resolved styles by request identity.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::error::ThemeResult;
use crate::request::StyleRequest;
use crate::style::ResolvedStyle;
use crate::variant::VariantResolver;

/// Entries held by [StyleCache::new] before it starts over.
pub const DEFAULT_CACHE_LIMIT: usize = 1024;

/// A thread-safe memo from [StyleRequest] to its [ResolvedStyle].
///
/// Resolution is a pure function of the request once the resolver is sealed,
/// so a cache can be shared across threads for the resolver's lifetime.
/// Entries are keyed by request only: a cache must only ever be used with one
/// resolver. Failed resolutions are never stored.
///
/// Raw overrides make the key space unbounded, so the cache holds at most
/// `limit` entries and is emptied when an insert would exceed it.
#[derive(Debug)]
pub struct StyleCache {
    entries: RwLock<HashMap<StyleRequest, Arc<ResolvedStyle>>>,
    limit: usize,
}

impl Default for StyleCache {
    fn default() -> Self {
        Self::with_limit(DEFAULT_CACHE_LIMIT)
    }
}

impl StyleCache {
    /// Create an empty cache holding up to [DEFAULT_CACHE_LIMIT] entries.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty cache holding up to `limit` entries.
    ///
    /// A limit of zero disables storage.
    pub fn with_limit(limit: usize) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            limit,
        }
    }

    /// The maximum number of cached styles.
    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Return the cached style for `request`, resolving and storing it on a miss.
    pub fn get_or_resolve(
        &self,
        resolver: &VariantResolver,
        request: &StyleRequest,
    ) -> ThemeResult<Arc<ResolvedStyle>> {
        if let Ok(entries) = self.entries.read() {
            if let Some(style) = entries.get(request) {
                return Ok(Arc::clone(style));
            }
        }

        let style = Arc::new(resolver.resolve(request)?);
        if self.limit == 0 {
            return Ok(style);
        }
        if let Ok(mut entries) = self.entries.write() {
            if entries.len() >= self.limit && !entries.contains_key(request) {
                log::debug!("Style cache reached {} entries, starting over", self.limit);
                entries.clear();
            }
            entries.insert(request.clone(), Arc::clone(&style));
        }
        Ok(style)
    }

    /// Drop every cached style.
    pub fn clear(&self) {
        if let Ok(mut entries) = self.entries.write() {
            entries.clear();
        }
    }

    /// Number of cached styles.
    pub fn len(&self) -> usize {
        self.entries.read().map(|entries| entries.len()).unwrap_or(0)
    }

    /// Whether nothing is cached.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
