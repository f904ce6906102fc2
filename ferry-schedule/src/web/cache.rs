//! Cache of rendered day pages.
//!
//! Pages are pure functions of (document, date, direction, time format).
//! The key carries the document generation, so a page rendered from an
//! older document is never served after a reload. The TTL only bounds
//! memory; a reload also clears everything.

use std::sync::Arc;

use chrono::NaiveDate;
use moka::future::Cache as MokaCache;

use crate::config::CacheConfig;
use crate::schedule::DirectionFilter;

/// Cache key for day pages: (document generation, date, direction, 12-hour display).
pub type PageKey = (u64, NaiveDate, DirectionFilter, bool);

/// Rendered HTML, shared between responses.
pub type PageEntry = Arc<String>;

/// Cache for rendered HTML pages.
pub struct PageCache {
    pages: MokaCache<PageKey, PageEntry>,
}

impl PageCache {
    /// Create a new cache with the given configuration.
    pub fn new(config: &CacheConfig) -> Self {
        let pages = MokaCache::builder()
            .time_to_live(config.ttl)
            .max_capacity(config.max_capacity)
            .build();

        Self { pages }
    }

    pub async fn get(&self, key: &PageKey) -> Option<PageEntry> {
        self.pages.get(key).await
    }

    pub async fn insert(&self, key: PageKey, page: PageEntry) {
        self.pages.insert(key, page).await;
    }

    /// Get cache statistics (for monitoring).
    pub fn entry_count(&self) -> u64 {
        self.pages.entry_count()
    }

    /// Invalidate all cached pages.
    pub fn invalidate_all(&self) {
        self.pages.invalidate_all();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(day: u32, direction: DirectionFilter) -> PageKey {
        (0, NaiveDate::from_ymd_opt(2025, 6, day).unwrap(), direction, false)
    }

    #[tokio::test]
    async fn insert_and_get() {
        let cache = PageCache::new(&CacheConfig::default());
        let page = Arc::new("<html></html>".to_string());

        cache.insert(key(2, DirectionFilter::Any), page.clone()).await;

        assert_eq!(cache.get(&key(2, DirectionFilter::Any)).await, Some(page));
        assert_eq!(cache.get(&key(2, DirectionFilter::ArrivalsOnly)).await, None);
        assert_eq!(cache.get(&key(3, DirectionFilter::Any)).await, None);

        let (_, date, direction, twelve_hour) = key(2, DirectionFilter::Any);
        assert_eq!(cache.get(&(1, date, direction, twelve_hour)).await, None);
    }

    #[tokio::test]
    async fn invalidate_all_clears() {
        let cache = PageCache::new(&CacheConfig::default());
        cache.insert(key(2, DirectionFilter::Any), Arc::new(String::new())).await;

        cache.invalidate_all();
        assert_eq!(cache.get(&key(2, DirectionFilter::Any)).await, None);
    }

    #[test]
    fn cache_creation() {
        let cache = PageCache::new(&CacheConfig::default());
        assert_eq!(cache.entry_count(), 0);
    }
}
