//! Application state for the web layer.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::{info, warn};

use crate::canonical;
use crate::config::{CacheConfig, SiteConfig};
use crate::domain::ScheduleDocument;
use crate::error::Error;

use super::cache::PageCache;

/// A loaded document and the reload count it came from.
struct Loaded {
    generation: u64,
    document: Arc<ScheduleDocument>,
}

impl Loaded {
    fn first(document: ScheduleDocument) -> Self {
        Self {
            generation: 0,
            document: Arc::new(document),
        }
    }
}

/// The loaded schedule, shared between requests.
///
/// Requests take an `Arc` snapshot and query it without holding the lock,
/// so a reload never blocks or changes a request already in flight. Each
/// successful reload bumps a generation number.
#[derive(Clone)]
pub struct SharedSchedule {
    inner: Arc<RwLock<Loaded>>,
    path: Option<PathBuf>,
}

impl SharedSchedule {
    /// Load the schedule file. Fails if it is missing or invalid.
    pub fn load(path: &Path) -> Result<Self, Error> {
        let document = canonical::load(path)?;
        Ok(Self {
            inner: Arc::new(RwLock::new(Loaded::first(document))),
            path: Some(path.to_path_buf()),
        })
    }

    /// Serve a fixed document that is never reloaded.
    pub fn fixed(document: ScheduleDocument) -> Self {
        Self {
            inner: Arc::new(RwLock::new(Loaded::first(document))),
            path: None,
        }
    }

    /// The current document.
    pub async fn snapshot(&self) -> Arc<ScheduleDocument> {
        self.versioned().await.1
    }

    /// The current document with its generation.
    pub async fn versioned(&self) -> (u64, Arc<ScheduleDocument>) {
        let guard = self.inner.read().await;
        (guard.generation, Arc::clone(&guard.document))
    }

    /// Re-read the schedule file.
    ///
    /// On success, replaces the current document and returns its service
    /// count. On failure, the existing document is preserved and the error
    /// is returned. Fixed schedules report their current size.
    pub async fn reload(&self) -> Result<usize, Error> {
        let Some(path) = &self.path else {
            return Ok(self.snapshot().await.len());
        };

        let document = canonical::load(path)?;
        let count = document.len();

        let mut guard = self.inner.write().await;
        guard.generation += 1;
        guard.document = Arc::new(document);

        Ok(count)
    }
}

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub schedule: SharedSchedule,

    /// Rendered HTML pages
    pub pages: Arc<PageCache>,

    pub site: Arc<SiteConfig>,
}

impl AppState {
    /// Create a new app state.
    pub fn new(schedule: SharedSchedule, site: SiteConfig, cache: &CacheConfig) -> Self {
        Self {
            schedule,
            pages: Arc::new(PageCache::new(cache)),
            site: Arc::new(site),
        }
    }

    /// Reload the schedule and drop cached pages rendered from the old one.
    ///
    /// A failed reload is logged and the previous schedule keeps serving.
    pub async fn reload(&self) -> bool {
        match self.schedule.reload().await {
            Ok(services) => {
                self.pages.invalidate_all();
                info!(services, "reloaded schedule");
                true
            }
            Err(e) => {
                warn!(error = %e, "schedule reload failed, keeping previous version");
                false
            }
        }
    }
}
