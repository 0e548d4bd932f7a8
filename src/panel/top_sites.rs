//! Top-sites cache controller.
//!
//! Presents frecency-ranked top sites with minimal latency while staying
//! eventually consistent with the store's cache: stale items remain on
//! screen during revalidation, and a clean cache costs one dirty check
//! and no redraw.

use std::sync::{Arc, Mutex};

use crate::store::HistoryStore;
use crate::types::site::TopSiteItem;

use super::transform;
use super::RedrawSignal;

/// Owns the panel's `top_sites` state and the refresh/invalidate protocol.
pub struct TopSiteCacheController<S> {
    store: Arc<S>,
    redraw: Arc<RedrawSignal>,
    top_sites: Mutex<Vec<TopSiteItem>>,
}

impl<S: HistoryStore> TopSiteCacheController<S> {
    pub fn new(store: Arc<S>, redraw: Arc<RedrawSignal>) -> Self {
        Self {
            store,
            redraw,
            top_sites: Mutex::new(Vec::new()),
        }
    }

    /// Snapshot of the current items.
    pub fn top_sites(&self) -> Vec<TopSiteItem> {
        self.top_sites.lock().unwrap().clone()
    }

    pub fn is_empty(&self) -> bool {
        self.top_sites.lock().unwrap().is_empty()
    }

    /// Revalidates the top-sites section.
    ///
    /// Existing items are never cleared up front — stale-but-valid data
    /// stays visible while one async dirty check runs. Only a dirty cache
    /// or an empty local state triggers the expensive path (cache refresh,
    /// ranked query, transform, atomic replace, redraw). A clean cache
    /// with local data is a no-op without a redraw.
    ///
    /// Store failures are swallowed: the prior items are retained and no
    /// redraw is requested. Overlapping invocations are not serialized;
    /// the last one to complete wins.
    pub async fn refresh(&self, limit: usize) {
        let have_local = !self.top_sites.lock().unwrap().is_empty();

        let dirty = match self.store.is_top_sites_cache_dirty(limit).await {
            Ok(dirty) => dirty,
            Err(e) => {
                log::warn!("top-sites dirty check failed, keeping current items: {}", e);
                return;
            }
        };

        if !dirty && have_local {
            log::debug!("top-sites cache clean, no reload");
            return;
        }

        self.revalidate(limit).await;
    }

    /// Sync-finished variant: the dirty flag gates everything, so the
    /// frequent foreground-transition signal stays cheap. When the cache
    /// is clean nothing happens, even if no items are loaded yet.
    pub async fn refresh_if_dirty(&self, limit: usize) {
        match self.store.is_top_sites_cache_dirty(limit).await {
            Ok(true) => self.revalidate(limit).await,
            Ok(false) => log::debug!("top-sites cache clean after sync, no reload"),
            Err(e) => {
                log::warn!("top-sites dirty check failed, keeping current items: {}", e);
            }
        }
    }

    /// The expensive path: one idempotent cache refresh, one ranked query,
    /// transform, wholesale replacement.
    async fn revalidate(&self, limit: usize) {
        if let Err(e) = self.store.refresh_top_sites_cache_if_invalidated().await {
            log::warn!("top-sites cache refresh failed, keeping current items: {}", e);
            return;
        }

        let sites = match self.store.get_top_sites(limit).await {
            Ok(sites) => sites,
            Err(e) => {
                log::warn!("top-sites query failed, keeping current items: {}", e);
                return;
            }
        };

        let mut items = transform::top_site_items(&sites);
        items.truncate(limit);

        *self.top_sites.lock().unwrap() = items;
        self.redraw.request();
    }
}
