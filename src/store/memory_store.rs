//! Scriptable in-memory history store.
//!
//! The test double the injected [`HistoryStore`] boundary exists for:
//! holds a ranked site list, a dirty flag, failure switches, and records
//! every call so tests can assert the exact store traffic. Queries can be
//! gated on oneshot channels to script overlapping-refresh interleavings.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

use tokio::sync::oneshot;

use crate::config::DEFAULT_TOP_SITES_CACHE_SIZE;
use crate::types::errors::StoreError;
use crate::types::site::Site;

use super::HistoryStore;

/// One recorded store call, in invocation order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreCall {
    SetCacheSize(usize),
    DirtyCheck(usize),
    RefreshCache,
    TopSites(usize),
    RecentlyVisited(usize),
}

/// In-memory [`HistoryStore`] with scripted behavior.
#[derive(Default)]
pub struct MemoryHistoryStore {
    /// Ranked site list; `get_top_sites` returns a prefix of it.
    sites: Mutex<Vec<Site>>,
    calls: Mutex<Vec<StoreCall>>,
    dirty: AtomicBool,
    cache_size: AtomicUsize,
    fail_dirty_check: AtomicBool,
    fail_refresh: AtomicBool,
    fail_queries: AtomicBool,
    /// Pending gates for `get_top_sites`; each call consumes one in FIFO
    /// order and waits for its payload.
    top_sites_gates: Mutex<VecDeque<oneshot::Receiver<Vec<Site>>>>,
}

impl MemoryHistoryStore {
    pub fn new() -> Self {
        Self {
            cache_size: AtomicUsize::new(DEFAULT_TOP_SITES_CACHE_SIZE),
            ..Self::default()
        }
    }

    /// Replaces the ranked site list.
    pub fn set_sites(&self, sites: Vec<Site>) {
        *self.sites.lock().unwrap() = sites;
    }

    pub fn set_dirty(&self, dirty: bool) {
        self.dirty.store(dirty, Ordering::SeqCst);
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty.load(Ordering::SeqCst)
    }

    pub fn cache_size(&self) -> usize {
        self.cache_size.load(Ordering::SeqCst)
    }

    /// Makes `is_top_sites_cache_dirty` fail until cleared.
    pub fn fail_dirty_check(&self, fail: bool) {
        self.fail_dirty_check.store(fail, Ordering::SeqCst);
    }

    /// Makes `refresh_top_sites_cache_if_invalidated` fail until cleared.
    pub fn fail_refresh(&self, fail: bool) {
        self.fail_refresh.store(fail, Ordering::SeqCst);
    }

    /// Makes query methods fail until cleared.
    pub fn fail_queries(&self, fail: bool) {
        self.fail_queries.store(fail, Ordering::SeqCst);
    }

    /// Queues a gate: the next ungated `get_top_sites` call suspends until
    /// the paired sender supplies its response. Gates apply in FIFO order.
    pub fn gate_top_sites(&self) -> oneshot::Sender<Vec<Site>> {
        let (tx, rx) = oneshot::channel();
        self.top_sites_gates.lock().unwrap().push_back(rx);
        tx
    }

    /// Every call made so far, in order.
    pub fn calls(&self) -> Vec<StoreCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn clear_calls(&self) {
        self.calls.lock().unwrap().clear();
    }

    fn record(&self, call: StoreCall) {
        self.calls.lock().unwrap().push(call);
    }
}

impl HistoryStore for MemoryHistoryStore {
    fn set_top_sites_cache_size(&self, n: usize) {
        self.record(StoreCall::SetCacheSize(n));
        self.cache_size.store(n, Ordering::SeqCst);
    }

    async fn is_top_sites_cache_dirty(&self, limit: usize) -> Result<bool, StoreError> {
        self.record(StoreCall::DirtyCheck(limit));
        if self.fail_dirty_check.load(Ordering::SeqCst) {
            return Err(StoreError::Query("scripted dirty-check failure".to_string()));
        }
        Ok(self.dirty.load(Ordering::SeqCst))
    }

    async fn refresh_top_sites_cache_if_invalidated(&self) -> Result<bool, StoreError> {
        self.record(StoreCall::RefreshCache);
        if self.fail_refresh.load(Ordering::SeqCst) {
            return Err(StoreError::CacheRefresh(
                "scripted refresh failure".to_string(),
            ));
        }
        Ok(self.dirty.swap(false, Ordering::SeqCst))
    }

    async fn get_top_sites(&self, limit: usize) -> Result<Vec<Site>, StoreError> {
        self.record(StoreCall::TopSites(limit));

        let gate = self.top_sites_gates.lock().unwrap().pop_front();
        if let Some(rx) = gate {
            let mut sites = rx
                .await
                .map_err(|_| StoreError::Query("gate sender dropped".to_string()))?;
            sites.truncate(limit);
            return Ok(sites);
        }

        if self.fail_queries.load(Ordering::SeqCst) {
            return Err(StoreError::Query("scripted query failure".to_string()));
        }
        let mut sites = self.sites.lock().unwrap().clone();
        sites.truncate(limit);
        Ok(sites)
    }

    async fn get_recently_visited(&self, limit: usize) -> Result<Vec<Site>, StoreError> {
        self.record(StoreCall::RecentlyVisited(limit));
        if self.fail_queries.load(Ordering::SeqCst) {
            return Err(StoreError::Query("scripted query failure".to_string()));
        }
        let mut sites = self.sites.lock().unwrap().clone();
        sites.sort_by(|a, b| b.visit_time.cmp(&a.visit_time));
        sites.truncate(limit);
        Ok(sites)
    }
}
