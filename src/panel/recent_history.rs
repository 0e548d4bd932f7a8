//! Recent-history loader.

use std::sync::{Arc, Mutex};

use crate::store::HistoryStore;
use crate::types::site::Site;

use super::RedrawSignal;

/// Owns the panel's `history` state: the N most recently visited sites,
/// recomputed fully on each reload.
pub struct RecentHistoryLoader<S> {
    store: Arc<S>,
    redraw: Arc<RedrawSignal>,
    history: Mutex<Vec<Site>>,
}

impl<S: HistoryStore> RecentHistoryLoader<S> {
    pub fn new(store: Arc<S>, redraw: Arc<RedrawSignal>) -> Self {
        Self {
            store,
            redraw,
            history: Mutex::new(Vec::new()),
        }
    }

    /// Snapshot of the current rows, most recent first.
    pub fn history(&self) -> Vec<Site> {
        self.history.lock().unwrap().clone()
    }

    pub fn len(&self) -> usize {
        self.history.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.history.lock().unwrap().is_empty()
    }

    /// Fetches the `limit` most recent visits and replaces the rows
    /// wholesale. On failure the prior rows are retained and no redraw is
    /// requested.
    pub async fn reload(&self, limit: usize) {
        match self.store.get_recently_visited(limit).await {
            Ok(sites) => {
                *self.history.lock().unwrap() = sites;
                self.redraw.request();
            }
            Err(e) => {
                log::warn!("recent history reload failed, keeping current rows: {}", e);
            }
        }
    }
}
