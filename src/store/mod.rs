//! The history store boundary.
//!
//! The panel layer only ever talks to [`HistoryStore`]; the store decides
//! how sites are persisted and ranked. [`SqliteHistoryStore`] is the real
//! implementation, [`MemoryHistoryStore`] a scriptable double for tests.

pub mod memory_store;
pub mod sqlite_store;

pub use memory_store::MemoryHistoryStore;
pub use sqlite_store::SqliteHistoryStore;

use crate::types::errors::StoreError;
use crate::types::site::Site;

/// Async contract the panel consumes.
///
/// Every method except [`set_top_sites_cache_size`](Self::set_top_sites_cache_size)
/// is a suspension point; implementations may run work on separate
/// executors internally. The store is shared across all panel instances
/// and is expected to synchronize itself.
#[allow(async_fn_in_trait)]
pub trait HistoryStore: Send + Sync {
    /// Bounds the frecency-ranked cache. Called once at panel construction.
    fn set_top_sites_cache_size(&self, n: usize);

    /// Whether the ranked cache may no longer reflect current visit data,
    /// judged against `limit` and the invalidation window.
    async fn is_top_sites_cache_dirty(&self, limit: usize) -> Result<bool, StoreError>;

    /// Recomputes the ranked cache if it is invalidated. Idempotent; safe
    /// to call when clean. Returns whether a recompute actually ran.
    async fn refresh_top_sites_cache_if_invalidated(&self) -> Result<bool, StoreError>;

    /// The top `limit` sites by descending frecency, from the cache.
    async fn get_top_sites(&self, limit: usize) -> Result<Vec<Site>, StoreError>;

    /// The `limit` most recently visited sites, most recent first.
    async fn get_recently_visited(&self, limit: usize) -> Result<Vec<Site>, StoreError>;
}

/// Seconds a site stays in each recency bucket.
const DAY_SECS: i64 = 86_400;

/// Ranking score combining visit frequency and recency.
///
/// The visit count is weighted by how recently the site was last visited;
/// a site untouched for months scores a tenth of one visited this week at
/// the same count. Negative inputs clamp to zero.
pub fn frecency_score(visit_count: i32, age_secs: i64) -> f64 {
    let weight = match age_secs.max(0) {
        a if a < 4 * DAY_SECS => 100.0,
        a if a < 14 * DAY_SECS => 70.0,
        a if a < 31 * DAY_SECS => 50.0,
        a if a < 90 * DAY_SECS => 30.0,
        _ => 10.0,
    };
    f64::from(visit_count.max(0)) * weight
}
