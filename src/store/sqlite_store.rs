//! SQLite-backed history store.
//!
//! Persists the visit log and a frecency-ranked top-sites snapshot.
//! Writers mark the snapshot dirty; `refresh_top_sites_cache_if_invalidated`
//! recomputes it. All SQLite work runs on the blocking pool behind the
//! async boundary.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::{SystemTime, UNIX_EPOCH};

use rusqlite::{params, Connection, OptionalExtension};
use uuid::Uuid;

use crate::config::DEFAULT_TOP_SITES_CACHE_SIZE;
use crate::database::Database;
use crate::types::errors::StoreError;
use crate::types::site::Site;

use super::{frecency_score, HistoryStore};

/// A snapshot older than this is invalidated regardless of the dirty flag.
const CACHE_MAX_AGE_SECS: i64 = 3 * 86_400;

/// History store backed by a SQLite [`Database`].
///
/// The connection is shared behind a mutex; each operation crosses to the
/// blocking pool, takes the lock, and releases it before resuming the
/// caller.
pub struct SqliteHistoryStore {
    db: Arc<Mutex<Database>>,
    cache_size: AtomicUsize,
}

impl SqliteHistoryStore {
    /// Wraps an opened database.
    pub fn new(db: Database) -> Self {
        Self {
            db: Arc::new(Mutex::new(db)),
            cache_size: AtomicUsize::new(DEFAULT_TOP_SITES_CACHE_SIZE),
        }
    }

    fn now() -> i64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs() as i64
    }

    /// Runs `f` against the connection on the blocking pool.
    async fn with_conn<T, F>(&self, f: F) -> Result<T, StoreError>
    where
        T: Send + 'static,
        F: FnOnce(&Connection) -> Result<T, StoreError> + Send + 'static,
    {
        let db = Arc::clone(&self.db);
        tokio::task::spawn_blocking(move || {
            let db = db
                .lock()
                .map_err(|_| StoreError::Database("history database lock poisoned".to_string()))?;
            f(db.connection())
        })
        .await
        .map_err(|e| StoreError::Database(format!("blocking task failed: {}", e)))?
    }

    /// Records a page visit at an explicit time. Upserts by URL: a repeat
    /// visit bumps `visit_count` and refreshes title/time/favicon. Marks
    /// the top-sites snapshot dirty. Returns the entry ID.
    pub async fn record_visit_at(
        &self,
        url: &str,
        title: &str,
        tile_url: &str,
        favicon_url: Option<&str>,
        visit_time: i64,
    ) -> Result<String, StoreError> {
        let url = url.to_string();
        let title = title.to_string();
        let tile_url = tile_url.to_string();
        let favicon_url = favicon_url.map(str::to_string);

        self.with_conn(move |conn| {
            let existing: Option<String> = conn
                .query_row(
                    "SELECT id FROM history WHERE url = ?1",
                    params![url],
                    |row| row.get(0),
                )
                .optional()
                .map_err(|e| StoreError::Database(e.to_string()))?;

            let id = match existing {
                Some(id) => {
                    conn.execute(
                        "UPDATE history SET visit_count = visit_count + 1, visit_time = ?1, \
                         title = ?2, favicon_url = ?3 WHERE id = ?4",
                        params![visit_time, title, favicon_url, id],
                    )
                    .map_err(|e| StoreError::Database(e.to_string()))?;
                    id
                }
                None => {
                    let id = Uuid::new_v4().to_string();
                    conn.execute(
                        "INSERT INTO history (id, url, title, tile_url, favicon_url, visit_time, visit_count) \
                         VALUES (?1, ?2, ?3, ?4, ?5, ?6, 1)",
                        params![id, url, title, tile_url, favicon_url, visit_time],
                    )
                    .map_err(|e| StoreError::Database(e.to_string()))?;
                    id
                }
            };

            mark_dirty(conn)?;
            Ok(id)
        })
        .await
    }

    /// Records a page visit timestamped now.
    pub async fn record_visit(
        &self,
        url: &str,
        title: &str,
        tile_url: &str,
        favicon_url: Option<&str>,
    ) -> Result<String, StoreError> {
        self.record_visit_at(url, title, tile_url, favicon_url, Self::now())
            .await
    }

    /// Deletes the visit log and the ranked snapshot, leaving the snapshot
    /// dirty so the next refresh rebuilds (to empty).
    pub async fn clear_history(&self) -> Result<(), StoreError> {
        self.with_conn(|conn| {
            conn.execute("DELETE FROM history", [])
                .map_err(|e| StoreError::Database(e.to_string()))?;
            conn.execute("DELETE FROM top_sites_cache", [])
                .map_err(|e| StoreError::Database(e.to_string()))?;
            mark_dirty(conn)?;
            Ok(())
        })
        .await
    }

    /// Total number of distinct URLs in the visit log.
    pub async fn history_count(&self) -> Result<usize, StoreError> {
        self.with_conn(|conn| {
            conn.query_row("SELECT COUNT(*) FROM history", [], |row| {
                row.get::<_, i64>(0)
            })
            .map(|n| n as usize)
            .map_err(|e| StoreError::Query(e.to_string()))
        })
        .await
    }
}

impl HistoryStore for SqliteHistoryStore {
    fn set_top_sites_cache_size(&self, n: usize) {
        self.cache_size.store(n, Ordering::Relaxed);
    }

    async fn is_top_sites_cache_dirty(&self, limit: usize) -> Result<bool, StoreError> {
        let now = Self::now();
        self.with_conn(move |conn| {
            if read_meta(conn, "dirty")? != 0 {
                return Ok(true);
            }
            if now - read_meta(conn, "refreshed_at")? > CACHE_MAX_AGE_SECS {
                return Ok(true);
            }

            // The snapshot must cover the requested limit, unless the
            // visit log itself holds fewer sites.
            let cached: i64 = conn
                .query_row("SELECT COUNT(*) FROM top_sites_cache", [], |row| row.get(0))
                .map_err(|e| StoreError::Query(e.to_string()))?;
            let total: i64 = conn
                .query_row("SELECT COUNT(*) FROM history", [], |row| row.get(0))
                .map_err(|e| StoreError::Query(e.to_string()))?;
            Ok(cached < (limit as i64).min(total))
        })
        .await
    }

    async fn refresh_top_sites_cache_if_invalidated(&self) -> Result<bool, StoreError> {
        let cache_size = self.cache_size.load(Ordering::Relaxed);
        let now = Self::now();
        self.with_conn(move |conn| {
            let dirty = read_meta(conn, "dirty")? != 0;
            let stale = now - read_meta(conn, "refreshed_at")? > CACHE_MAX_AGE_SECS;
            let cached: i64 = conn
                .query_row("SELECT COUNT(*) FROM top_sites_cache", [], |row| row.get(0))
                .map_err(|e| StoreError::CacheRefresh(e.to_string()))?;
            let total: i64 = conn
                .query_row("SELECT COUNT(*) FROM history", [], |row| row.get(0))
                .map_err(|e| StoreError::CacheRefresh(e.to_string()))?;
            if !dirty && !stale && cached >= (cache_size as i64).min(total) {
                return Ok(false);
            }

            recompute_cache(conn, cache_size, now)?;

            write_meta(conn, "dirty", 0)?;
            write_meta(conn, "refreshed_at", now)?;
            Ok(true)
        })
        .await
    }

    async fn get_top_sites(&self, limit: usize) -> Result<Vec<Site>, StoreError> {
        self.with_conn(move |conn| {
            let mut stmt = conn
                .prepare(
                    "SELECT site_id, url, title, tile_url, favicon_url, visit_time, visit_count \
                     FROM top_sites_cache ORDER BY rank LIMIT ?1",
                )
                .map_err(|e| StoreError::Query(e.to_string()))?;
            collect_sites(stmt.query_map(params![limit as i64], row_to_site))
        })
        .await
    }

    async fn get_recently_visited(&self, limit: usize) -> Result<Vec<Site>, StoreError> {
        self.with_conn(move |conn| {
            let mut stmt = conn
                .prepare(
                    "SELECT id, url, title, tile_url, favicon_url, visit_time, visit_count \
                     FROM history ORDER BY visit_time DESC LIMIT ?1",
                )
                .map_err(|e| StoreError::Query(e.to_string()))?;
            collect_sites(stmt.query_map(params![limit as i64], row_to_site))
        })
        .await
    }
}

/// Rebuilds the ranked snapshot: score every logged site, sort by
/// descending frecency (recency breaks ties), keep the top `cache_size`.
fn recompute_cache(conn: &Connection, cache_size: usize, now: i64) -> Result<(), StoreError> {
    let mut stmt = conn
        .prepare(
            "SELECT id, url, title, tile_url, favicon_url, visit_time, visit_count FROM history",
        )
        .map_err(|e| StoreError::CacheRefresh(e.to_string()))?;
    let sites = collect_sites(stmt.query_map([], row_to_site))
        .map_err(|e| StoreError::CacheRefresh(e.to_string()))?;

    let mut scored: Vec<(f64, Site)> = sites
        .into_iter()
        .map(|s| (frecency_score(s.visit_count, now - s.visit_time), s))
        .collect();
    scored.sort_by(|a, b| {
        b.0.partial_cmp(&a.0)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then(b.1.visit_time.cmp(&a.1.visit_time))
    });
    scored.truncate(cache_size);

    conn.execute("DELETE FROM top_sites_cache", [])
        .map_err(|e| StoreError::CacheRefresh(e.to_string()))?;
    for (rank, (score, site)) in scored.into_iter().enumerate() {
        conn.execute(
            "INSERT INTO top_sites_cache \
             (rank, site_id, url, title, tile_url, favicon_url, visit_time, visit_count, frecency) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
            params![
                rank as i64,
                site.id,
                site.url,
                site.title,
                site.tile_url,
                site.favicon_url,
                site.visit_time,
                site.visit_count,
                score
            ],
        )
        .map_err(|e| StoreError::CacheRefresh(e.to_string()))?;
    }
    Ok(())
}

fn row_to_site(row: &rusqlite::Row) -> rusqlite::Result<Site> {
    Ok(Site {
        id: row.get(0)?,
        url: row.get(1)?,
        title: row.get(2)?,
        tile_url: row.get(3)?,
        favicon_url: row.get(4)?,
        visit_time: row.get(5)?,
        visit_count: row.get(6)?,
    })
}

fn collect_sites<F>(
    rows: rusqlite::Result<rusqlite::MappedRows<'_, F>>,
) -> Result<Vec<Site>, StoreError>
where
    F: FnMut(&rusqlite::Row<'_>) -> rusqlite::Result<Site>,
{
    let rows = rows.map_err(|e| StoreError::Query(e.to_string()))?;
    let mut sites = Vec::new();
    for row in rows {
        sites.push(row.map_err(|e| StoreError::Query(e.to_string()))?);
    }
    Ok(sites)
}

fn read_meta(conn: &Connection, key: &str) -> Result<i64, StoreError> {
    conn.query_row(
        "SELECT value FROM cache_meta WHERE key = ?1",
        params![key],
        |row| row.get(0),
    )
    .map_err(|e| StoreError::Database(e.to_string()))
}

fn write_meta(conn: &Connection, key: &str, value: i64) -> Result<(), StoreError> {
    conn.execute(
        "UPDATE cache_meta SET value = ?2 WHERE key = ?1",
        params![key, value],
    )
    .map_err(|e| StoreError::Database(e.to_string()))?;
    Ok(())
}

fn mark_dirty(conn: &Connection) -> Result<(), StoreError> {
    write_meta(conn, "dirty", 1)
}
