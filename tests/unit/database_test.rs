//! Unit tests for the database layer: migrations, schema version
//! tracking, and reopening an existing file.

use activitystream::database::{migrations, Database};

#[test]
fn test_open_in_memory_runs_migrations() {
    let db = Database::open_in_memory().expect("Failed to open in-memory database");
    assert_eq!(
        migrations::get_schema_version(db.connection()),
        migrations::CURRENT_SCHEMA_VERSION
    );
}

#[test]
fn test_expected_tables_exist() {
    let db = Database::open_in_memory().expect("Failed to open in-memory database");

    for table in ["history", "top_sites_cache", "cache_meta", "schema_version"] {
        let count: i64 = db
            .connection()
            .query_row(
                "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = ?1",
                [table],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(count, 1, "missing table {}", table);
    }
}

#[test]
fn test_cache_starts_dirty() {
    // A fresh database has no snapshot, so the dirty flag is seeded set.
    let db = Database::open_in_memory().expect("Failed to open in-memory database");
    let dirty: i64 = db
        .connection()
        .query_row(
            "SELECT value FROM cache_meta WHERE key = 'dirty'",
            [],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(dirty, 1);
}

#[test]
fn test_migrations_are_idempotent() {
    let db = Database::open_in_memory().expect("Failed to open in-memory database");
    migrations::run_all(db.connection()).expect("re-running migrations should succeed");
    assert_eq!(
        migrations::get_schema_version(db.connection()),
        migrations::CURRENT_SCHEMA_VERSION
    );
}

#[test]
fn test_reopen_preserves_data() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("history.db");

    {
        let db = Database::open(&path).expect("Failed to open database");
        db.connection()
            .execute(
                "INSERT INTO history (id, url, title, tile_url, visit_time, visit_count) \
                 VALUES ('a', 'https://example.com', 'Example', 'https://example.com', 1, 1)",
                [],
            )
            .unwrap();
    }

    let db = Database::open(&path).expect("Failed to reopen database");
    let count: i64 = db
        .connection()
        .query_row("SELECT COUNT(*) FROM history", [], |row| row.get(0))
        .unwrap();
    assert_eq!(count, 1);
}
