//! # Aggregate Repository
//!
//! SQLite-backed storage for the item aggregate. Connections are opened
//! per request and the schema is created on open, so a fresh database
//! file is usable immediately.
//!
//! All row-level functions in [`items`] take `&Connection`; since
//! `rusqlite::Transaction` derefs to `Connection`, the same functions
//! run inside or outside a transaction. Transaction scoping stays with
//! the caller.

mod items;

pub use items::*;

use std::path::Path;

use rusqlite::Connection;

/// Open (and if necessary bootstrap) the database at `path`.
pub fn open(path: impl AsRef<Path>) -> Result<Connection, rusqlite::Error> {
    let conn = Connection::open(path)?;
    conn.execute_batch(
        r#"
        PRAGMA journal_mode=WAL;
        PRAGMA synchronous=NORMAL;
        PRAGMA foreign_keys=ON;
        PRAGMA busy_timeout=5000;
        "#,
    )?;
    migrate(&conn)?;
    Ok(conn)
}

/// Open a private in-memory database. Test-friendly; never shared.
pub fn open_in_memory() -> Result<Connection, rusqlite::Error> {
    let conn = Connection::open_in_memory()?;
    conn.execute_batch("PRAGMA foreign_keys=ON;")?;
    migrate(&conn)?;
    Ok(conn)
}

fn migrate(conn: &Connection) -> Result<(), rusqlite::Error> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS items (
          item_id       INTEGER PRIMARY KEY AUTOINCREMENT,
          product_id    INTEGER NOT NULL,
          storefront_id INTEGER NOT NULL,
          headlines     TEXT NOT NULL UNIQUE,
          description   TEXT NOT NULL,
          minimum_order INTEGER NOT NULL,
          price         INTEGER NOT NULL,
          display_flag  INTEGER NOT NULL,
          created_at    TEXT NOT NULL,
          updated_at    TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS dimensions (
          dimension_id INTEGER PRIMARY KEY AUTOINCREMENT,
          item_id      INTEGER NOT NULL,
          width        REAL NOT NULL,
          height       REAL NOT NULL
        );

        CREATE TABLE IF NOT EXISTS locations (
          location_id INTEGER PRIMARY KEY AUTOINCREMENT,
          country_id  INTEGER NOT NULL,
          province_id INTEGER NOT NULL,
          city_id     INTEGER NOT NULL,
          latitude    TEXT NOT NULL,
          longitude   TEXT NOT NULL,
          title       TEXT NOT NULL,
          address     TEXT NOT NULL,
          google_maps TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS item_x_locations (
          item_x_location_id INTEGER PRIMARY KEY AUTOINCREMENT,
          item_id            INTEGER NOT NULL,
          location_id        INTEGER NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_dimensions_item_id ON dimensions(item_id);
        CREATE INDEX IF NOT EXISTS idx_item_x_locations_item_id ON item_x_locations(item_id);
        "#,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_creates_schema() {
        let dir = tempfile::tempdir().unwrap();
        let conn = open(dir.path().join("items.db")).unwrap();
        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM items", [], |row| row.get(0))
            .unwrap();
        assert_eq!(count, 0);
    }

    #[test]
    fn test_open_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("items.db");
        drop(open(&path).unwrap());
        // Second open must not fail on the existing schema
        drop(open(&path).unwrap());
    }
}
