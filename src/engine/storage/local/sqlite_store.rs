use std::path::Path;
use std::time::Duration;

use anyhow::Result;
use r2d2::{Pool, PooledConnection};
use r2d2_sqlite::rusqlite::{params, OpenFlags, OptionalExtension};
use r2d2_sqlite::SqliteConnectionManager;

use crate::engine::storage::area::StorageArea;

/// SQLite-based local storage implementation.
///
/// One table holds every item; survives process restarts the way browser
/// local storage survives a page reload.
pub struct SqliteLocalStore {
    pool: Pool<SqliteConnectionManager>,
}

impl SqliteLocalStore {
    /// Opens (or creates) the database file at `path` and ensures the schema exists.
    pub fn new(path: impl AsRef<Path>) -> Result<Self> {
        let manager = SqliteConnectionManager::file(path.as_ref())
            .with_flags(OpenFlags::SQLITE_OPEN_READ_WRITE | OpenFlags::SQLITE_OPEN_CREATE)
            .with_init(|c| {
                c.busy_timeout(Duration::from_millis(500))?;
                c.execute_batch(
                    "CREATE TABLE IF NOT EXISTS local_storage (
                        key TEXT PRIMARY KEY NOT NULL,
                        value TEXT NOT NULL,
                        updated_at INTEGER NOT NULL DEFAULT (strftime('%s','now'))
                    );",
                )?;
                Ok(())
            });

        let pool = Pool::builder()
            .max_size(4)
            .connection_timeout(Duration::from_secs(5))
            .build(manager)?;

        log::debug!("opened sqlite local storage at {}", path.as_ref().display());
        Ok(Self { pool })
    }

    fn conn(&self) -> Result<PooledConnection<SqliteConnectionManager>> {
        Ok(self.pool.get()?)
    }
}

impl StorageArea for SqliteLocalStore {
    fn get_item(&self, key: &str) -> Option<String> {
        let conn = self.conn().ok()?;
        let lookup = conn
            .query_row(
                "SELECT value FROM local_storage WHERE key=?1",
                params![key],
                |row| row.get::<_, String>(0),
            )
            .optional();

        match lookup {
            Ok(value) => value,
            Err(e) => {
                log::error!("sqlite local storage: cannot read {key}: {e}");
                None
            }
        }
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        let conn = self.conn()?;
        conn.execute(
            "INSERT INTO local_storage(key,value) VALUES (?1,?2)
             ON CONFLICT(key) DO UPDATE
             SET value=excluded.value, updated_at=strftime('%s','now')",
            params![key, value],
        )?;
        Ok(())
    }

    fn len(&self) -> usize {
        let conn = match self.conn() {
            Ok(c) => c,
            Err(_) => return 0,
        };
        conn.query_row::<u32, _, _>("SELECT COUNT(*) FROM local_storage", [], |row| row.get(0))
            .unwrap_or(0) as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn area_contract() {
        let dir = tempfile::tempdir().unwrap();
        let store = SqliteLocalStore::new(dir.path().join("local.db")).unwrap();

        assert_eq!(store.len(), 0);
        assert!(store.get_item("missing").is_none());

        store.set_item("a", "1").unwrap();
        store.set_item("b", "2").unwrap();
        assert_eq!(store.len(), 2);

        store.set_item("a", "ONE").unwrap();
        assert_eq!(store.len(), 2);
        assert_eq!(store.get_item("a").as_deref(), Some("ONE"));
    }

    #[test]
    fn values_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("local.db");

        {
            let store = SqliteLocalStore::new(&path).unwrap();
            store
                .set_item("seat-A1-S098", r#"{"name":"Alice"}"#)
                .unwrap();
        }

        let reopened = SqliteLocalStore::new(&path).unwrap();
        assert_eq!(
            reopened.get_item("seat-A1-S098").as_deref(),
            Some(r#"{"name":"Alice"}"#)
        );
    }
}
