//! SQLite-based hashtag vocabulary.

use parking_lot::Mutex;
use rusqlite::{params, Connection};
use std::path::Path;

use crate::store_backend::{validate_hashtag, HashtagRepository, StoreResult};

pub struct SqliteHashtagStore {
    conn: Mutex<Connection>,
}

impl SqliteHashtagStore {
    pub fn new<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let store = Self {
            conn: Mutex::new(Connection::open(path)?),
        };
        store.init_schema()?;
        Ok(store)
    }

    pub fn in_memory() -> anyhow::Result<Self> {
        let store = Self {
            conn: Mutex::new(Connection::open_in_memory()?),
        };
        store.init_schema()?;
        Ok(store)
    }

    fn init_schema(&self) -> anyhow::Result<()> {
        self.conn.lock().execute_batch(
            "CREATE TABLE IF NOT EXISTS hashtags (name TEXT PRIMARY KEY NOT NULL);",
        )?;
        Ok(())
    }

    /// Seed the vocabulary, skipping tags that are already known.
    pub fn seed<'a>(&self, tags: impl IntoIterator<Item = &'a str>) -> StoreResult<()> {
        for tag in tags {
            self.add_hashtag(tag)?;
        }
        Ok(())
    }
}

impl HashtagRepository for SqliteHashtagStore {
    fn list_hashtags(&self) -> StoreResult<Vec<String>> {
        let conn = self.conn.lock();
        let mut stmt = conn.prepare("SELECT name FROM hashtags ORDER BY name")?;
        let rows = stmt.query_map([], |row| row.get::<_, String>(0))?;
        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }

    fn add_hashtag(&self, tag: &str) -> StoreResult<()> {
        validate_hashtag(tag)?;

        let inserted = self
            .conn
            .lock()
            .execute("INSERT OR IGNORE INTO hashtags (name) VALUES (?1)", params![tag])?;

        if inserted > 0 {
            tracing::debug!("Added hashtag: {}", tag);
        }
        Ok(())
    }

    fn contains(&self, tag: &str) -> StoreResult<bool> {
        let count: i64 = self.conn.lock().query_row(
            "SELECT COUNT(*) FROM hashtags WHERE name = ?1",
            params![tag],
            |row| row.get(0),
        )?;
        Ok(count > 0)
    }
}
