//! SQLite-based post storage.

use parking_lot::Mutex;
use rusqlite::{params, Connection};
use std::path::Path;

use crate::post::Post;
use crate::store_backend::{PostRepository, StoreError, StoreResult};

const SELECT_COLUMNS: &str = "SELECT id, hashtags, city, weather, temp, date, user_id FROM posts";

pub struct SqlitePostStore {
    conn: Mutex<Connection>,
}

impl SqlitePostStore {
    /// Open (or create) the store at the given path.
    pub fn new<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let conn = Connection::open(path)?;
        let store = Self {
            conn: Mutex::new(conn),
        };
        store.init_schema()?;
        Ok(store)
    }

    pub fn in_memory() -> anyhow::Result<Self> {
        let conn = Connection::open_in_memory()?;
        let store = Self {
            conn: Mutex::new(conn),
        };
        store.init_schema()?;
        Ok(store)
    }

    fn init_schema(&self) -> anyhow::Result<()> {
        self.conn.lock().execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS posts (
                id INTEGER PRIMARY KEY,
                hashtags TEXT NOT NULL,
                city TEXT NOT NULL,
                weather TEXT NOT NULL,
                temp TEXT NOT NULL,
                date TEXT NOT NULL,
                user_id TEXT NOT NULL
            );

            CREATE INDEX IF NOT EXISTS idx_posts_user ON posts(user_id);
            "#,
        )?;
        Ok(())
    }

    fn row_to_post(row: &rusqlite::Row) -> rusqlite::Result<Post> {
        let hashtags_str: String = row.get(1)?;
        let city_str: String = row.get(2)?;

        let hashtags: Vec<String> = serde_json::from_str(&hashtags_str).map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(1, rusqlite::types::Type::Text, Box::new(e))
        })?;
        let city = city_str.parse().map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(2, rusqlite::types::Type::Text, Box::new(e))
        })?;

        Ok(Post {
            id: row.get(0)?,
            hashtags,
            city,
            condition_description: row.get(3)?,
            temperature: row.get(4)?,
            date: row.get(5)?,
            user_id: row.get(6)?,
        })
    }

    fn query_posts(&self, sql: &str, args: &[&dyn rusqlite::ToSql]) -> StoreResult<Vec<Post>> {
        let conn = self.conn.lock();
        let mut stmt = conn.prepare(sql)?;
        let rows = stmt.query_map(args, Self::row_to_post)?;
        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }
}

impl PostRepository for SqlitePostStore {
    fn save_post(&self, post: Post) -> StoreResult<()> {
        if post.hashtags.is_empty() {
            return Err(StoreError::validation("Post must have at least one hashtag"));
        }

        let hashtags = serde_json::to_string(&post.hashtags)
            .map_err(|e| StoreError::validation(e.to_string()))?;

        self.conn.lock().execute(
            r#"
            INSERT INTO posts (id, hashtags, city, weather, temp, date, user_id)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            "#,
            params![
                post.id,
                hashtags,
                post.city.as_str(),
                post.condition_description,
                post.temperature,
                post.date,
                post.user_id,
            ],
        )?;

        tracing::debug!("Saved post: {}", post.id);
        Ok(())
    }

    fn list_posts(&self) -> StoreResult<Vec<Post>> {
        self.query_posts(&format!("{SELECT_COLUMNS} ORDER BY id DESC"), &[])
    }

    fn list_posts_for_user(&self, user_id: &str) -> StoreResult<Vec<Post>> {
        self.query_posts(
            &format!("{SELECT_COLUMNS} WHERE user_id = ?1 ORDER BY id DESC"),
            &[&user_id],
        )
    }

    fn get_post(&self, id: i64) -> StoreResult<Option<Post>> {
        let mut posts = self.query_posts(&format!("{SELECT_COLUMNS} WHERE id = ?1"), &[&id])?;
        Ok(posts.pop())
    }

    fn delete_post(&self, id: i64) -> StoreResult<()> {
        let deleted = self
            .conn
            .lock()
            .execute("DELETE FROM posts WHERE id = ?1", params![id])?;

        if deleted == 0 {
            return Err(StoreError::NotFound(id));
        }

        tracing::debug!("Deleted post: {}", id);
        Ok(())
    }

    fn count(&self) -> StoreResult<usize> {
        let count: i64 = self
            .conn
            .lock()
            .query_row("SELECT COUNT(*) FROM posts", [], |row| row.get(0))?;
        Ok(count as usize)
    }
}
