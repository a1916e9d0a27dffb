//! SQLite implementation of ItemRepository.

use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use itemstore_core::{Item, ItemRepository};
use rusqlite::{params, OptionalExtension, Row};
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::Database;

/// SQLite-backed implementation of ItemRepository.
pub struct SqliteItemRepository {
    db: Arc<Mutex<Database>>,
}

impl SqliteItemRepository {
    /// Create a new SQLite item repository.
    pub fn new(db: Arc<Mutex<Database>>) -> Self {
        Self { db }
    }

    /// Parse a datetime string to DateTime<Utc>.
    /// Handles both RFC3339 format and SQLite's `datetime('now')` format.
    fn parse_datetime(s: &str) -> DateTime<Utc> {
        if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
            return dt.with_timezone(&Utc);
        }

        if let Ok(dt) = chrono::NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S") {
            return dt.and_utc();
        }

        Utc::now()
    }

    fn row_to_item(row: &Row<'_>) -> rusqlite::Result<Item> {
        let id_str: String = row.get(0)?;
        let id = id_str.parse().map_err(|e: uuid::Error| {
            rusqlite::Error::FromSqlConversionFailure(0, rusqlite::types::Type::Text, Box::new(e))
        })?;
        Ok(Item {
            id,
            name: row.get(1)?,
            description: row.get(2)?,
            created_at: Self::parse_datetime(&row.get::<_, String>(3)?),
            updated_at: Self::parse_datetime(&row.get::<_, String>(4)?),
        })
    }
}

#[async_trait]
impl ItemRepository for SqliteItemRepository {
    async fn list(&self) -> Result<Vec<Item>> {
        let db = self.db.lock().await;
        let conn = db.connection();

        let mut stmt = conn.prepare(
            "SELECT id, name, description, created_at, updated_at
             FROM items
             ORDER BY created_at ASC, name ASC",
        )?;

        let items = stmt
            .query_map([], Self::row_to_item)?
            .collect::<Result<Vec<_>, _>>()?;

        tracing::debug!("[ItemRepository::list] Returning {} items", items.len());

        Ok(items)
    }

    async fn get(&self, id: &Uuid) -> Result<Option<Item>> {
        let db = self.db.lock().await;
        let conn = db.connection();

        let mut stmt = conn.prepare(
            "SELECT id, name, description, created_at, updated_at
             FROM items
             WHERE id = ?",
        )?;

        let item = stmt
            .query_row(params![id.to_string()], Self::row_to_item)
            .optional()?;

        Ok(item)
    }

    async fn create(&self, item: &Item) -> Result<()> {
        let db = self.db.lock().await;
        let conn = db.connection();

        conn.execute(
            "INSERT INTO items (id, name, description, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                item.id.to_string(),
                item.name,
                item.description,
                item.created_at.to_rfc3339(),
                item.updated_at.to_rfc3339(),
            ],
        )?;

        Ok(())
    }

    async fn update(&self, item: &Item) -> Result<()> {
        let db = self.db.lock().await;
        let conn = db.connection();

        let rows_affected = conn.execute(
            "UPDATE items
             SET name = ?2, description = ?3, updated_at = ?4
             WHERE id = ?1",
            params![
                item.id.to_string(),
                item.name,
                item.description,
                item.updated_at.to_rfc3339(),
            ],
        )?;

        if rows_affected == 0 {
            anyhow::bail!("Item not found: {}", item.id);
        }

        Ok(())
    }

    async fn delete(&self, id: &Uuid) -> Result<bool> {
        let db = self.db.lock().await;
        let conn = db.connection();

        let rows_affected =
            conn.execute("DELETE FROM items WHERE id = ?", params![id.to_string()])?;

        Ok(rows_affected > 0)
    }
}
