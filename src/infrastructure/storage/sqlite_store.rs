use async_trait::async_trait;
use serde_json::Value;
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::{Pool, Row, Sqlite};

use crate::application::ports::{Collection, KeyValueStore, LocalStore, StoreKey, StoredEntry};
use crate::domain::value_objects::LocalKey;
use crate::shared::config::DatabaseConfig;
use crate::shared::error::{AppError, Result};

/// Open the pool and create the schema idempotently.
pub async fn connect(config: &DatabaseConfig) -> Result<Pool<Sqlite>> {
    let pool = SqlitePoolOptions::new()
        .max_connections(config.max_connections)
        .connect(&config.url)
        .await?;
    init_schema(&pool).await?;
    Ok(pool)
}

pub async fn init_schema(pool: &Pool<Sqlite>) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS local_entries (
            seq INTEGER PRIMARY KEY AUTOINCREMENT,
            collection TEXT NOT NULL,
            natural_key TEXT,
            value TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE UNIQUE INDEX IF NOT EXISTS idx_local_entries_natural
        ON local_entries(collection, natural_key)
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS kv_entries (
            key TEXT PRIMARY KEY,
            value TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

/// Object store over named collections. Queue rows are keyed by the
/// autoincrementing `seq`, so insertion order is `seq` order; mirror rows
/// are keyed by their natural key. Each call is a single statement, hence
/// atomic.
pub struct SqliteLocalStore {
    pool: Pool<Sqlite>,
}

impl SqliteLocalStore {
    pub fn new(pool: Pool<Sqlite>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LocalStore for SqliteLocalStore {
    async fn add(&self, collection: Collection, value: Value) -> Result<LocalKey> {
        let result = sqlx::query(
            "INSERT INTO local_entries (collection, natural_key, value) VALUES (?1, NULL, ?2)",
        )
        .bind(collection.as_str())
        .bind(value.to_string())
        .execute(&self.pool)
        .await?;

        LocalKey::new(result.last_insert_rowid()).map_err(AppError::Storage)
    }

    async fn put(&self, collection: Collection, key: &StoreKey, value: Value) -> Result<()> {
        match key {
            StoreKey::Natural(natural_key) => {
                sqlx::query(
                    r#"
                    INSERT INTO local_entries (collection, natural_key, value)
                    VALUES (?1, ?2, ?3)
                    ON CONFLICT(collection, natural_key) DO UPDATE SET value = excluded.value
                    "#,
                )
                .bind(collection.as_str())
                .bind(natural_key)
                .bind(value.to_string())
                .execute(&self.pool)
                .await?;
            }
            StoreKey::Seq(key) => {
                sqlx::query(
                    r#"
                    INSERT INTO local_entries (seq, collection, natural_key, value)
                    VALUES (?1, ?2, NULL, ?3)
                    ON CONFLICT(seq) DO UPDATE SET value = excluded.value
                    "#,
                )
                .bind(key.value())
                .bind(collection.as_str())
                .bind(value.to_string())
                .execute(&self.pool)
                .await?;
            }
        }
        Ok(())
    }

    async fn get_all(&self, collection: Collection) -> Result<Vec<StoredEntry>> {
        let rows = sqlx::query(
            r#"
            SELECT seq, natural_key, value FROM local_entries
            WHERE collection = ?1
            ORDER BY seq ASC
            "#,
        )
        .bind(collection.as_str())
        .fetch_all(&self.pool)
        .await?;

        let mut entries = Vec::with_capacity(rows.len());
        for row in rows {
            let seq: i64 = row.get("seq");
            let natural_key: Option<String> = row.get("natural_key");
            let raw: String = row.get("value");
            let key = match natural_key {
                Some(natural_key) => StoreKey::Natural(natural_key),
                None => StoreKey::Seq(LocalKey::new(seq).map_err(AppError::Storage)?),
            };
            entries.push(StoredEntry {
                key,
                value: serde_json::from_str(&raw)?,
            });
        }
        Ok(entries)
    }

    async fn delete(&self, collection: Collection, key: &StoreKey) -> Result<()> {
        match key {
            StoreKey::Seq(key) => {
                sqlx::query("DELETE FROM local_entries WHERE collection = ?1 AND seq = ?2")
                    .bind(collection.as_str())
                    .bind(key.value())
                    .execute(&self.pool)
                    .await?;
            }
            StoreKey::Natural(natural_key) => {
                sqlx::query("DELETE FROM local_entries WHERE collection = ?1 AND natural_key = ?2")
                    .bind(collection.as_str())
                    .bind(natural_key)
                    .execute(&self.pool)
                    .await?;
            }
        }
        Ok(())
    }

    async fn clear(&self, collection: Collection) -> Result<()> {
        sqlx::query("DELETE FROM local_entries WHERE collection = ?1")
            .bind(collection.as_str())
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}

/// The simpler key-value store; holds the session record.
pub struct SqliteKeyValueStore {
    pool: Pool<Sqlite>,
}

impl SqliteKeyValueStore {
    pub fn new(pool: Pool<Sqlite>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl KeyValueStore for SqliteKeyValueStore {
    async fn get(&self, key: &str) -> Result<Option<Value>> {
        let row = sqlx::query("SELECT value FROM kv_entries WHERE key = ?1")
            .bind(key)
            .fetch_optional(&self.pool)
            .await?;
        match row {
            Some(row) => {
                let raw: String = row.get("value");
                Ok(Some(serde_json::from_str(&raw)?))
            }
            None => Ok(None),
        }
    }

    async fn put(&self, key: &str, value: Value) -> Result<()> {
        sqlx::query("INSERT OR REPLACE INTO kv_entries (key, value) VALUES (?1, ?2)")
            .bind(key)
            .bind(value.to_string())
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<()> {
        sqlx::query("DELETE FROM kv_entries WHERE key = ?1")
            .bind(key)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}
