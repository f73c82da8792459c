//! # Key-Value Repository
//!
//! A small persistent map from string keys to string values. Curio stores
//! JSON under two keys (`collectible-items`, `darkMode`), but the repository
//! itself never looks inside a value.

use chrono::Utc;
use serde::de::DeserializeOwned;
use serde::Serialize;
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::DbResult;

/// Repository for key-value operations.
#[derive(Debug, Clone)]
pub struct KeyValueRepository {
    pool: SqlitePool,
}

impl KeyValueRepository {
    /// Creates a new KeyValueRepository.
    pub fn new(pool: SqlitePool) -> Self {
        KeyValueRepository { pool }
    }

    /// Reads the value stored under `key`.
    ///
    /// ## Returns
    /// * `Ok(None)` - nothing stored yet (first run)
    /// * `Ok(Some(value))` - the stored value
    pub async fn read(&self, key: &str) -> DbResult<Option<String>> {
        debug!(key = %key, "Reading key");

        let value: Option<String> =
            sqlx::query_scalar("SELECT value FROM kv_store WHERE key = ?1")
                .bind(key)
                .fetch_optional(&self.pool)
                .await?;

        Ok(value)
    }

    /// Stores `value` under `key`, replacing any previous value.
    pub async fn write(&self, key: &str, value: &str) -> DbResult<()> {
        debug!(key = %key, bytes = value.len(), "Writing key");

        sqlx::query(
            r#"
            INSERT INTO kv_store (key, value, updated_at)
            VALUES (?1, ?2, ?3)
            ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at
            "#,
        )
        .bind(key)
        .bind(value)
        .bind(Utc::now().to_rfc3339())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Reads and decodes a JSON value.
    pub async fn read_json<T: DeserializeOwned>(&self, key: &str) -> DbResult<Option<T>> {
        match self.read(key).await? {
            Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
            None => Ok(None),
        }
    }

    /// Encodes `value` as JSON and stores it.
    pub async fn write_json<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> DbResult<()> {
        let raw = serde_json::to_string(value)?;
        self.write(key, &raw).await
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use crate::error::DbError;
    use crate::{Database, DbConfig};

    #[tokio::test]
    async fn test_absent_key_reads_none() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        assert_eq!(db.kv().read("missing").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_write_overwrites() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let kv = db.kv();

        kv.write("darkMode", "false").await.unwrap();
        kv.write("darkMode", "true").await.unwrap();

        assert_eq!(kv.read("darkMode").await.unwrap().as_deref(), Some("true"));
    }

    #[tokio::test]
    async fn test_json_helpers() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let kv = db.kv();

        kv.write_json("list", &vec![1, 2, 3]).await.unwrap();
        let list: Option<Vec<i32>> = kv.read_json("list").await.unwrap();
        assert_eq!(list, Some(vec![1, 2, 3]));

        kv.write("list", "{not json").await.unwrap();
        let err = kv.read_json::<Vec<i32>>("list").await.unwrap_err();
        assert!(matches!(err, DbError::Serialization(_)));
    }
}
