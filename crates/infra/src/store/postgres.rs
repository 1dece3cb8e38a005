//! Postgres-backed record store.
//!
//! Every record type shares one table and is kept as a JSONB document keyed by
//! `(collection, id)`:
//!
//! | column | type | |
//! |--------|------|--|
//! | `collection` | `TEXT` | record type, e.g. `employees` |
//! | `id` | `UUID` | record key |
//! | `body` | `JSONB` | serialized record |
//! | `updated_at` | `TIMESTAMPTZ` | last write |

use std::marker::PhantomData;
use std::sync::Arc;

use sqlx::{PgPool, Row};
use tracing::instrument;
use uuid::Uuid;

use super::{Record, RecordStore, StoreError};

const CREATE_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS records (
    collection TEXT NOT NULL,
    id UUID NOT NULL,
    body JSONB NOT NULL,
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    PRIMARY KEY (collection, id)
)
"#;

/// Create the `records` table if it does not exist yet.
pub async fn migrate(pool: &PgPool) -> Result<(), StoreError> {
    sqlx::query(CREATE_TABLE)
        .execute(pool)
        .await
        .map_err(|e| map_sqlx_error("migrate", e))?;
    Ok(())
}

#[derive(Debug)]
pub struct PostgresRecordStore<T> {
    pool: Arc<PgPool>,
    _record: PhantomData<fn() -> T>,
}

impl<T> PostgresRecordStore<T> {
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self {
            pool,
            _record: PhantomData,
        }
    }
}

fn decode<T: Record>(body: serde_json::Value) -> Result<T, StoreError> {
    serde_json::from_value(body).map_err(|e| StoreError::Decode {
        collection: T::COLLECTION,
        message: e.to_string(),
    })
}

#[async_trait::async_trait]
impl<T: Record> RecordStore<T> for PostgresRecordStore<T> {
    #[instrument(skip(self), fields(collection = T::COLLECTION))]
    async fn get(&self, key: Uuid) -> Result<Option<T>, StoreError> {
        let row = sqlx::query("SELECT body FROM records WHERE collection = $1 AND id = $2")
            .bind(T::COLLECTION)
            .bind(key)
            .fetch_optional(&*self.pool)
            .await
            .map_err(|e| map_sqlx_error("get_record", e))?;

        match row {
            Some(row) => {
                let body: serde_json::Value = row
                    .try_get("body")
                    .map_err(|e| map_sqlx_error("get_record", e))?;
                decode(body).map(Some)
            }
            None => Ok(None),
        }
    }

    #[instrument(skip(self), fields(collection = T::COLLECTION))]
    async fn list(&self) -> Result<Vec<T>, StoreError> {
        let rows = sqlx::query("SELECT body FROM records WHERE collection = $1 ORDER BY id")
            .bind(T::COLLECTION)
            .fetch_all(&*self.pool)
            .await
            .map_err(|e| map_sqlx_error("list_records", e))?;

        rows.into_iter()
            .map(|row| {
                let body: serde_json::Value = row
                    .try_get("body")
                    .map_err(|e| map_sqlx_error("list_records", e))?;
                decode(body)
            })
            .collect()
    }

    #[instrument(skip(self, record), fields(collection = T::COLLECTION, id = %record.key()))]
    async fn put(&self, record: &T) -> Result<(), StoreError> {
        let body = serde_json::to_value(record).map_err(|e| StoreError::Decode {
            collection: T::COLLECTION,
            message: e.to_string(),
        })?;

        sqlx::query(
            r#"
            INSERT INTO records (collection, id, body, updated_at)
            VALUES ($1, $2, $3, now())
            ON CONFLICT (collection, id)
            DO UPDATE SET body = EXCLUDED.body, updated_at = now()
            "#,
        )
        .bind(T::COLLECTION)
        .bind(record.key())
        .bind(body)
        .execute(&*self.pool)
        .await
        .map_err(|e| map_sqlx_error("put_record", e))?;

        Ok(())
    }

    #[instrument(skip(self), fields(collection = T::COLLECTION))]
    async fn remove(&self, key: Uuid) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM records WHERE collection = $1 AND id = $2")
            .bind(T::COLLECTION)
            .bind(key)
            .execute(&*self.pool)
            .await
            .map_err(|e| map_sqlx_error("remove_record", e))?;

        Ok(result.rows_affected() > 0)
    }
}

fn map_sqlx_error(operation: &'static str, err: sqlx::Error) -> StoreError {
    let message = match err {
        sqlx::Error::Database(db_err) => match db_err.code() {
            Some(code) => format!("{} (code {})", db_err.message(), code),
            None => db_err.message().to_string(),
        },
        sqlx::Error::PoolClosed => "connection pool closed".to_string(),
        other => other.to_string(),
    };
    StoreError::Database { operation, message }
}
