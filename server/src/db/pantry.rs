use async_trait::async_trait;
use chrono::Utc;
use pantry_core::{
    normalize_key, PantryEntry, PantryLookup, PantryStore, PantryTransaction, StoreError,
    StoreResult,
};
use sqlx::{sqlite::SqliteRow, Executor, Row, Sqlite, SqlitePool, Transaction};
use tokio::sync::Mutex;
use uuid::Uuid;

use super::{column_error, parse_id, parse_timestamp};

const ENTRY_COLUMNS: &str = "id, ingredient, has_item, created_at";

/// Pantry store backed by the `pantry` table.
///
/// Key uniqueness is enforced by the table's UNIQUE constraint; inserts from
/// reconciliation use `ON CONFLICT DO NOTHING` so racing callers cannot
/// create a second row for the same ingredient.
#[derive(Debug, Clone)]
pub struct SqlitePantry {
    pool: SqlitePool,
}

impl SqlitePantry {
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PantryLookup for SqlitePantry {
    async fn find_by_key(&self, ingredient: &str) -> StoreResult<Option<PantryEntry>> {
        find_by_key(&self.pool, ingredient).await
    }

    async fn insert_if_absent(&self, ingredient: &str) -> StoreResult<bool> {
        insert_if_absent(&self.pool, ingredient).await
    }
}

#[async_trait]
impl PantryStore for SqlitePantry {
    async fn begin(&self) -> StoreResult<Box<dyn PantryTransaction>> {
        // IMMEDIATE takes the write lock up front. A deferred BEGIN fails with
        // SQLITE_BUSY when its first insert upgrades a stale read snapshot.
        let tx = self
            .pool
            .begin_with("BEGIN IMMEDIATE")
            .await
            .map_err(|e| StoreError::backend(format!("failed to begin transaction: {e}")))?;
        Ok(Box::new(SqlitePantryTransaction { tx: Mutex::new(tx) }))
    }

    async fn get_by_id(&self, id: Uuid) -> StoreResult<Option<PantryEntry>> {
        let row = sqlx::query(&format!("SELECT {ENTRY_COLUMNS} FROM pantry WHERE id = ?1"))
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| StoreError::backend(format!("failed to get pantry entry: {e}")))?;

        row.map(|r| row_to_entry(&r)).transpose()
    }

    async fn upsert(&self, ingredient: &str, has_item: bool) -> StoreResult<PantryEntry> {
        let row = sqlx::query(&format!(
            r"
            INSERT INTO pantry (id, ingredient, has_item, created_at)
            VALUES (?1, ?2, ?3, ?4)
            ON CONFLICT(ingredient) DO UPDATE SET has_item = excluded.has_item
            RETURNING {ENTRY_COLUMNS}
            "
        ))
        .bind(Uuid::new_v4().to_string())
        .bind(normalize_key(ingredient))
        .bind(has_item)
        .bind(Utc::now().to_rfc3339())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| StoreError::backend(format!("failed to upsert pantry entry: {e}")))?;

        row_to_entry(&row)
    }

    async fn set_availability(&self, id: Uuid, has_item: bool) -> StoreResult<Option<PantryEntry>> {
        let row = sqlx::query(&format!(
            "UPDATE pantry SET has_item = ?1 WHERE id = ?2 RETURNING {ENTRY_COLUMNS}"
        ))
        .bind(has_item)
        .bind(id.to_string())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| StoreError::backend(format!("failed to update pantry entry: {e}")))?;

        row.map(|r| row_to_entry(&r)).transpose()
    }

    async fn remove(&self, id: Uuid) -> StoreResult<bool> {
        let result = sqlx::query("DELETE FROM pantry WHERE id = ?1")
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| StoreError::backend(format!("failed to delete pantry entry: {e}")))?;

        Ok(result.rows_affected() > 0)
    }

    async fn list_all(&self) -> StoreResult<Vec<PantryEntry>> {
        let rows = sqlx::query(&format!("SELECT {ENTRY_COLUMNS} FROM pantry ORDER BY ingredient"))
            .fetch_all(&self.pool)
            .await
            .map_err(|e| StoreError::backend(format!("failed to list pantry: {e}")))?;

        rows.iter().map(row_to_entry).collect()
    }

    async fn list_missing(&self) -> StoreResult<Vec<PantryEntry>> {
        let rows = sqlx::query(&format!(
            "SELECT {ENTRY_COLUMNS} FROM pantry WHERE has_item = 0 ORDER BY ingredient"
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| StoreError::backend(format!("failed to list shopping list: {e}")))?;

        rows.iter().map(row_to_entry).collect()
    }
}

/// Reconciliation transaction. Dropping it without `commit` rolls back.
struct SqlitePantryTransaction {
    tx: Mutex<Transaction<'static, Sqlite>>,
}

#[async_trait]
impl PantryLookup for SqlitePantryTransaction {
    async fn find_by_key(&self, ingredient: &str) -> StoreResult<Option<PantryEntry>> {
        let mut tx = self.tx.lock().await;
        find_by_key(&mut **tx, ingredient).await
    }

    async fn insert_if_absent(&self, ingredient: &str) -> StoreResult<bool> {
        let mut tx = self.tx.lock().await;
        insert_if_absent(&mut **tx, ingredient).await
    }
}

#[async_trait]
impl PantryTransaction for SqlitePantryTransaction {
    async fn commit(self: Box<Self>) -> StoreResult<()> {
        let SqlitePantryTransaction { tx } = *self;
        tx.into_inner()
            .commit()
            .await
            .map_err(|e| StoreError::backend(format!("failed to commit transaction: {e}")))
    }
}

async fn find_by_key<'e, E>(executor: E, ingredient: &str) -> StoreResult<Option<PantryEntry>>
where
    E: Executor<'e, Database = Sqlite>,
{
    let row = sqlx::query(&format!("SELECT {ENTRY_COLUMNS} FROM pantry WHERE ingredient = ?1"))
        .bind(normalize_key(ingredient))
        .fetch_optional(executor)
        .await
        .map_err(|e| StoreError::backend(format!("failed to look up {ingredient:?}: {e}")))?;

    row.map(|r| row_to_entry(&r)).transpose()
}

async fn insert_if_absent<'e, E>(executor: E, ingredient: &str) -> StoreResult<bool>
where
    E: Executor<'e, Database = Sqlite>,
{
    let result = sqlx::query(
        r"
        INSERT INTO pantry (id, ingredient, has_item, created_at)
        VALUES (?1, ?2, 0, ?3)
        ON CONFLICT(ingredient) DO NOTHING
        ",
    )
    .bind(Uuid::new_v4().to_string())
    .bind(normalize_key(ingredient))
    .bind(Utc::now().to_rfc3339())
    .execute(executor)
    .await
    .map_err(|e| StoreError::backend(format!("failed to insert {ingredient:?}: {e}")))?;

    Ok(result.rows_affected() == 1)
}

fn row_to_entry(row: &SqliteRow) -> StoreResult<PantryEntry> {
    let id: String = row.try_get("id").map_err(column_error)?;
    let created_at: String = row.try_get("created_at").map_err(column_error)?;

    Ok(PantryEntry {
        id: parse_id(&id)?,
        ingredient: row.try_get("ingredient").map_err(column_error)?,
        has_item: row.try_get("has_item").map_err(column_error)?,
        created_at: parse_timestamp(&created_at)?,
    })
}
