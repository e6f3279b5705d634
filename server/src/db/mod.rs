//! SQLite persistence for recipes and the pantry.
//!
//! Both tables are created on startup if they do not exist. Ids are UUIDs
//! stored as text and timestamps are RFC 3339 strings.

mod pantry;
mod recipes;

use std::str::FromStr;

use chrono::{DateTime, Utc};
use pantry_core::{StoreError, StoreResult};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use tracing::info;
use uuid::Uuid;

pub use pantry::SqlitePantry;
pub use recipes::RecipeRepository;

const CREATE_RECIPES: &str = r"
    CREATE TABLE IF NOT EXISTS recipes (
        id TEXT PRIMARY KEY,
        name TEXT NOT NULL,
        meal_type TEXT NOT NULL DEFAULT '',
        ingredients TEXT NOT NULL,
        instructions TEXT NOT NULL DEFAULT '',
        created_at TEXT NOT NULL
    )
";

const CREATE_PANTRY: &str = r"
    CREATE TABLE IF NOT EXISTS pantry (
        id TEXT PRIMARY KEY,
        ingredient TEXT NOT NULL UNIQUE,
        has_item INTEGER NOT NULL DEFAULT 0,
        created_at TEXT NOT NULL
    )
";

/// Opens a pool for `database_url`, creating the database file if needed.
///
/// In-memory databases are private to a connection, so they get a pool of
/// exactly one connection that is never recycled.
pub async fn connect(database_url: &str) -> StoreResult<SqlitePool> {
    let options = SqliteConnectOptions::from_str(database_url)
        .map_err(|e| StoreError::backend(format!("invalid database url: {e}")))?
        .create_if_missing(true);

    let in_memory = database_url.contains(":memory:") || database_url.contains("mode=memory");
    let pool = SqlitePoolOptions::new()
        .max_connections(if in_memory { 1 } else { 5 })
        .idle_timeout(None)
        .max_lifetime(None)
        .connect_with(options)
        .await
        .map_err(|e| StoreError::backend(format!("failed to connect to {database_url}: {e}")))?;

    info!(database_url, in_memory, "database connected");
    Ok(pool)
}

pub async fn migrate(pool: &SqlitePool) -> StoreResult<()> {
    for statement in [CREATE_RECIPES, CREATE_PANTRY] {
        sqlx::query(statement)
            .execute(pool)
            .await
            .map_err(|e| StoreError::backend(format!("failed to create schema: {e}")))?;
    }
    Ok(())
}

fn parse_id(raw: &str) -> StoreResult<Uuid> {
    Uuid::parse_str(raw).map_err(|e| StoreError::MalformedRow(format!("bad id {raw:?}: {e}")))
}

fn parse_timestamp(raw: &str) -> StoreResult<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|ts| ts.with_timezone(&Utc))
        .map_err(|e| StoreError::MalformedRow(format!("bad timestamp {raw:?}: {e}")))
}

fn column_error(e: sqlx::Error) -> StoreError {
    StoreError::MalformedRow(e.to_string())
}

#[cfg(test)]
pub(crate) async fn test_pool() -> SqlitePool {
    let pool = connect("sqlite::memory:").await.unwrap();
    migrate(&pool).await.unwrap();
    pool
}
