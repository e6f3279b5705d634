//! Storage contract for the pantry.
//!
//! # Design
//! The reconciler only needs two operations: look an ingredient up, and
//! insert it as unavailable if it is absent. Those live on `PantryLookup`, so
//! the same reconciliation loop runs against a whole store or against an open
//! transaction. The rest of the pantry surface (edits, listings) is on
//! `PantryStore`.
//!
//! Every method that takes an ingredient key normalizes it before touching
//! storage. Implementations must also enforce key uniqueness themselves;
//! `insert_if_absent` reports whether it actually created a row so callers
//! racing on the same key stay correct.

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::StoreResult;
use crate::types::PantryEntry;

/// The lookup/insert pair the reconciler is written against.
#[async_trait]
pub trait PantryLookup: Send + Sync {
    /// Finds the entry for `ingredient`, if any.
    async fn find_by_key(&self, ingredient: &str) -> StoreResult<Option<PantryEntry>>;

    /// Inserts `ingredient` with `has_item = false` unless a record already
    /// exists. Returns `true` when a row was created.
    async fn insert_if_absent(&self, ingredient: &str) -> StoreResult<bool>;
}

/// A unit of work opened by [`PantryStore::begin`].
///
/// Writes become visible to other readers only after `commit`. Dropping the
/// transaction without committing discards them.
#[async_trait]
pub trait PantryTransaction: PantryLookup {
    async fn commit(self: Box<Self>) -> StoreResult<()>;
}

/// Full pantry surface.
#[async_trait]
pub trait PantryStore: PantryLookup {
    async fn begin(&self) -> StoreResult<Box<dyn PantryTransaction>>;

    async fn get_by_id(&self, id: Uuid) -> StoreResult<Option<PantryEntry>>;

    /// Creates the entry for `ingredient` or replaces its availability.
    async fn upsert(&self, ingredient: &str, has_item: bool) -> StoreResult<PantryEntry>;

    /// Returns `None` when `id` does not exist.
    async fn set_availability(&self, id: Uuid, has_item: bool) -> StoreResult<Option<PantryEntry>>;

    /// Returns `false` when `id` does not exist.
    async fn remove(&self, id: Uuid) -> StoreResult<bool>;

    /// Every entry, ordered by ingredient.
    async fn list_all(&self) -> StoreResult<Vec<PantryEntry>>;

    /// The shopping list: entries with `has_item = false`, ordered by ingredient.
    async fn list_missing(&self) -> StoreResult<Vec<PantryEntry>>;
}
