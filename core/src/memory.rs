//! In-process pantry store.
//!
//! Entries live in a `BTreeMap` keyed by the normalized ingredient, so key
//! uniqueness and ordered listings come from the map itself. Transactions
//! stage their inserts locally and merge them on commit.

use std::{collections::BTreeMap, sync::Arc};

use async_trait::async_trait;
use tokio::sync::{Mutex, RwLock};
use uuid::Uuid;

use crate::error::StoreResult;
use crate::normalize::normalize_key;
use crate::store::{PantryLookup, PantryStore, PantryTransaction};
use crate::types::PantryEntry;

type Entries = Arc<RwLock<BTreeMap<String, PantryEntry>>>;

#[derive(Debug, Clone, Default)]
pub struct InMemoryPantry {
    entries: Entries,
}

impl InMemoryPantry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a store pre-populated with `(ingredient, has_item)` pairs.
    pub fn with_entries<'a>(entries: impl IntoIterator<Item = (&'a str, bool)>) -> Self {
        let map = entries
            .into_iter()
            .map(|(ingredient, has_item)| {
                let key = normalize_key(ingredient);
                (key.clone(), PantryEntry::new(key, has_item))
            })
            .collect();
        Self {
            entries: Arc::new(RwLock::new(map)),
        }
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

#[async_trait]
impl PantryLookup for InMemoryPantry {
    async fn find_by_key(&self, ingredient: &str) -> StoreResult<Option<PantryEntry>> {
        let key = normalize_key(ingredient);
        Ok(self.entries.read().await.get(&key).cloned())
    }

    async fn insert_if_absent(&self, ingredient: &str) -> StoreResult<bool> {
        let key = normalize_key(ingredient);
        let mut entries = self.entries.write().await;
        if entries.contains_key(&key) {
            return Ok(false);
        }
        entries.insert(key.clone(), PantryEntry::new(key, false));
        Ok(true)
    }
}

#[async_trait]
impl PantryStore for InMemoryPantry {
    async fn begin(&self) -> StoreResult<Box<dyn PantryTransaction>> {
        Ok(Box::new(InMemoryTransaction {
            base: Arc::clone(&self.entries),
            staged: Mutex::new(BTreeMap::new()),
        }))
    }

    async fn get_by_id(&self, id: Uuid) -> StoreResult<Option<PantryEntry>> {
        let entries = self.entries.read().await;
        Ok(entries.values().find(|entry| entry.id == id).cloned())
    }

    async fn upsert(&self, ingredient: &str, has_item: bool) -> StoreResult<PantryEntry> {
        let key = normalize_key(ingredient);
        let mut entries = self.entries.write().await;
        let entry = entries
            .entry(key.clone())
            .and_modify(|entry| entry.has_item = has_item)
            .or_insert_with(|| PantryEntry::new(key, has_item));
        Ok(entry.clone())
    }

    async fn set_availability(&self, id: Uuid, has_item: bool) -> StoreResult<Option<PantryEntry>> {
        let mut entries = self.entries.write().await;
        Ok(entries.values_mut().find(|entry| entry.id == id).map(|entry| {
            entry.has_item = has_item;
            entry.clone()
        }))
    }

    async fn remove(&self, id: Uuid) -> StoreResult<bool> {
        let mut entries = self.entries.write().await;
        let before = entries.len();
        entries.retain(|_, entry| entry.id != id);
        Ok(entries.len() != before)
    }

    async fn list_all(&self) -> StoreResult<Vec<PantryEntry>> {
        Ok(self.entries.read().await.values().cloned().collect())
    }

    async fn list_missing(&self) -> StoreResult<Vec<PantryEntry>> {
        let entries = self.entries.read().await;
        Ok(entries.values().filter(|entry| !entry.has_item).cloned().collect())
    }
}

struct InMemoryTransaction {
    base: Entries,
    staged: Mutex<BTreeMap<String, PantryEntry>>,
}

#[async_trait]
impl PantryLookup for InMemoryTransaction {
    async fn find_by_key(&self, ingredient: &str) -> StoreResult<Option<PantryEntry>> {
        let key = normalize_key(ingredient);
        if let Some(entry) = self.staged.lock().await.get(&key) {
            return Ok(Some(entry.clone()));
        }
        Ok(self.base.read().await.get(&key).cloned())
    }

    async fn insert_if_absent(&self, ingredient: &str) -> StoreResult<bool> {
        let key = normalize_key(ingredient);
        let mut staged = self.staged.lock().await;
        if staged.contains_key(&key) || self.base.read().await.contains_key(&key) {
            return Ok(false);
        }
        staged.insert(key.clone(), PantryEntry::new(key, false));
        Ok(true)
    }
}

#[async_trait]
impl PantryTransaction for InMemoryTransaction {
    async fn commit(self: Box<Self>) -> StoreResult<()> {
        let InMemoryTransaction { base, staged } = *self;
        let mut base = base.write().await;
        for (key, entry) in staged.into_inner() {
            // A concurrent writer may have created the key since it was staged.
            base.entry(key).or_insert(entry);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn upsert_normalizes_and_replaces() {
        let pantry = InMemoryPantry::new();
        let created = pantry.upsert("  Sal ", true).await.unwrap();
        assert_eq!(created.ingredient, "sal");

        let replaced = pantry.upsert("SAL", false).await.unwrap();
        assert_eq!(replaced.id, created.id);
        assert!(!replaced.has_item);
        assert_eq!(pantry.len().await, 1);
    }

    #[tokio::test]
    async fn insert_if_absent_is_idempotent() {
        let pantry = InMemoryPantry::new();
        assert!(pantry.insert_if_absent("ovos").await.unwrap());
        assert!(!pantry.insert_if_absent("Ovos").await.unwrap());
        assert_eq!(pantry.len().await, 1);
    }

    #[tokio::test]
    async fn insert_if_absent_keeps_existing_availability() {
        let pantry = InMemoryPantry::with_entries([("arroz", true)]);
        assert!(!pantry.insert_if_absent("arroz").await.unwrap());
        let entry = pantry.find_by_key("arroz").await.unwrap().unwrap();
        assert!(entry.has_item);
    }

    #[tokio::test]
    async fn list_missing_is_ordered_by_key() {
        let pantry = InMemoryPantry::with_entries([
            ("tomate", false),
            ("arroz", true),
            ("cebola", false),
            ("alho", false),
        ]);
        let missing: Vec<String> = pantry
            .list_missing()
            .await
            .unwrap()
            .into_iter()
            .map(|entry| entry.ingredient)
            .collect();
        assert_eq!(missing, vec!["alho", "cebola", "tomate"]);
    }

    #[tokio::test]
    async fn set_availability_and_remove_by_id() {
        let pantry = InMemoryPantry::new();
        let entry = pantry.upsert("leite", false).await.unwrap();

        let updated = pantry.set_availability(entry.id, true).await.unwrap().unwrap();
        assert!(updated.has_item);
        assert!(pantry.list_missing().await.unwrap().is_empty());

        assert!(pantry.remove(entry.id).await.unwrap());
        assert!(!pantry.remove(entry.id).await.unwrap());
        assert!(pantry.set_availability(entry.id, false).await.unwrap().is_none());
        assert!(pantry.is_empty().await);
    }

    #[tokio::test]
    async fn transaction_is_invisible_until_commit() {
        let pantry = InMemoryPantry::new();
        let tx = pantry.begin().await.unwrap();
        assert!(tx.insert_if_absent("farinha").await.unwrap());
        assert!(tx.find_by_key("farinha").await.unwrap().is_some());
        assert!(pantry.find_by_key("farinha").await.unwrap().is_none());

        tx.commit().await.unwrap();
        assert!(pantry.find_by_key("farinha").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn dropped_transaction_discards_inserts() {
        let pantry = InMemoryPantry::new();
        {
            let tx = pantry.begin().await.unwrap();
            assert!(tx.insert_if_absent("farinha").await.unwrap());
        }
        assert!(pantry.is_empty().await);
    }
}
