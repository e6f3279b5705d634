//! Domain core for the recipe and pantry service.
//!
//! # Overview
//! Turns a recipe's free-text ingredient list into pantry keys, reconciles
//! them against the pantry, and records the missing ones on the shopping list.
//! Nothing here talks to a database or the network: storage is reached
//! through the async traits in [`store`], so the reconciliation loop is the
//! same against SQLite, an open transaction, or [`InMemoryPantry`].
//!
//! # Design
//! - `normalize` owns the key rules (trim, lower-case, drop empties).
//! - `reconcile` owns the sequential check-then-insert loop and the
//!   best-effort / transactional choice.
//! - DTOs serialize with camelCase names, matching the HTTP surface.

pub mod error;
pub mod memory;
pub mod normalize;
pub mod reconcile;
pub mod store;
pub mod types;

pub use error::{ReconcileError, StoreError, StoreResult};
pub use memory::InMemoryPantry;
pub use normalize::{normalize_ingredients, normalize_key};
pub use reconcile::{reconcile, ParseModeError, ReconcileMode, Reconciler};
pub use store::{PantryLookup, PantryStore, PantryTransaction};
pub use types::{
    NewRecipe, PantryEntry, Recipe, ReconcileSummary, SetAvailability, UpdateRecipe,
    UpsertPantryEntry,
};
