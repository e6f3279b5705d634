//! Reconciles a recipe's ingredient list against the pantry.
//!
//! # Design
//! Ingredients are handled one at a time, in input order: the lookup for an
//! item completes before the insert decision, and that decision completes
//! before the next item is looked at. A repeated ingredient is therefore
//! created by its first occurrence and found by every later one.
//!
//! The insert itself is `insert_if_absent`, so a concurrent writer creating
//! the same key between our lookup and our insert cannot produce a second
//! row; we just count the item as processed.
//!
//! Processing stops at the first storage failure. Whether earlier inserts of
//! the same call survive depends on [`ReconcileMode`].

use std::{fmt, str::FromStr};

use tracing::{debug, info, warn};

use crate::error::{ReconcileError, StoreError};
use crate::normalize::normalize_ingredients;
use crate::store::{PantryLookup, PantryStore};
use crate::types::ReconcileSummary;

/// How a reconciliation run treats writes when it fails midway.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReconcileMode {
    /// Inserts are applied as they happen; a failure leaves earlier inserts
    /// of the same call in place.
    #[default]
    BestEffort,
    /// The whole run is one transaction, committed after the last item.
    Transactional,
}

impl ReconcileMode {
    pub const fn as_str(&self) -> &'static str {
        match self {
            ReconcileMode::BestEffort => "best_effort",
            ReconcileMode::Transactional => "transactional",
        }
    }
}

impl fmt::Display for ReconcileMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, thiserror::Error)]
#[error("unknown reconcile mode {0:?}, expected \"best_effort\" or \"transactional\"")]
pub struct ParseModeError(String);

impl FromStr for ReconcileMode {
    type Err = ParseModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "best_effort" => Ok(ReconcileMode::BestEffort),
            "transactional" => Ok(ReconcileMode::Transactional),
            other => Err(ParseModeError(other.to_string())),
        }
    }
}

/// Runs the check-then-insert loop over already normalized `ingredients`.
pub async fn reconcile<L>(
    lookup: &L,
    ingredients: Vec<String>,
) -> Result<ReconcileSummary, ReconcileError>
where
    L: PantryLookup + ?Sized,
{
    let mut summary = ReconcileSummary::default();

    for ingredient in &ingredients {
        let aborted = |source: StoreError| ReconcileError::Aborted {
            ingredient: ingredient.clone(),
            source,
        };

        let existing = lookup.find_by_key(ingredient).await.map_err(aborted)?;
        let added = match existing {
            Some(_) => false,
            None => lookup.insert_if_absent(ingredient).await.map_err(aborted)?,
        };

        summary.processed_count += 1;
        if added {
            summary.added_to_shopping_list += 1;
        }
        debug!(%ingredient, added, "reconciled ingredient");
    }

    summary.ingredients = ingredients;
    Ok(summary)
}

/// Normalizes raw ingredient text and reconciles it using the configured mode.
#[derive(Debug, Clone, Copy, Default)]
pub struct Reconciler {
    mode: ReconcileMode,
}

impl Reconciler {
    pub fn new(mode: ReconcileMode) -> Self {
        Self { mode }
    }

    pub fn mode(&self) -> ReconcileMode {
        self.mode
    }

    pub async fn process<S>(&self, store: &S, raw: &str) -> Result<ReconcileSummary, ReconcileError>
    where
        S: PantryStore + ?Sized,
    {
        let ingredients = normalize_ingredients(raw);

        let result = match self.mode {
            ReconcileMode::BestEffort => reconcile(store, ingredients).await,
            ReconcileMode::Transactional => reconcile_atomically(store, ingredients).await,
        };

        match &result {
            Ok(summary) => info!(
                mode = %self.mode,
                processed = summary.processed_count,
                added = summary.added_to_shopping_list,
                "ingredients reconciled"
            ),
            Err(err) => warn!(mode = %self.mode, error = %err, "reconciliation aborted"),
        }
        result
    }
}

async fn reconcile_atomically<S>(
    store: &S,
    ingredients: Vec<String>,
) -> Result<ReconcileSummary, ReconcileError>
where
    S: PantryStore + ?Sized,
{
    let tx = store.begin().await.map_err(ReconcileError::Begin)?;
    // On error the transaction is dropped uncommitted, which rolls it back.
    let summary = reconcile(&*tx, ingredients).await?;
    tx.commit().await.map_err(ReconcileError::Commit)?;
    Ok(summary)
}
