//! Error types for pantry storage and reconciliation.
//!
//! # Design
//! Storage backends collapse their driver errors into `StoreError` so the
//! reconciler never depends on a particular driver. "Not found" is not an
//! error at this layer: lookups return `Option` and the HTTP edge decides
//! what an absent record means.

use thiserror::Error;

/// Failure reported by a pantry storage backend.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The backend failed to execute an operation.
    #[error("storage backend failure: {0}")]
    Backend(String),

    /// A stored row could not be mapped back into a domain type.
    #[error("malformed stored row: {0}")]
    MalformedRow(String),
}

impl StoreError {
    pub fn backend(message: impl Into<String>) -> Self {
        StoreError::Backend(message.into())
    }
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Failure of a reconciliation run.
///
/// The run stops at the first storage failure; `ingredient` names the item
/// that was being handled when it happened.
#[derive(Debug, Error)]
pub enum ReconcileError {
    #[error("reconciliation aborted at {ingredient:?}: {source}")]
    Aborted {
        ingredient: String,
        #[source]
        source: StoreError,
    },

    #[error("could not open reconciliation transaction: {0}")]
    Begin(#[source] StoreError),

    #[error("could not commit reconciliation: {0}")]
    Commit(#[source] StoreError),
}
