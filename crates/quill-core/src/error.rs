//! Domain-level error types.

use thiserror::Error;

/// Repository-level errors.
///
/// `Connection` and `Query` cover store/network failures; they are surfaced
/// as-is and never retried. `Constraint` maps uniqueness and foreign-key
/// violations (duplicate slug, snippet pointing at a missing post).
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Database connection failed: {0}")]
    Connection(String),

    #[error("Query execution failed: {0}")]
    Query(String),

    #[error("Entity not found")]
    NotFound,

    #[error("Constraint violation: {0}")]
    Constraint(String),
}

/// Failure of a snippet reconciliation run.
///
/// Reconciliation applies creates, updates and deletes one row at a time with
/// no rollback, so a mid-run failure leaves the store partially updated.
/// `applied` reports how many operations succeeded before the abort.
#[derive(Debug, Error)]
#[error("snippet sync aborted after {applied} applied operation(s): {source}")]
pub struct ReconcileError {
    pub applied: usize,
    #[source]
    pub source: RepoError,
}
