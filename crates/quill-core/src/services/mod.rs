//! Application services composed from the repository ports.

mod query;
mod reconcile;

pub use query::{PostKey, PostQueryService};
pub use reconcile::{ReconcilePlan, ReconcileReport, SnippetReconciler};
