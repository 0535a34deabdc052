//! Snippet set reconciliation - the save path of the post editor.
//!
//! The editor hands back the full desired snippet set for a post: surviving
//! snippets keep their id, newly authored ones have none. Reconciliation
//! converges the stored set to that desired set with row-level creates,
//! updates and deletes, preserving the caller-supplied `order_index`.

use std::collections::HashSet;
use std::sync::Arc;

use crate::domain::{CodeSnippet, SnippetDraft};
use crate::error::ReconcileError;
use crate::ports::SnippetRepository;

/// The operations that take a stored snippet set to a desired one.
///
/// Built as a pure function of the pre-mutation snapshot, so the deletable
/// set can never misclassify a snippet created later in the same run.
#[derive(Debug, Default)]
pub struct ReconcilePlan {
    pub to_create: Vec<SnippetDraft>,
    pub to_update: Vec<(i32, SnippetDraft)>,
    pub to_delete: Vec<i32>,
}

impl ReconcilePlan {
    /// Partition `desired` into creates (no id) and updates (existing id),
    /// then mark every id of `existing` that no desired entry references for
    /// deletion.
    pub fn build(existing: &[CodeSnippet], desired: Vec<SnippetDraft>) -> Self {
        let mut to_create = Vec::new();
        let mut to_update = Vec::new();
        let mut kept: HashSet<i32> = HashSet::new();

        for draft in desired {
            match draft.id {
                Some(id) => {
                    kept.insert(id);
                    to_update.push((id, draft));
                }
                None => to_create.push(draft),
            }
        }

        let to_delete = existing
            .iter()
            .map(|s| s.id)
            .filter(|id| !kept.contains(id))
            .collect();

        Self {
            to_create,
            to_update,
            to_delete,
        }
    }

    /// Total number of store operations the plan will issue.
    pub fn len(&self) -> usize {
        self.to_create.len() + self.to_update.len() + self.to_delete.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Outcome of a completed reconciliation run.
#[derive(Debug, Default)]
pub struct ReconcileReport {
    pub created: Vec<CodeSnippet>,
    pub updated: Vec<CodeSnippet>,
    pub deleted: Vec<i32>,
}

/// Applies reconciliation plans against the snippet repository.
///
/// There is no rollback: any repository failure aborts the run and the error
/// reports how many operations had already been applied. Acceptable for this
/// single-operator, low-concurrency workload; a store transaction around the
/// run would be a valid strengthening.
pub struct SnippetReconciler {
    snippets: Arc<dyn SnippetRepository>,
}

impl SnippetReconciler {
    pub fn new(snippets: Arc<dyn SnippetRepository>) -> Self {
        Self { snippets }
    }

    /// Converge the stored snippet set of `post_id` to `desired`.
    ///
    /// Snapshots the stored set first, builds the plan from that snapshot,
    /// then applies creates, updates and deletes in that order. After a
    /// successful run, `list_by_post` returns exactly one snippet per desired
    /// entry, ordered by the supplied `order_index`.
    pub async fn sync(
        &self,
        post_id: i32,
        desired: Vec<SnippetDraft>,
    ) -> Result<ReconcileReport, ReconcileError> {
        let existing = self
            .snippets
            .list_by_post(post_id)
            .await
            .map_err(|source| ReconcileError { applied: 0, source })?;

        let plan = ReconcilePlan::build(&existing, desired);

        tracing::debug!(
            post_id,
            creates = plan.to_create.len(),
            updates = plan.to_update.len(),
            deletes = plan.to_delete.len(),
            "applying snippet reconciliation plan"
        );

        self.apply(post_id, plan).await
    }

    /// Apply a prebuilt plan. Aborts on the first repository error.
    pub async fn apply(
        &self,
        post_id: i32,
        plan: ReconcilePlan,
    ) -> Result<ReconcileReport, ReconcileError> {
        let mut applied = 0usize;
        let mut report = ReconcileReport::default();

        for draft in plan.to_create {
            let snippet = self
                .snippets
                .create(draft.into_new(post_id))
                .await
                .map_err(|source| ReconcileError { applied, source })?;
            applied += 1;
            report.created.push(snippet);
        }

        for (id, draft) in plan.to_update {
            let snippet = self
                .snippets
                .update(id, draft.into_patch())
                .await
                .map_err(|source| ReconcileError { applied, source })?;
            applied += 1;
            report.updated.push(snippet);
        }

        for id in plan.to_delete {
            self.snippets
                .delete(id)
                .await
                .map_err(|source| ReconcileError { applied, source })?;
            applied += 1;
            report.deleted.push(id);
        }

        Ok(report)
    }
}
