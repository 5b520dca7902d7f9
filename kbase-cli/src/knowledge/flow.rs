//! Confirmation flow for seed imports
//!
//! ```text
//! Idle ──open──▶ Confirming ──submit──▶ Submitting ──ok──▶ Done ──ack──▶ Idle
//!   ▲                │                      │
//!   └────cancel──────┤                      └──err──▶ Failed ──submit──▶ Submitting
//!   └────cancel──────────────────────────────────────────┘
//! ```
//!
//! A failed write keeps the batch so the user can retry from the same dialog.

use anyhow::Result;

use super::import::ImportPlan;
use super::models::Document;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ImportFlow {
    #[default]
    Idle,
    /// Dialog open, waiting for the user to confirm
    Confirming { batch: Vec<Document> },
    /// Bulk write in flight
    Submitting { batch: Vec<Document> },
    Done { imported: usize },
    /// Bulk write failed; dialog stays open with the same batch
    Failed { error: String, batch: Vec<Document> },
}

impl ImportFlow {
    pub fn label(&self) -> &'static str {
        match self {
            ImportFlow::Idle => "idle",
            ImportFlow::Confirming { .. } => "confirming",
            ImportFlow::Submitting { .. } => "submitting",
            ImportFlow::Done { .. } => "done",
            ImportFlow::Failed { .. } => "failed",
        }
    }

    pub fn is_busy(&self) -> bool {
        matches!(self, ImportFlow::Submitting { .. })
    }

    /// Whether the confirm button is enabled
    pub fn can_submit(&self) -> bool {
        matches!(self, ImportFlow::Confirming { .. } | ImportFlow::Failed { .. })
    }

    /// Documents awaiting import in the open dialog
    pub fn pending(&self) -> &[Document] {
        match self {
            ImportFlow::Confirming { batch }
            | ImportFlow::Submitting { batch }
            | ImportFlow::Failed { batch, .. } => batch,
            ImportFlow::Idle | ImportFlow::Done { .. } => &[],
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            ImportFlow::Failed { error, .. } => Some(error),
            _ => None,
        }
    }

    /// Open the confirmation dialog for a computed plan
    pub fn open(&mut self, plan: ImportPlan) -> Result<()> {
        if !matches!(self, ImportFlow::Idle) {
            anyhow::bail!("Cannot open import dialog while {}", self.label());
        }
        if plan.is_empty() {
            anyhow::bail!("Nothing to import: every catalog document is already present");
        }

        *self = ImportFlow::Confirming { batch: plan.batch };
        Ok(())
    }

    /// Move to `Submitting` and hand back the batch to write
    pub fn begin_submit(&mut self) -> Result<Vec<Document>> {
        let batch = match self {
            ImportFlow::Confirming { batch } | ImportFlow::Failed { batch, .. } => {
                std::mem::take(batch)
            }
            ImportFlow::Submitting { .. } => {
                anyhow::bail!("An import is already in progress")
            }
            other => anyhow::bail!("Cannot submit import while {}", other.label()),
        };

        *self = ImportFlow::Submitting {
            batch: batch.clone(),
        };
        Ok(batch)
    }

    /// Record the outcome of the bulk write
    pub fn finish(&mut self, outcome: std::result::Result<(), String>) -> Result<()> {
        let ImportFlow::Submitting { batch } = self else {
            anyhow::bail!("No import in progress (state: {})", self.label());
        };

        let batch = std::mem::take(batch);
        *self = match outcome {
            Ok(()) => ImportFlow::Done {
                imported: batch.len(),
            },
            Err(error) => ImportFlow::Failed { error, batch },
        };
        Ok(())
    }

    /// Close the dialog without writing anything
    pub fn cancel(&mut self) -> Result<()> {
        if self.is_busy() {
            anyhow::bail!("Cannot cancel while the import is being written");
        }
        if matches!(self, ImportFlow::Done { .. }) {
            anyhow::bail!("Import already finished; acknowledge it instead");
        }

        *self = ImportFlow::Idle;
        Ok(())
    }

    /// Dismiss a finished import
    pub fn acknowledge(&mut self) -> Result<usize> {
        let ImportFlow::Done { imported } = *self else {
            anyhow::bail!("No finished import to acknowledge (state: {})", self.label());
        };
        *self = ImportFlow::Idle;
        Ok(imported)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::knowledge::models::fixtures::slug_only;

    fn plan(slugs: &[&str]) -> ImportPlan {
        ImportPlan {
            batch: slugs.iter().map(|s| slug_only(s)).collect(),
            already_present: Vec::new(),
        }
    }

    #[test]
    fn test_happy_path() {
        let mut flow = ImportFlow::default();
        flow.open(plan(&["a", "c"])).unwrap();
        assert!(flow.can_submit());
        assert_eq!(flow.pending().len(), 2);

        let batch = flow.begin_submit().unwrap();
        assert_eq!(batch.len(), 2);
        assert!(flow.is_busy());
        assert!(!flow.can_submit());

        flow.finish(Ok(())).unwrap();
        assert_eq!(flow, ImportFlow::Done { imported: 2 });
        assert!(flow.pending().is_empty());

        assert_eq!(flow.acknowledge().unwrap(), 2);
        assert_eq!(flow, ImportFlow::Idle);
    }

    #[test]
    fn test_empty_plan_cannot_open() {
        let mut flow = ImportFlow::default();
        let err = flow.open(plan(&[])).unwrap_err();
        assert!(err.to_string().contains("Nothing to import"));
        assert_eq!(flow, ImportFlow::Idle);
    }

    #[test]
    fn test_no_resubmit_while_submitting() {
        let mut flow = ImportFlow::default();
        flow.open(plan(&["a"])).unwrap();
        flow.begin_submit().unwrap();

        assert!(flow.begin_submit().is_err());
        assert!(flow.cancel().is_err());
        assert!(flow.is_busy());
    }

    #[test]
    fn test_failure_keeps_dialog_open_for_retry() {
        let mut flow = ImportFlow::default();
        flow.open(plan(&["a", "b"])).unwrap();
        flow.begin_submit().unwrap();
        flow.finish(Err("connection reset".to_string())).unwrap();

        assert!(flow.can_submit());
        assert_eq!(flow.error(), Some("connection reset"));
        assert_eq!(flow.pending().len(), 2);

        let retried = flow.begin_submit().unwrap();
        assert_eq!(retried.len(), 2);
        flow.finish(Ok(())).unwrap();
        assert_eq!(flow, ImportFlow::Done { imported: 2 });
    }

    #[test]
    fn test_cancel_discards_batch() {
        let mut flow = ImportFlow::default();
        flow.open(plan(&["a"])).unwrap();
        flow.cancel().unwrap();
        assert_eq!(flow, ImportFlow::Idle);
        assert!(flow.pending().is_empty());

        flow.open(plan(&["a"])).unwrap();
        flow.begin_submit().unwrap();
        flow.finish(Err("nope".to_string())).unwrap();
        flow.cancel().unwrap();
        assert_eq!(flow, ImportFlow::Idle);
    }

    #[test]
    fn test_invalid_transitions_leave_state_unchanged() {
        let mut flow = ImportFlow::default();
        assert!(flow.begin_submit().is_err());
        assert!(flow.finish(Ok(())).is_err());
        assert!(flow.acknowledge().is_err());
        assert_eq!(flow, ImportFlow::Idle);

        flow.open(plan(&["a"])).unwrap();
        assert!(flow.open(plan(&["b"])).is_err());
        assert_eq!(flow.pending()[0].slug, "a");
    }
}
