//! Batch action dispatcher: bulk download and bulk removal over a selected
//! or filtered set of records.

use std::future::Future;
use std::time::Duration;

use dossier_core::models::FileRecord;
use dossier_core::AppError;
use dossier_db::RecordRepository;
use uuid::Uuid;

/// Aggregate result of a batch operation. Individual failures are counted,
/// never fatal to the batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchOutcome {
    pub succeeded: usize,
    pub failed: usize,
}

impl BatchOutcome {
    pub fn total(&self) -> usize {
        self.succeeded + self.failed
    }
}

/// Collaborator asked before destructive bulk operations. The API maps an
/// explicit `confirm` flag onto this; tests substitute canned answers.
pub trait ConfirmationPrompt: Send + Sync {
    fn confirm(&self, message: &str) -> bool;
}

impl ConfirmationPrompt for bool {
    fn confirm(&self, _message: &str) -> bool {
        *self
    }
}

pub struct BatchDispatcher {
    delay: Duration,
}

impl BatchDispatcher {
    /// `delay_ms` is the pause between successive items in a bulk
    /// download, to avoid tripping a host's simultaneous-download limits.
    pub fn new(delay_ms: u64) -> Self {
        BatchDispatcher {
            delay: Duration::from_millis(delay_ms),
        }
    }

    /// Materialize every targeted record in order, pausing between items.
    ///
    /// A failing materialization (missing or corrupt payload) is logged and
    /// counted; the remaining items are still attempted. Returns the
    /// successfully materialized values alongside the aggregate counts.
    pub async fn bulk_download<F, Fut, T>(
        &self,
        records: &[FileRecord],
        mut materialize: F,
    ) -> (Vec<T>, BatchOutcome)
    where
        F: FnMut(FileRecord) -> Fut,
        Fut: Future<Output = Result<T, AppError>>,
    {
        let mut outcome = BatchOutcome::default();
        let mut materialized = Vec::with_capacity(records.len());

        for (index, record) in records.iter().enumerate() {
            match materialize(record.clone()).await {
                Ok(value) => {
                    materialized.push(value);
                    outcome.succeeded += 1;
                }
                Err(e) => {
                    tracing::warn!(
                        record_id = %record.id,
                        name = %record.name,
                        error = %e,
                        "Skipping record in bulk download"
                    );
                    outcome.failed += 1;
                }
            }

            if index + 1 < records.len() && !self.delay.is_zero() {
                tokio::time::sleep(self.delay).await;
            }
        }

        tracing::info!(
            succeeded = outcome.succeeded,
            failed = outcome.failed,
            "Bulk download finished"
        );
        (materialized, outcome)
    }

    /// Remove the targeted ids after the prompt collaborator confirms.
    /// A declined prompt removes nothing.
    pub async fn bulk_remove(
        &self,
        repository: &RecordRepository,
        owner_id: Uuid,
        ids: &[Uuid],
        prompt: &dyn ConfirmationPrompt,
    ) -> Result<usize, AppError> {
        let message = format!("Remove {} record(s)?", ids.len());
        if !prompt.confirm(&message) {
            return Err(AppError::Conflict(
                "Bulk removal was not confirmed".to_string(),
            ));
        }
        Ok(repository.remove_many(owner_id, ids).await)
    }
}
