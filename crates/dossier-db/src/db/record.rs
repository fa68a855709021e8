use std::sync::Arc;

use dossier_core::models::{FileRecord, RecordStatus};
use dossier_core::{workflow, AppError};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::store::JsonStore;

const COLLECTION: &str = "records";

/// Repository over the uploaded-file collection. All mutation of records
/// flows through these methods, so each add/remove/status-change is atomic
/// with respect to subsequent reads.
#[derive(Clone)]
pub struct RecordRepository {
    store: JsonStore,
    records: Arc<RwLock<Vec<FileRecord>>>,
}

impl RecordRepository {
    /// Load the collection from disk. An unreadable collection degrades to
    /// an empty one so a corrupt file never blocks a session.
    pub async fn load(store: JsonStore) -> Self {
        let records = match store.load::<FileRecord>(COLLECTION).await {
            Ok(records) => records,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to load record collection, starting empty");
                Vec::new()
            }
        };
        tracing::info!(count = records.len(), "Record collection loaded");
        RecordRepository {
            store,
            records: Arc::new(RwLock::new(records)),
        }
    }

    async fn persist(&self, records: &[FileRecord]) {
        // Write failures are non-fatal: the in-memory collection stays
        // authoritative for the rest of the session.
        if let Err(e) = self.store.save(COLLECTION, records).await {
            tracing::warn!(error = %e, "Failed to persist record collection");
        }
    }

    /// All records owned by `owner_id`, in insertion order.
    pub async fn list_for_owner(&self, owner_id: Uuid) -> Vec<FileRecord> {
        self.records
            .read()
            .await
            .iter()
            .filter(|r| r.owner_id == owner_id)
            .cloned()
            .collect()
    }

    pub async fn get(&self, owner_id: Uuid, id: Uuid) -> Result<FileRecord, AppError> {
        self.records
            .read()
            .await
            .iter()
            .find(|r| r.owner_id == owner_id && r.id == id)
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("Record not found: {}", id)))
    }

    /// Append a batch of freshly uploaded records.
    pub async fn add_many(&self, new_records: Vec<FileRecord>) -> Vec<FileRecord> {
        let mut records = self.records.write().await;
        records.extend(new_records.iter().cloned());
        self.persist(&records).await;
        tracing::info!(count = new_records.len(), "Records added");
        new_records
    }

    /// Run the status workflow against one record and store the result.
    pub async fn update_status(
        &self,
        owner_id: Uuid,
        id: Uuid,
        new_status: RecordStatus,
        reason: Option<&str>,
    ) -> Result<FileRecord, AppError> {
        let mut records = self.records.write().await;
        let position = records
            .iter()
            .position(|r| r.owner_id == owner_id && r.id == id)
            .ok_or_else(|| AppError::NotFound(format!("Record not found: {}", id)))?;

        let updated = workflow::apply_status(&records[position], new_status, reason)?;
        records[position] = updated.clone();
        self.persist(&records).await;

        tracing::info!(
            record_id = %id,
            status = %updated.status,
            "Record status updated"
        );
        Ok(updated)
    }

    /// Remove one record. Removal is atomic per id.
    pub async fn remove(&self, owner_id: Uuid, id: Uuid) -> Result<FileRecord, AppError> {
        let mut records = self.records.write().await;
        let position = records
            .iter()
            .position(|r| r.owner_id == owner_id && r.id == id)
            .ok_or_else(|| AppError::NotFound(format!("Record not found: {}", id)))?;
        let removed = records.remove(position);
        self.persist(&records).await;
        tracing::info!(record_id = %id, "Record removed");
        Ok(removed)
    }

    /// Remove every targeted id, leaving the relative order of the
    /// remaining records unchanged. Returns how many were removed.
    pub async fn remove_many(&self, owner_id: Uuid, ids: &[Uuid]) -> usize {
        let mut records = self.records.write().await;
        let before = records.len();
        records.retain(|r| !(r.owner_id == owner_id && ids.contains(&r.id)));
        let removed = before - records.len();
        if removed > 0 {
            self.persist(&records).await;
        }
        tracing::info!(count = removed, "Records removed in bulk");
        removed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dossier_core::models::Payload;

    async fn repository() -> (RecordRepository, tempfile::TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonStore::open(dir.path()).await.unwrap();
        (RecordRepository::load(store).await, dir)
    }

    fn record(owner_id: Uuid, name: &str) -> FileRecord {
        FileRecord::new(
            owner_id,
            name,
            5.0,
            Payload::new("AA=="),
            Some("Alice".to_string()),
            Some("2024-001".to_string()),
            Some("pdf".to_string()),
        )
    }

    #[tokio::test]
    async fn test_records_survive_reload() {
        let dir = tempfile::tempdir().unwrap();
        let owner = Uuid::new_v4();
        {
            let store = JsonStore::open(dir.path()).await.unwrap();
            let repo = RecordRepository::load(store).await;
            repo.add_many(vec![record(owner, "a.pdf"), record(owner, "b.pdf")])
                .await;
        }
        let store = JsonStore::open(dir.path()).await.unwrap();
        let repo = RecordRepository::load(store).await;
        let records = repo.list_for_owner(owner).await;
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].name, "a.pdf");
    }

    #[tokio::test]
    async fn test_owner_scoping() {
        let (repo, _dir) = repository().await;
        let alice = Uuid::new_v4();
        let bob = Uuid::new_v4();
        repo.add_many(vec![record(alice, "a.pdf"), record(bob, "b.pdf")])
            .await;
        assert_eq!(repo.list_for_owner(alice).await.len(), 1);
        assert!(repo.get(alice, repo.list_for_owner(bob).await[0].id).await.is_err());
    }

    #[tokio::test]
    async fn test_update_status_persists_workflow_result() {
        let (repo, _dir) = repository().await;
        let owner = Uuid::new_v4();
        let added = repo.add_many(vec![record(owner, "a.pdf")]).await;
        let id = added[0].id;

        let rejected = repo
            .update_status(owner, id, RecordStatus::Rejected, Some("missing signature"))
            .await
            .unwrap();
        assert_eq!(rejected.rejection_reason.as_deref(), Some("missing signature"));

        // Blank reason leaves the stored record unchanged.
        let err = repo
            .update_status(owner, id, RecordStatus::Rejected, Some("  "))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        let stored = repo.get(owner, id).await.unwrap();
        assert_eq!(stored.rejection_reason.as_deref(), Some("missing signature"));
    }

    #[tokio::test]
    async fn test_remove_many_preserves_order_of_rest() {
        let (repo, _dir) = repository().await;
        let owner = Uuid::new_v4();
        let added = repo
            .add_many(vec![
                record(owner, "1.pdf"),
                record(owner, "2.pdf"),
                record(owner, "3.pdf"),
            ])
            .await;

        let removed = repo.remove_many(owner, &[added[1].id]).await;
        assert_eq!(removed, 1);

        let remaining = repo.list_for_owner(owner).await;
        assert_eq!(
            remaining.iter().map(|r| r.name.as_str()).collect::<Vec<_>>(),
            vec!["1.pdf", "3.pdf"]
        );
    }

    #[tokio::test]
    async fn test_remove_missing_record_is_not_found() {
        let (repo, _dir) = repository().await;
        let err = repo.remove(Uuid::new_v4(), Uuid::new_v4()).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }
}
