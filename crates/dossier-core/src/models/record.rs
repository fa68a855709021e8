use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Approval state of a file record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum RecordStatus {
    Pending,
    Approved,
    Rejected,
}

impl RecordStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RecordStatus::Pending => "pending",
            RecordStatus::Approved => "approved",
            RecordStatus::Rejected => "rejected",
        }
    }
}

impl std::fmt::Display for RecordStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Opaque stored representation of an uploaded file's bytes.
///
/// Produced by the payload codec at upload time and passed through
/// untouched until download; the core never inspects it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Payload(String);

impl Payload {
    pub fn new(encoded: impl Into<String>) -> Self {
        Payload(encoded.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// One uploaded document and its review metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileRecord {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub name: String,
    pub size_kb: f64,
    /// Fixed at creation, never updated.
    pub upload_date: DateTime<Utc>,
    pub content: Payload,
    pub agent: Option<String>,
    pub process_number: Option<String>,
    pub file_type: Option<String>,
    pub status: RecordStatus,
    /// Some iff `status == Rejected`; maintained by the status workflow.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub rejection_reason: Option<String>,
}

impl FileRecord {
    /// Build a new pending record. Classification and assignment fields are
    /// normalized so that blank strings become "not set".
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        owner_id: Uuid,
        name: impl Into<String>,
        size_kb: f64,
        content: Payload,
        agent: Option<String>,
        process_number: Option<String>,
        file_type: Option<String>,
    ) -> Self {
        FileRecord {
            id: Uuid::new_v4(),
            owner_id,
            name: name.into(),
            size_kb,
            upload_date: Utc::now(),
            content,
            agent: normalize_optional(agent),
            process_number: normalize_optional(process_number),
            file_type: normalize_optional(file_type).map(|t| t.to_lowercase()),
            status: RecordStatus::Pending,
            rejection_reason: None,
        }
    }
}

fn normalize_optional(value: Option<String>) -> Option<String> {
    value.and_then(|v| {
        let trimmed = v.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    })
}
