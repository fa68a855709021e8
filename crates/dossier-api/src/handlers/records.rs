use axum::{
    extract::{Multipart, Path, Query, State},
    http::{header, HeaderMap, HeaderName, HeaderValue, StatusCode},
    response::IntoResponse,
    Json,
};
use chrono::{DateTime, Utc};
use dossier_core::filter::{self, DistinctValues, FilterCriteria};
use dossier_core::models::{FileRecord, RecordStatus};
use dossier_core::selection::Selection;
use dossier_core::{validation, AppError};
use dossier_services::{archive, payload};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::auth::models::AuthContext;
use crate::error::{ErrorResponse, HttpAppError};
use crate::state::AppState;

/// Record projection for listings. The stored payload never travels with
/// list responses; downloads materialize it separately.
#[derive(Debug, Serialize, ToSchema)]
pub struct RecordResponse {
    pub id: Uuid,
    pub name: String,
    pub size_kb: f64,
    pub upload_date: DateTime<Utc>,
    pub agent: Option<String>,
    pub process_number: Option<String>,
    pub file_type: Option<String>,
    pub status: RecordStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rejection_reason: Option<String>,
}

impl From<FileRecord> for RecordResponse {
    fn from(record: FileRecord) -> Self {
        RecordResponse {
            id: record.id,
            name: record.name,
            size_kb: record.size_kb,
            upload_date: record.upload_date,
            agent: record.agent,
            process_number: record.process_number,
            file_type: record.file_type,
            status: record.status,
            rejection_reason: record.rejection_reason,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ListRecordsResponse {
    pub records: Vec<RecordResponse>,
    pub total: usize,
    pub total_size_kb: f64,
}

/// Filter query parameters. Blank values are treated as "no filter", which
/// is what HTML filter forms submit for untouched fields.
#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct RecordFilterQuery {
    pub agent: Option<String>,
    pub process_number: Option<String>,
    pub file_type: Option<String>,
    pub status: Option<RecordStatus>,
}

impl RecordFilterQuery {
    fn into_criteria(self) -> FilterCriteria {
        let non_blank = |v: Option<String>| v.filter(|s| !s.trim().is_empty());
        FilterCriteria {
            agent: non_blank(self.agent),
            process_number: non_blank(self.process_number),
            file_type: non_blank(self.file_type),
            status: self.status,
        }
    }
}

/// Import one or more files.
///
/// Multipart fields: repeated `file` parts plus `agent`, `process_number`
/// and an optional `file_type` override applied to every file in the
/// batch.
#[utoipa::path(
    post,
    path = "/api/v0/records",
    tag = "records",
    request_body(content = String, content_type = "multipart/form-data"),
    responses(
        (status = 201, description = "Records created", body = [RecordResponse]),
        (status = 400, description = "Invalid upload", body = ErrorResponse)
    )
)]
pub async fn upload_records(
    ctx: AuthContext,
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> Result<impl IntoResponse, HttpAppError> {
    let mut agent: Option<String> = None;
    let mut process_number: Option<String> = None;
    let mut file_type_override: Option<String> = None;
    let mut files: Vec<(String, Option<String>, Vec<u8>)> = Vec::new();

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "agent" => agent = Some(field.text().await?),
            "process_number" => process_number = Some(field.text().await?),
            "file_type" => file_type_override = Some(field.text().await?),
            "file" => {
                let file_name = field
                    .file_name()
                    .map(str::to_string)
                    .ok_or_else(|| AppError::InvalidInput("File part without a name".to_string()))?;
                let content_type = field.content_type().map(str::to_string);
                let data = field.bytes().await?.to_vec();
                files.push((file_name, content_type, data));
            }
            other => {
                tracing::debug!(field = other, "Ignoring unknown multipart field");
            }
        }
    }

    // Same rules the import form enforces: an assigned agent, a process
    // number with substance, and at least one file.
    let agent = agent
        .map(|a| a.trim().to_string())
        .filter(|a| !a.is_empty())
        .ok_or_else(|| AppError::Validation("Select an agent".to_string()))?;
    if !state.agents.exists_by_name(&agent).await {
        return Err(AppError::Validation(format!("Unknown agent: {}", agent)).into());
    }

    let process_number = process_number.unwrap_or_default();
    validation::validate_process_number(&process_number)?;
    let process_number = process_number.trim().to_string();

    if files.is_empty() {
        return Err(AppError::Validation("Select at least one file".to_string()).into());
    }

    let max_bytes = state.config.max_upload_kb * 1024;
    let mut records = Vec::with_capacity(files.len());
    for (file_name, content_type, data) in files {
        if data.is_empty() {
            return Err(AppError::Validation(format!("File is empty: {}", file_name)).into());
        }
        if data.len() as u64 > max_bytes {
            return Err(AppError::Validation(format!(
                "File exceeds {} KB limit: {}",
                state.config.max_upload_kb, file_name
            ))
            .into());
        }

        let file_type = file_type_override
            .clone()
            .filter(|t| !t.trim().is_empty())
            .or_else(|| classify(&file_name, content_type.as_deref()));

        records.push(FileRecord::new(
            ctx.user_id,
            file_name,
            payload::size_kb(&data),
            payload::encode(&data),
            Some(agent.clone()),
            Some(process_number.clone()),
            file_type,
        ));
    }

    let created = state.records.add_many(records).await;
    tracing::info!(
        owner_id = %ctx.user_id,
        count = created.len(),
        "Files imported"
    );

    let body: Vec<RecordResponse> = created.into_iter().map(RecordResponse::from).collect();
    Ok((StatusCode::CREATED, Json(body)))
}

/// Derive a classification from the file name extension, falling back to
/// the declared content type.
fn classify(file_name: &str, content_type: Option<&str>) -> Option<String> {
    if let Some((stem, extension)) = file_name.rsplit_once('.') {
        if !stem.is_empty() && !extension.is_empty() {
            return Some(extension.to_lowercase());
        }
    }
    content_type.and_then(|ct| ct.rsplit_once('/').map(|(_, subtype)| subtype.to_lowercase()))
}

/// List the caller's records, filtered.
#[utoipa::path(
    get,
    path = "/api/v0/records",
    tag = "records",
    params(RecordFilterQuery),
    responses(
        (status = 200, description = "Filtered records", body = ListRecordsResponse),
        (status = 401, description = "Not authenticated", body = ErrorResponse)
    )
)]
pub async fn list_records(
    ctx: AuthContext,
    State(state): State<Arc<AppState>>,
    Query(query): Query<RecordFilterQuery>,
) -> Result<impl IntoResponse, HttpAppError> {
    let criteria = query.into_criteria();
    let owned = state.records.list_for_owner(ctx.user_id).await;
    let filtered = filter::apply(&owned, &criteria);

    let total = filtered.len();
    let total_size_kb =
        (filtered.iter().map(|r| r.size_kb).sum::<f64>() * 100.0).round() / 100.0;

    Ok(Json(ListRecordsResponse {
        records: filtered.into_iter().map(RecordResponse::from).collect(),
        total,
        total_size_kb,
    }))
}

/// Distinct values present in the caller's records, for filter dropdowns.
#[utoipa::path(
    get,
    path = "/api/v0/records/filters",
    tag = "records",
    responses(
        (status = 200, description = "Distinct filterable values", body = DistinctValues)
    )
)]
pub async fn list_filter_values(
    ctx: AuthContext,
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpAppError> {
    let owned = state.records.list_for_owner(ctx.user_id).await;
    Ok(Json(filter::distinct_values(&owned)))
}

/// Download one record's file.
#[utoipa::path(
    get,
    path = "/api/v0/records/{id}/download",
    tag = "records",
    params(
        ("id" = Uuid, Path, description = "Record ID")
    ),
    responses(
        (status = 200, description = "File bytes"),
        (status = 404, description = "Record not found", body = ErrorResponse),
        (status = 422, description = "Stored payload is missing or corrupt", body = ErrorResponse)
    )
)]
pub async fn download_record(
    ctx: AuthContext,
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpAppError> {
    let record = state.records.get(ctx.user_id, id).await?;
    let bytes = payload::decode(&record.content)?;

    let mut headers = HeaderMap::new();
    headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static(content_type_for(record.file_type.as_deref())),
    );
    let encoded_name =
        percent_encoding::utf8_percent_encode(&record.name, percent_encoding::NON_ALPHANUMERIC);
    let disposition = format!("attachment; filename*=UTF-8''{}", encoded_name);
    headers.insert(
        header::CONTENT_DISPOSITION,
        HeaderValue::from_str(&disposition)
            .map_err(|e| AppError::Internal(format!("Invalid disposition header: {}", e)))?,
    );

    Ok((headers, bytes))
}

fn content_type_for(file_type: Option<&str>) -> &'static str {
    match file_type {
        Some("pdf") => "application/pdf",
        _ => "application/octet-stream",
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateStatusRequest {
    pub status: RecordStatus,
    /// Required when rejecting.
    pub reason: Option<String>,
}

/// Change a record's approval status.
#[utoipa::path(
    put,
    path = "/api/v0/records/{id}/status",
    tag = "records",
    params(
        ("id" = Uuid, Path, description = "Record ID")
    ),
    request_body = UpdateStatusRequest,
    responses(
        (status = 200, description = "Status updated", body = RecordResponse),
        (status = 400, description = "Rejection without a reason", body = ErrorResponse),
        (status = 404, description = "Record not found", body = ErrorResponse)
    )
)]
pub async fn update_record_status(
    ctx: AuthContext,
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateStatusRequest>,
) -> Result<impl IntoResponse, HttpAppError> {
    let updated = state
        .records
        .update_status(ctx.user_id, id, request.status, request.reason.as_deref())
        .await?;
    Ok(Json(RecordResponse::from(updated)))
}

/// Remove one record.
#[utoipa::path(
    delete,
    path = "/api/v0/records/{id}",
    tag = "records",
    params(
        ("id" = Uuid, Path, description = "Record ID")
    ),
    responses(
        (status = 204, description = "Record removed"),
        (status = 404, description = "Record not found", body = ErrorResponse)
    )
)]
pub async fn remove_record(
    ctx: AuthContext,
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpAppError> {
    state.records.remove(ctx.user_id, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct BulkDownloadRequest {
    /// Selected record ids. Empty means "everything under the current
    /// filter".
    #[serde(default)]
    pub ids: Vec<Uuid>,
}

/// Resolve the records a bulk action targets: the whole filtered view, or
/// the selected subset of it. Ids outside the view are dropped, keeping
/// the selection scoped to what the caller can see.
fn bulk_targets(visible: Vec<FileRecord>, ids: &[Uuid]) -> Vec<FileRecord> {
    if ids.is_empty() {
        return visible;
    }
    let selection: Selection = ids.iter().copied().collect();
    selection
        .targets(&visible)
        .into_iter()
        .cloned()
        .collect()
}

/// Download a batch of records as a ZIP archive.
///
/// Every targeted record is attempted; per-record payload failures are
/// reported in the `X-Error-Count` header instead of failing the batch.
#[utoipa::path(
    post,
    path = "/api/v0/records/bulk/download",
    tag = "records",
    params(RecordFilterQuery),
    request_body = BulkDownloadRequest,
    responses(
        (status = 200, description = "ZIP archive of the succeeded records"),
        (status = 404, description = "Nothing to download", body = ErrorResponse)
    )
)]
pub async fn bulk_download(
    ctx: AuthContext,
    State(state): State<Arc<AppState>>,
    Query(query): Query<RecordFilterQuery>,
    Json(request): Json<BulkDownloadRequest>,
) -> Result<impl IntoResponse, HttpAppError> {
    let criteria = query.into_criteria();
    let owned = state.records.list_for_owner(ctx.user_id).await;
    let targets = bulk_targets(filter::apply(&owned, &criteria), &request.ids);

    if targets.is_empty() {
        return Err(AppError::NotFound("No records to download".to_string()).into());
    }

    let (entries, outcome) = state
        .dispatcher
        .bulk_download(&targets, |record| async move {
            payload::decode(&record.content).map(|bytes| (record.name, bytes))
        })
        .await;

    let archive_bytes = archive::build_zip(&entries)?;

    let mut headers = HeaderMap::new();
    headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("application/zip"),
    );
    headers.insert(
        header::CONTENT_DISPOSITION,
        HeaderValue::from_static("attachment; filename=\"records.zip\""),
    );
    headers.insert(
        HeaderName::from_static("x-success-count"),
        HeaderValue::from(outcome.succeeded),
    );
    headers.insert(
        HeaderName::from_static("x-error-count"),
        HeaderValue::from(outcome.failed),
    );

    Ok((headers, archive_bytes))
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct BulkRemoveRequest {
    /// Selected record ids. Empty means "everything under the current
    /// filter".
    #[serde(default)]
    pub ids: Vec<Uuid>,
    /// Explicit confirmation of the destructive action.
    #[serde(default)]
    pub confirm: bool,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct BulkRemoveResponse {
    pub removed: usize,
}

/// Remove a batch of records.
#[utoipa::path(
    post,
    path = "/api/v0/records/bulk/remove",
    tag = "records",
    params(RecordFilterQuery),
    request_body = BulkRemoveRequest,
    responses(
        (status = 200, description = "Records removed", body = BulkRemoveResponse),
        (status = 409, description = "Removal not confirmed", body = ErrorResponse)
    )
)]
pub async fn bulk_remove(
    ctx: AuthContext,
    State(state): State<Arc<AppState>>,
    Query(query): Query<RecordFilterQuery>,
    Json(request): Json<BulkRemoveRequest>,
) -> Result<impl IntoResponse, HttpAppError> {
    let criteria = query.into_criteria();
    let owned = state.records.list_for_owner(ctx.user_id).await;
    let targets = bulk_targets(filter::apply(&owned, &criteria), &request.ids);
    let target_ids: Vec<Uuid> = targets.iter().map(|r| r.id).collect();

    let removed = state
        .dispatcher
        .bulk_remove(&state.records, ctx.user_id, &target_ids, &request.confirm)
        .await?;

    tracing::info!(owner_id = %ctx.user_id, removed, "Bulk removal finished");
    Ok(Json(BulkRemoveResponse { removed }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_prefers_extension() {
        assert_eq!(classify("scan.PDF", None).as_deref(), Some("pdf"));
        assert_eq!(
            classify("notes.docx", Some("application/octet-stream")).as_deref(),
            Some("docx")
        );
    }

    #[test]
    fn test_classify_falls_back_to_content_type() {
        assert_eq!(
            classify("README", Some("application/pdf")).as_deref(),
            Some("pdf")
        );
        assert_eq!(classify("README", None), None);
    }

    #[test]
    fn test_blank_query_values_mean_no_filter() {
        let query = RecordFilterQuery {
            agent: Some("  ".to_string()),
            process_number: Some(String::new()),
            file_type: None,
            status: None,
        };
        assert!(query.into_criteria().is_empty());
    }
}
