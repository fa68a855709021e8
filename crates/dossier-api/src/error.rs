//! HTTP error response conversion for AppError.

use axum::extract::multipart::MultipartError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use dossier_core::AppError;
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    /// Machine-readable error code for programmatic handling
    pub code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

/// Wrapper type for AppError to implement IntoResponse.
/// Necessary because of Rust's orphan rules: we can't implement
/// IntoResponse (external trait) for AppError (type from dossier-core).
#[derive(Debug)]
pub struct HttpAppError(pub AppError);

impl From<AppError> for HttpAppError {
    fn from(err: AppError) -> Self {
        HttpAppError(err)
    }
}

impl From<MultipartError> for HttpAppError {
    fn from(err: MultipartError) -> Self {
        HttpAppError(AppError::InvalidInput(format!(
            "Malformed multipart request: {}",
            err
        )))
    }
}

fn is_production_env() -> bool {
    std::env::var("ENVIRONMENT")
        .map(|env| {
            let env = env.to_lowercase();
            env == "production" || env == "prod"
        })
        .unwrap_or(false)
}

impl IntoResponse for HttpAppError {
    fn into_response(self) -> Response {
        let app_error = &self.0;

        let status = StatusCode::from_u16(app_error.http_status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        if app_error.is_server_fault() {
            tracing::error!(error = %app_error, code = app_error.error_code(), "Request failed");
        } else {
            tracing::warn!(error = %app_error, code = app_error.error_code(), "Request rejected");
        }

        // Detailed messages are for development only.
        let details = if is_production_env() {
            None
        } else {
            Some(app_error.to_string())
        };

        let body = Json(ErrorResponse {
            error: client_message(app_error),
            code: app_error.error_code().to_string(),
            details,
        });

        (status, body).into_response()
    }
}

/// What the client sees. Server faults get a generic message; everything
/// else is user-correctable and shown as-is.
fn client_message(error: &AppError) -> String {
    if error.is_server_fault() {
        "An internal error occurred".to_string()
    } else {
        error.to_string()
    }
}
