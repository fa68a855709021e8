use utoipa::OpenApi;

use crate::error::ErrorResponse;
use crate::handlers;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "dossier API",
        description = "Document intake and review service"
    ),
    paths(
        handlers::health::health,
        handlers::auth::register,
        handlers::auth::login,
        handlers::records::upload_records,
        handlers::records::list_records,
        handlers::records::list_filter_values,
        handlers::records::download_record,
        handlers::records::update_record_status,
        handlers::records::remove_record,
        handlers::records::bulk_download,
        handlers::records::bulk_remove,
        handlers::agents::list_agents,
        handlers::agents::register_agent,
        handlers::admin::list_users,
        handlers::admin::remove_user,
        handlers::admin::list_all_agents,
        handlers::admin::remove_agent,
    ),
    components(schemas(
        ErrorResponse,
        dossier_core::filter::DistinctValues,
        dossier_core::models::RecordStatus,
        handlers::auth::RegisterRequest,
        handlers::auth::LoginRequest,
        handlers::auth::UserResponse,
        handlers::auth::AuthResponse,
        handlers::records::RecordResponse,
        handlers::records::ListRecordsResponse,
        handlers::records::UpdateStatusRequest,
        handlers::records::BulkDownloadRequest,
        handlers::records::BulkRemoveRequest,
        handlers::records::BulkRemoveResponse,
        handlers::agents::RegisterAgentRequest,
        handlers::agents::AgentResponse,
    )),
    tags(
        (name = "auth", description = "Registration and login"),
        (name = "records", description = "File import, review and download"),
        (name = "agents", description = "Agent registry"),
        (name = "admin", description = "User and agent administration"),
        (name = "health", description = "Service health")
    )
)]
pub struct ApiDoc;
