//! Admin area: user and agent management. Every handler requires the
//! administrator role on top of authentication.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use std::sync::Arc;
use uuid::Uuid;

use crate::auth::models::AuthContext;
use crate::error::{ErrorResponse, HttpAppError};
use crate::handlers::agents::AgentResponse;
use crate::handlers::auth::UserResponse;
use crate::state::AppState;

/// List all accounts.
#[utoipa::path(
    get,
    path = "/api/v0/admin/users",
    tag = "admin",
    responses(
        (status = 200, description = "Registered users", body = [UserResponse]),
        (status = 403, description = "Administrator role required", body = ErrorResponse)
    )
)]
pub async fn list_users(
    ctx: AuthContext,
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpAppError> {
    ctx.require_admin()?;
    let users: Vec<UserResponse> = state
        .users
        .list()
        .await
        .into_iter()
        .map(UserResponse::from)
        .collect();
    Ok(Json(users))
}

/// Delete an account.
#[utoipa::path(
    delete,
    path = "/api/v0/admin/users/{id}",
    tag = "admin",
    params(
        ("id" = Uuid, Path, description = "User ID")
    ),
    responses(
        (status = 204, description = "User deleted"),
        (status = 403, description = "Administrator role required", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse)
    )
)]
pub async fn remove_user(
    ctx: AuthContext,
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpAppError> {
    ctx.require_admin()?;
    let removed = state.users.remove(id).await?;
    tracing::info!(user_id = %removed.id, removed_by = %ctx.user_id, "User deleted by admin");
    Ok(StatusCode::NO_CONTENT)
}

/// List all agents (admin view).
#[utoipa::path(
    get,
    path = "/api/v0/admin/agents",
    tag = "admin",
    responses(
        (status = 200, description = "Registered agents", body = [AgentResponse]),
        (status = 403, description = "Administrator role required", body = ErrorResponse)
    )
)]
pub async fn list_all_agents(
    ctx: AuthContext,
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpAppError> {
    ctx.require_admin()?;
    let agents: Vec<AgentResponse> = state
        .agents
        .list()
        .await
        .into_iter()
        .map(AgentResponse::from)
        .collect();
    Ok(Json(agents))
}

/// Delete an agent.
#[utoipa::path(
    delete,
    path = "/api/v0/admin/agents/{id}",
    tag = "admin",
    params(
        ("id" = Uuid, Path, description = "Agent ID")
    ),
    responses(
        (status = 204, description = "Agent deleted"),
        (status = 403, description = "Administrator role required", body = ErrorResponse),
        (status = 404, description = "Agent not found", body = ErrorResponse)
    )
)]
pub async fn remove_agent(
    ctx: AuthContext,
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpAppError> {
    ctx.require_admin()?;
    let removed = state.agents.remove(id).await?;
    tracing::info!(agent_id = %removed.id, removed_by = %ctx.user_id, "Agent deleted by admin");
    Ok(StatusCode::NO_CONTENT)
}
