use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use chrono::{DateTime, Utc};
use dossier_core::models::Agent;
use dossier_core::AppError;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::auth::models::AuthContext;
use crate::error::{ErrorResponse, HttpAppError};
use crate::state::AppState;
use validator::Validate;

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct RegisterAgentRequest {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    #[validate(length(min = 1, message = "Username is required"))]
    pub username: String,
    #[validate(email(message = "Invalid email address"))]
    pub email: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct AgentResponse {
    pub id: Uuid,
    pub name: String,
    pub username: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

impl From<Agent> for AgentResponse {
    fn from(agent: Agent) -> Self {
        AgentResponse {
            id: agent.id,
            name: agent.name,
            username: agent.username,
            email: agent.email,
            created_at: agent.created_at,
        }
    }
}

/// List registered agents (populates the assignment dropdown).
#[utoipa::path(
    get,
    path = "/api/v0/agents",
    tag = "agents",
    responses(
        (status = 200, description = "Registered agents", body = [AgentResponse]),
        (status = 401, description = "Not authenticated", body = ErrorResponse)
    )
)]
pub async fn list_agents(
    _ctx: AuthContext,
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpAppError> {
    let agents: Vec<AgentResponse> = state
        .agents
        .list()
        .await
        .into_iter()
        .map(AgentResponse::from)
        .collect();
    Ok(Json(agents))
}

/// Register a new agent.
#[utoipa::path(
    post,
    path = "/api/v0/agents",
    tag = "agents",
    request_body = RegisterAgentRequest,
    responses(
        (status = 201, description = "Agent created", body = AgentResponse),
        (status = 400, description = "Invalid agent data", body = ErrorResponse),
        (status = 409, description = "Agent username already exists", body = ErrorResponse)
    )
)]
pub async fn register_agent(
    ctx: AuthContext,
    State(state): State<Arc<AppState>>,
    Json(request): Json<RegisterAgentRequest>,
) -> Result<impl IntoResponse, HttpAppError> {
    request
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let agent = state
        .agents
        .create(Agent::new(
            request.name.trim(),
            request.username.trim(),
            request.email.trim(),
        ))
        .await?;

    tracing::info!(agent_id = %agent.id, created_by = %ctx.user_id, "Agent registered");
    Ok((StatusCode::CREATED, Json(AgentResponse::from(agent))))
}
