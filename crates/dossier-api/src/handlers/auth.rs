use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use chrono::{DateTime, Utc};
use dossier_core::models::{User, UserOrigin, UserRole};
use dossier_core::{validation, AppError};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::auth::jwt;
use crate::error::{ErrorResponse, HttpAppError};
use crate::state::AppState;
use validator::Validate;

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct RegisterRequest {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    #[validate(email(message = "Invalid email address"))]
    pub email: String,
    #[validate(length(min = 3, message = "Username must have at least 3 characters"))]
    pub username: String,
    pub password: String,
    #[serde(default)]
    pub origin: UserOrigin,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Account projection without credentials.
#[derive(Debug, Serialize, ToSchema)]
pub struct UserResponse {
    pub id: Uuid,
    pub username: String,
    pub name: String,
    pub email: String,
    pub role: UserRole,
    pub origin: UserOrigin,
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        UserResponse {
            id: user.id,
            username: user.username,
            name: user.name,
            email: user.email,
            role: user.role,
            origin: user.origin,
            created_at: user.created_at,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct AuthResponse {
    pub token: String,
    pub user: UserResponse,
}

/// Create a new account.
#[utoipa::path(
    post,
    path = "/api/v0/auth/register",
    tag = "auth",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Account created", body = UserResponse),
        (status = 400, description = "Invalid registration data", body = ErrorResponse),
        (status = 409, description = "Username or email already taken", body = ErrorResponse)
    )
)]
pub async fn register(
    State(state): State<Arc<AppState>>,
    Json(request): Json<RegisterRequest>,
) -> Result<impl IntoResponse, HttpAppError> {
    request
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;
    validation::validate_password(&request.password)?;

    let password_hash = bcrypt::hash(&request.password, state.config.bcrypt_cost)
        .map_err(|e| AppError::Internal(format!("Failed to hash password: {}", e)))?;

    // The very first account bootstraps administration; everyone after
    // that registers as a regular user.
    let role = if state.users.is_empty().await {
        UserRole::Admin
    } else {
        UserRole::User
    };

    let user = state
        .users
        .create(User::new(
            request.username.trim(),
            request.name.trim(),
            request.email.trim(),
            password_hash,
            role,
            request.origin,
        ))
        .await?;

    Ok((StatusCode::CREATED, Json(UserResponse::from(user))))
}

/// Exchange credentials for an access token.
#[utoipa::path(
    post,
    path = "/api/v0/auth/login",
    tag = "auth",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Authenticated", body = AuthResponse),
        (status = 401, description = "Invalid username or password", body = ErrorResponse)
    )
)]
pub async fn login(
    State(state): State<Arc<AppState>>,
    Json(request): Json<LoginRequest>,
) -> Result<impl IntoResponse, HttpAppError> {
    let invalid = || AppError::Unauthorized("Invalid username or password".to_string());

    let user = state
        .users
        .find_by_username(request.username.trim())
        .await
        .ok_or_else(invalid)?;

    let verified = bcrypt::verify(&request.password, &user.password_hash)
        .map_err(|e| AppError::Internal(format!("Failed to verify password: {}", e)))?;
    if !verified {
        return Err(invalid().into());
    }

    let token = jwt::issue_token(&user, &state.jwt, state.config.jwt_expiry_hours)?;
    tracing::info!(user_id = %user.id, username = %user.username, "User logged in");

    Ok(Json(AuthResponse {
        token,
        user: UserResponse::from(user),
    }))
}
