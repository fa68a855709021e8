use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};
use dossier_core::AppError;
use std::sync::Arc;

use crate::auth::jwt;
use crate::auth::models::AuthContext;
use crate::error::HttpAppError;
use crate::state::AppState;

/// Middleware authenticating requests with a Bearer access token.
pub async fn auth_middleware(
    State(state): State<Arc<AppState>>,
    mut request: Request,
    next: Next,
) -> Response {
    let auth_header = match request
        .headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
    {
        Some(h) => h,
        None => {
            return HttpAppError(AppError::Unauthorized(
                "Missing authorization header".to_string(),
            ))
            .into_response();
        }
    };

    let Some(token) = auth_header.strip_prefix("Bearer ") else {
        return HttpAppError(AppError::Unauthorized(
            "Invalid authorization header format".to_string(),
        ))
        .into_response();
    };

    let claims = match jwt::verify_token(token, &state.jwt) {
        Ok(claims) => claims,
        Err(e) => return HttpAppError(e).into_response(),
    };

    let context = AuthContext {
        user_id: claims.sub,
        username: claims.username,
        role: claims.role,
    };

    tracing::debug!(user_id = %context.user_id, "Request authenticated");
    request.extensions_mut().insert(context);

    next.run(request).await
}
