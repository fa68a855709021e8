use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use dossier_core::models::UserRole;
use dossier_core::AppError;
use uuid::Uuid;

use crate::error::HttpAppError;

/// Authenticated caller identity, inserted by the auth middleware and
/// extracted by handlers.
#[derive(Debug, Clone)]
pub struct AuthContext {
    pub user_id: Uuid,
    pub username: String,
    pub role: UserRole,
}

impl AuthContext {
    pub fn require_admin(&self) -> Result<(), AppError> {
        if self.role == UserRole::Admin {
            Ok(())
        } else {
            Err(AppError::Forbidden(
                "Administrator role required".to_string(),
            ))
        }
    }
}

impl<S> FromRequestParts<S> for AuthContext
where
    S: Send + Sync,
{
    type Rejection = HttpAppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts.extensions.get::<AuthContext>().cloned().ok_or_else(|| {
            HttpAppError(AppError::Unauthorized(
                "Missing authentication context".to_string(),
            ))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_admin() {
        let admin = AuthContext {
            user_id: Uuid::new_v4(),
            username: "root".to_string(),
            role: UserRole::Admin,
        };
        assert!(admin.require_admin().is_ok());

        let user = AuthContext {
            role: UserRole::User,
            ..admin
        };
        assert!(matches!(
            user.require_admin().unwrap_err(),
            AppError::Forbidden(_)
        ));
    }
}
