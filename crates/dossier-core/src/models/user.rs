use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Admin,
    User,
}

/// Where an account came from (sign-up channel).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum UserOrigin {
    Import,
    Marketing,
}

impl Default for UserOrigin {
    fn default() -> Self {
        UserOrigin::Import
    }
}

/// A registered account. `password_hash` is bcrypt and must never leave the
/// service; API responses use a sanitized projection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub role: UserRole,
    pub origin: UserOrigin,
    pub created_at: DateTime<Utc>,
}

impl User {
    pub fn new(
        username: impl Into<String>,
        name: impl Into<String>,
        email: impl Into<String>,
        password_hash: impl Into<String>,
        role: UserRole,
        origin: UserOrigin,
    ) -> Self {
        User {
            id: Uuid::new_v4(),
            username: username.into(),
            name: name.into(),
            email: email.into(),
            password_hash: password_hash.into(),
            role,
            origin,
            created_at: Utc::now(),
        }
    }

    pub fn is_admin(&self) -> bool {
        self.role == UserRole::Admin
    }
}
