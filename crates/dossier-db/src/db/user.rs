use std::sync::Arc;

use dossier_core::models::User;
use dossier_core::AppError;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::store::JsonStore;

const COLLECTION: &str = "users";

#[derive(Clone)]
pub struct UserRepository {
    store: JsonStore,
    users: Arc<RwLock<Vec<User>>>,
}

impl UserRepository {
    pub async fn load(store: JsonStore) -> Self {
        let users = match store.load::<User>(COLLECTION).await {
            Ok(users) => users,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to load user collection, starting empty");
                Vec::new()
            }
        };
        UserRepository {
            store,
            users: Arc::new(RwLock::new(users)),
        }
    }

    async fn persist(&self, users: &[User]) {
        if let Err(e) = self.store.save(COLLECTION, users).await {
            tracing::warn!(error = %e, "Failed to persist user collection");
        }
    }

    /// Insert a new account, rejecting duplicate usernames and emails.
    pub async fn create(&self, user: User) -> Result<User, AppError> {
        let mut users = self.users.write().await;
        if users.iter().any(|u| u.username == user.username) {
            return Err(AppError::Conflict("Username already exists".to_string()));
        }
        if users.iter().any(|u| u.email == user.email) {
            return Err(AppError::Conflict("Email already registered".to_string()));
        }
        users.push(user.clone());
        self.persist(&users).await;
        tracing::info!(user_id = %user.id, username = %user.username, "User created");
        Ok(user)
    }

    pub async fn find_by_username(&self, username: &str) -> Option<User> {
        self.users
            .read()
            .await
            .iter()
            .find(|u| u.username == username)
            .cloned()
    }

    pub async fn get(&self, id: Uuid) -> Result<User, AppError> {
        self.users
            .read()
            .await
            .iter()
            .find(|u| u.id == id)
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("User not found: {}", id)))
    }

    pub async fn list(&self) -> Vec<User> {
        self.users.read().await.clone()
    }

    pub async fn is_empty(&self) -> bool {
        self.users.read().await.is_empty()
    }

    pub async fn remove(&self, id: Uuid) -> Result<User, AppError> {
        let mut users = self.users.write().await;
        let position = users
            .iter()
            .position(|u| u.id == id)
            .ok_or_else(|| AppError::NotFound(format!("User not found: {}", id)))?;
        let removed = users.remove(position);
        self.persist(&users).await;
        tracing::info!(user_id = %id, "User removed");
        Ok(removed)
    }
}
