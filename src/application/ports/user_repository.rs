use async_trait::async_trait;
use uuid::Uuid;

use crate::application::error::AppError;
use crate::domain::users::user::{Role, User};

/// A stored account together with its credential hash. Only the login flow
/// ever sees the hash; everything else works with [`User`].
#[derive(Debug, Clone)]
pub struct UserRecord {
    pub user: User,
    pub password_hash: String,
}

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Fails with `AppError::Conflict` when the username or email is taken.
    async fn create_user(
        &self,
        username: &str,
        email: &str,
        password_hash: &str,
        role: Role,
    ) -> Result<User, AppError>;
    async fn find_by_username(&self, username: &str) -> Result<Option<UserRecord>, AppError>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, AppError>;
}
