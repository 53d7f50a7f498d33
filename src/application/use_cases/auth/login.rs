use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordVerifier},
};

use crate::application::error::AppError;
use crate::application::ports::user_repository::UserRepository;
use crate::domain::users::user::User;

pub struct Login<'a, R: UserRepository + ?Sized> {
    pub repo: &'a R,
}

#[derive(Debug, Clone)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

impl<'a, R: UserRepository + ?Sized> Login<'a, R> {
    /// Unknown username and wrong password fail identically.
    pub async fn execute(&self, req: &LoginRequest) -> Result<User, AppError> {
        let record = self
            .repo
            .find_by_username(&req.username)
            .await?
            .ok_or_else(|| bad_credentials())?;
        let parsed = PasswordHash::new(&record.password_hash)
            .map_err(|e| AppError::Internal(anyhow::anyhow!(e.to_string())))?;
        if Argon2::default()
            .verify_password(req.password.as_bytes(), &parsed)
            .is_ok()
        {
            Ok(record.user)
        } else {
            Err(bad_credentials())
        }
    }
}

fn bad_credentials() -> AppError {
    AppError::Authentication("Invalid username or password.".into())
}
