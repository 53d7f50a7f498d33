use argon2::{
    Argon2,
    password_hash::{PasswordHasher, SaltString},
};
use password_hash::rand_core::OsRng;

use crate::application::error::AppError;
use crate::application::ports::user_repository::UserRepository;
use crate::domain::users::user::{Role, User};

pub struct Register<'a, R: UserRepository + ?Sized> {
    pub repo: &'a R,
}

#[derive(Debug, Clone)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    /// Raw role string from the request; validated here so a bad value is a
    /// 400 rather than a deserialization failure.
    pub role: String,
}

impl<'a, R: UserRepository + ?Sized> Register<'a, R> {
    pub async fn execute(&self, req: &RegisterRequest) -> Result<User, AppError> {
        let username = req.username.trim();
        if username.is_empty() {
            return Err(AppError::Validation("Username may not be blank.".into()));
        }
        let email = req.email.trim();
        if email.is_empty() || !email.contains('@') {
            return Err(AppError::Validation("Enter a valid email address.".into()));
        }
        if req.password.is_empty() {
            return Err(AppError::Validation("Password may not be blank.".into()));
        }
        let role = Role::parse(req.role.trim()).ok_or_else(|| {
            AppError::Validation(format!("\"{}\" is not a valid role.", req.role))
        })?;

        let salt = SaltString::generate(&mut OsRng);
        let hash = Argon2::default()
            .hash_password(req.password.as_bytes(), &salt)
            .map_err(|e| AppError::Internal(anyhow::anyhow!(e.to_string())))?
            .to_string();

        // A taken username/email is a validation failure on this endpoint,
        // not a conflict.
        match self.repo.create_user(username, email, &hash, role).await {
            Err(AppError::Conflict(msg)) => Err(AppError::Validation(msg)),
            other => other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::test_support::MemoryUserRepository;
    use argon2::password_hash::{PasswordHash, PasswordVerifier};

    fn request(username: &str, role: &str) -> RegisterRequest {
        RegisterRequest {
            username: username.into(),
            email: format!("{username}@example.com"),
            password: "s3cret-pass".into(),
            role: role.into(),
        }
    }

    #[tokio::test]
    async fn registers_and_hashes_the_password() {
        let repo = MemoryUserRepository::default();
        let uc = Register { repo: &repo };

        let user = uc.execute(&request("alice", "client")).await.unwrap();
        assert_eq!(user.username, "alice");
        assert_eq!(user.role, Role::Client);

        let stored = repo
            .find_by_username("alice")
            .await
            .unwrap()
            .expect("stored record");
        assert_ne!(stored.password_hash, "s3cret-pass");
        let parsed = PasswordHash::new(&stored.password_hash).unwrap();
        assert!(
            Argon2::default()
                .verify_password(b"s3cret-pass", &parsed)
                .is_ok()
        );
    }

    #[tokio::test]
    async fn duplicate_username_is_a_validation_error() {
        let repo = MemoryUserRepository::default();
        let uc = Register { repo: &repo };

        uc.execute(&request("alice", "client")).await.unwrap();
        let mut second = request("alice", "freelancer");
        second.email = "other@example.com".into();
        assert!(matches!(
            uc.execute(&second).await,
            Err(AppError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn distinct_usernames_both_succeed() {
        let repo = MemoryUserRepository::default();
        let uc = Register { repo: &repo };

        uc.execute(&request("alice", "client")).await.unwrap();
        uc.execute(&request("bob", "freelancer")).await.unwrap();
    }

    #[tokio::test]
    async fn unknown_role_is_rejected() {
        let repo = MemoryUserRepository::default();
        let uc = Register { repo: &repo };

        let err = uc.execute(&request("mallory", "admin")).await.unwrap_err();
        match err {
            AppError::Validation(msg) => assert_eq!(msg, "\"admin\" is not a valid role."),
            other => panic!("expected validation error, got {other:?}"),
        }
    }
}
