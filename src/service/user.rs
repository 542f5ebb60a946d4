//! User registration, authentication and password management

use crate::domain::{
    AuthenticateUserInput, AuthenticateUserResponse, ChangePasswordInput, RegisterUserInput,
    StringUuid, User,
};
use crate::error::{AppError, Result};
use crate::jwt::JwtManager;
use crate::repository::UserRepository;
use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use std::sync::Arc;
use tracing::{info, warn};
use validator::Validate;

const INVALID_CREDENTIALS: &str = "Username or password is incorrect";

pub struct UserService<R: UserRepository> {
    repo: Arc<R>,
    jwt_manager: JwtManager,
}

impl<R: UserRepository> UserService<R> {
    pub fn new(repo: Arc<R>, jwt_manager: JwtManager) -> Self {
        Self { repo, jwt_manager }
    }

    pub async fn register(&self, input: RegisterUserInput) -> Result<User> {
        input.validate()?;

        if self.repo.find_by_username(&input.username).await?.is_some() {
            return Err(AppError::Conflict(format!(
                "Username '{}' is already taken",
                input.username
            )));
        }
        if self.repo.find_by_email(&input.email).await?.is_some() {
            return Err(AppError::Conflict(format!(
                "Email '{}' is already registered",
                input.email
            )));
        }

        let password_hash = hash_password(&input.password)?;
        let user = self
            .repo
            .create(&input.username, &input.email, &password_hash)
            .await?;
        info!(user_id = %user.id, username = %user.username, "User registered");
        Ok(user)
    }

    pub async fn authenticate(
        &self,
        input: AuthenticateUserInput,
    ) -> Result<AuthenticateUserResponse> {
        input.validate()?;

        let user = match self.repo.find_by_username(&input.username).await? {
            Some(user) => user,
            None => {
                warn!(username = %input.username, "Authentication failed: unknown user");
                return Err(AppError::BadRequest(INVALID_CREDENTIALS.to_string()));
            }
        };

        if !verify_password(&input.password, &user.password_hash) {
            warn!(user_id = %user.id, "Authentication failed: wrong password");
            return Err(AppError::BadRequest(INVALID_CREDENTIALS.to_string()));
        }

        let token = self
            .jwt_manager
            .create_identity_token(*user.id, &user.email, &user.username)?;
        info!(user_id = %user.id, "User authenticated");

        Ok(AuthenticateUserResponse {
            id: user.id,
            username: user.username,
            email: user.email,
            token,
        })
    }

    pub async fn change_password(
        &self,
        current_user_id: StringUuid,
        input: ChangePasswordInput,
    ) -> Result<()> {
        input.validate()?;

        let user = self
            .repo
            .find_by_id(current_user_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("User {} not found", current_user_id)))?;

        if !verify_password(&input.old_password, &user.password_hash) {
            return Err(AppError::BadRequest("Old password is incorrect".to_string()));
        }

        let password_hash = hash_password(&input.new_password)?;
        self.repo
            .update_password_hash(current_user_id, &password_hash)
            .await?;
        info!(user_id = %current_user_id, "Password changed");
        Ok(())
    }
}

/// Hash a password using Argon2
pub fn hash_password(password: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Failed to hash password: {}", e)))?;
    Ok(hash.to_string())
}

/// Verify a password against a stored PHC string. Malformed hashes never match.
pub fn verify_password(password: &str, hash: &str) -> bool {
    let parsed_hash = match PasswordHash::new(hash) {
        Ok(h) => h,
        Err(_) => return false,
    };

    Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok()
}
