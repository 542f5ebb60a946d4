//! User domain model

use super::common::StringUuid;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

/// User entity
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: StringUuid,
    pub username: String,
    pub email: String,
    /// Argon2 PHC string
    #[serde(skip_serializing, default)]
    #[schema(ignore)]
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Default for User {
    fn default() -> Self {
        let now = Utc::now();
        Self {
            id: StringUuid::new_v4(),
            username: String::new(),
            email: String::new(),
            password_hash: String::new(),
            created_at: now,
            updated_at: now,
        }
    }
}

/// Input for registering a new user
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterUserInput {
    #[validate(length(
        min = 3,
        max = 50,
        message = "Username must be between 3 and 50 characters"
    ))]
    pub username: String,
    #[validate(email(message = "Email is not valid"))]
    pub email: String,
    #[validate(length(
        min = 6,
        max = 128,
        message = "Password must be between 6 and 128 characters"
    ))]
    pub password: String,
}

/// Credentials for obtaining a token
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AuthenticateUserInput {
    #[validate(length(min = 1, message = "Username is required"))]
    pub username: String,
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Input for changing the current user's password
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordInput {
    #[validate(length(min = 1, message = "Old password is required"))]
    pub old_password: String,
    #[validate(length(
        min = 6,
        max = 128,
        message = "Password must be between 6 and 128 characters"
    ))]
    pub new_password: String,
}

/// Result of a successful authentication
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AuthenticateUserResponse {
    pub id: StringUuid,
    pub username: String,
    pub email: String,
    pub token: String,
}
