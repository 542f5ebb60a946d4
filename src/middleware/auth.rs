//! JWT authentication extractor
//!
//! `AuthUser` validates the bearer token on every protected route and
//! exposes the caller's identity to handlers.

use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts, StatusCode},
    response::{IntoResponse, Response},
};
use jsonwebtoken::errors::ErrorKind;
use serde::{Deserialize, Serialize};

use crate::api::ApiResult;
use crate::domain::StringUuid;
use crate::error::AppError;
use crate::jwt::IdentityClaims;
use crate::state::HasServices;

/// Authenticated user information extracted from JWT token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthUser {
    /// User ID from the token's `sub` claim
    pub user_id: StringUuid,
    pub email: String,
    pub username: String,
}

impl AuthUser {
    /// Create AuthUser from identity token claims
    pub fn from_identity_claims(claims: IdentityClaims) -> Result<Self, AuthError> {
        let user_id = StringUuid::parse_str(&claims.sub)
            .map_err(|_| AuthError::InvalidToken("Invalid user ID in token".to_string()))?;

        Ok(Self {
            user_id,
            email: claims.email,
            username: claims.name,
        })
    }
}

/// Authentication errors
#[derive(Debug, Clone)]
pub enum AuthError {
    /// No Authorization header present
    MissingToken,
    /// Invalid Authorization header format
    InvalidHeader(String),
    /// Token validation failed
    InvalidToken(String),
    /// Token has expired
    TokenExpired,
}

impl From<AppError> for AuthError {
    fn from(err: AppError) -> Self {
        match err {
            AppError::Jwt(e) if matches!(e.kind(), ErrorKind::ExpiredSignature) => {
                AuthError::TokenExpired
            }
            other => AuthError::InvalidToken(other.to_string()),
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let message = match &self {
            AuthError::MissingToken => "Missing authorization token",
            AuthError::InvalidHeader(_) => "Invalid authorization header",
            AuthError::InvalidToken(_) => "Invalid token",
            AuthError::TokenExpired => "Token has expired",
        };
        tracing::debug!(reason = ?self, "Rejected request authentication");

        ApiResult::<()>::failure(StatusCode::UNAUTHORIZED, vec![message.to_string()])
            .into_response()
    }
}

/// Extract and validate Bearer token from Authorization header
fn extract_bearer_token(headers: &axum::http::HeaderMap) -> Result<&str, AuthError> {
    let auth_header = headers
        .get(AUTHORIZATION)
        .ok_or(AuthError::MissingToken)?
        .to_str()
        .map_err(|_| AuthError::InvalidHeader("Invalid header encoding".to_string()))?;

    match auth_header.strip_prefix("Bearer ") {
        Some(token) if !token.trim().is_empty() => Ok(token.trim()),
        Some(_) => Err(AuthError::MissingToken),
        None => Err(AuthError::InvalidHeader(
            "Authorization header must use Bearer scheme".to_string(),
        )),
    }
}

impl<S> FromRequestParts<S> for AuthUser
where
    S: HasServices + Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let token = extract_bearer_token(&parts.headers)?;
        let claims = state.jwt_manager().verify_identity_token(token)?;
        AuthUser::from_identity_claims(claims)
    }
}
