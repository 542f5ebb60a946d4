//! HTTP middleware for the todo API
//!
//! - JWT `AuthUser` extractor
//! - Error response normalization into the `ApiResult` envelope

pub mod auth;
pub mod error_response;

pub use auth::AuthUser;
pub use error_response::normalize_error_response;
