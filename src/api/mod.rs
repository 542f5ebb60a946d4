//! REST API shared utilities (response envelope)

pub mod health;
pub mod todo_item;
pub mod todo_list;
pub mod user;

use crate::domain::StringUuid;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Uniform wrapper around every API response.
///
/// Exactly one of `result` and `errors` is populated, and `succeeded`
/// agrees with the class of `status_code`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ApiResult<T> {
    pub succeeded: bool,
    pub status_code: u16,
    pub result: Option<T>,
    pub errors: Option<Vec<String>>,
}

impl<T> ApiResult<T> {
    /// 200 OK with a payload
    pub fn ok(result: T) -> Self {
        Self::success(StatusCode::OK, result)
    }

    /// 201 Created with a payload
    pub fn created(result: T) -> Self {
        Self::success(StatusCode::CREATED, result)
    }

    pub fn success(status: StatusCode, result: T) -> Self {
        Self {
            succeeded: true,
            status_code: status.as_u16(),
            result: Some(result),
            errors: None,
        }
    }

    pub fn failure(status: StatusCode, errors: Vec<String>) -> Self {
        Self {
            succeeded: false,
            status_code: status.as_u16(),
            result: None,
            errors: Some(errors),
        }
    }
}

impl<T: Serialize> IntoResponse for ApiResult<T> {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.status_code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(self)).into_response()
    }
}

/// Identifier-only payload (delete, register, password change)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BaseResponse {
    pub id: StringUuid,
}

impl BaseResponse {
    pub fn new(id: StringUuid) -> Self {
        Self { id }
    }
}
