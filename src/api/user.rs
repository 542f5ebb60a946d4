//! User API handlers: registration, authentication, password change

use crate::api::{ApiResult, BaseResponse};
use crate::domain::{AuthenticateUserInput, ChangePasswordInput, RegisterUserInput};
use crate::error::Result;
use crate::middleware::AuthUser;
use crate::state::HasServices;
use axum::{extract::State, response::IntoResponse, Json};

/// Register a new user
#[utoipa::path(
    post,
    path = "/api/users",
    tag = "Users",
    request_body = RegisterUserInput,
    responses(
        (status = 201, description = "Registered"),
        (status = 400, description = "Invalid input or username/email already taken")
    )
)]
pub async fn register<S: HasServices>(
    State(state): State<S>,
    Json(input): Json<RegisterUserInput>,
) -> Result<impl IntoResponse> {
    let user = state.user_service().register(input).await?;
    Ok(ApiResult::created(BaseResponse::new(user.id)))
}

/// Exchange credentials for a bearer token
#[utoipa::path(
    post,
    path = "/api/users/authenticate",
    tag = "Users",
    request_body = AuthenticateUserInput,
    responses(
        (status = 200, description = "Authenticated", body = crate::domain::AuthenticateUserResponse),
        (status = 400, description = "Username or password is incorrect")
    )
)]
pub async fn authenticate<S: HasServices>(
    State(state): State<S>,
    Json(input): Json<AuthenticateUserInput>,
) -> Result<impl IntoResponse> {
    let response = state.user_service().authenticate(input).await?;
    Ok(ApiResult::ok(response))
}

#[utoipa::path(
    put,
    path = "/api/users/changePassword",
    tag = "Users",
    security(("bearer_jwt" = [])),
    request_body = ChangePasswordInput,
    responses(
        (status = 200, description = "Password changed"),
        (status = 400, description = "Old password incorrect or new password invalid"),
        (status = 401, description = "Missing or invalid token")
    )
)]
pub async fn change_password<S: HasServices>(
    State(state): State<S>,
    auth: AuthUser,
    Json(input): Json<ChangePasswordInput>,
) -> Result<impl IntoResponse> {
    state
        .user_service()
        .change_password(auth.user_id, input)
        .await?;
    Ok(ApiResult::ok(BaseResponse::new(auth.user_id)))
}
