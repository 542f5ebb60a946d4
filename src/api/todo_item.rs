//! Todo item API handlers

use crate::api::{ApiResult, BaseResponse};
use crate::domain::{CreateTodoItemInput, StringUuid, TodoItemResponse, UpdateTodoItemInput};
use crate::error::Result;
use crate::middleware::AuthUser;
use crate::state::HasServices;
use axum::{
    extract::{Path, State},
    response::IntoResponse,
    Json,
};

/// Add an item to one of the caller's lists
#[utoipa::path(
    post,
    path = "/api/todoItems",
    tag = "Todo Items",
    security(("bearer_jwt" = [])),
    request_body = CreateTodoItemInput,
    responses(
        (status = 201, description = "Created"),
        (status = 400, description = "Invalid input or list not owned by caller"),
        (status = 404, description = "Todo list not found")
    )
)]
pub async fn create<S: HasServices>(
    State(state): State<S>,
    auth: AuthUser,
    Json(input): Json<CreateTodoItemInput>,
) -> Result<impl IntoResponse> {
    let item = state
        .todo_item_service()
        .create(input, auth.user_id)
        .await?;
    Ok(ApiResult::created(TodoItemResponse::from(item)))
}

#[utoipa::path(
    put,
    path = "/api/todoItems/{id}",
    tag = "Todo Items",
    security(("bearer_jwt" = [])),
    params(("id" = String, Path, description = "Todo item id")),
    request_body = UpdateTodoItemInput,
    responses(
        (status = 200, description = "Updated"),
        (status = 400, description = "Invalid input or list not owned by caller"),
        (status = 404, description = "Todo item not found")
    )
)]
pub async fn update<S: HasServices>(
    State(state): State<S>,
    auth: AuthUser,
    Path(id): Path<StringUuid>,
    Json(input): Json<UpdateTodoItemInput>,
) -> Result<impl IntoResponse> {
    let item = state
        .todo_item_service()
        .update(id, input, auth.user_id)
        .await?;
    Ok(ApiResult::ok(TodoItemResponse::from(item)))
}

#[utoipa::path(
    delete,
    path = "/api/todoItems/{id}",
    tag = "Todo Items",
    security(("bearer_jwt" = [])),
    params(("id" = String, Path, description = "Todo item id")),
    responses(
        (status = 200, description = "Deleted"),
        (status = 400, description = "List not owned by caller"),
        (status = 404, description = "Todo item not found")
    )
)]
pub async fn delete<S: HasServices>(
    State(state): State<S>,
    auth: AuthUser,
    Path(id): Path<StringUuid>,
) -> Result<impl IntoResponse> {
    let item = state.todo_item_service().delete(id, auth.user_id).await?;
    Ok(ApiResult::ok(BaseResponse::new(item.id)))
}
