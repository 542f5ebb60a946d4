//! Todo list API handlers

use crate::api::{ApiResult, BaseResponse};
use crate::domain::{
    CreateTodoListInput, StringUuid, TodoItemResponse, TodoListResponse, UpdateTodoListInput,
};
use crate::error::Result;
use crate::middleware::AuthUser;
use crate::state::HasServices;
use axum::{
    extract::{Path, State},
    response::IntoResponse,
    Json,
};

/// List the caller's todo lists
#[utoipa::path(
    get,
    path = "/api/todoLists",
    tag = "Todo Lists",
    security(("bearer_jwt" = [])),
    responses(
        (status = 200, description = "Lists created by the caller"),
        (status = 401, description = "Missing or invalid token")
    )
)]
pub async fn list<S: HasServices>(
    State(state): State<S>,
    auth: AuthUser,
) -> Result<impl IntoResponse> {
    let lists = state.todo_list_service().list(auth.user_id).await?;
    let lists: Vec<TodoListResponse> = lists.into_iter().map(Into::into).collect();
    Ok(ApiResult::ok(lists))
}

/// Create a todo list owned by the caller
#[utoipa::path(
    post,
    path = "/api/todoLists",
    tag = "Todo Lists",
    security(("bearer_jwt" = [])),
    request_body = CreateTodoListInput,
    responses(
        (status = 201, description = "Created"),
        (status = 400, description = "Invalid title"),
        (status = 401, description = "Missing or invalid token")
    )
)]
pub async fn create<S: HasServices>(
    State(state): State<S>,
    auth: AuthUser,
    Json(input): Json<CreateTodoListInput>,
) -> Result<impl IntoResponse> {
    let list = state
        .todo_list_service()
        .create(input, auth.user_id)
        .await?;
    Ok(ApiResult::created(TodoListResponse::from(list)))
}

/// Rename a todo list
#[utoipa::path(
    put,
    path = "/api/todoLists/{id}",
    tag = "Todo Lists",
    security(("bearer_jwt" = [])),
    params(("id" = String, Path, description = "Todo list id")),
    request_body = UpdateTodoListInput,
    responses(
        (status = 200, description = "Updated"),
        (status = 400, description = "Invalid title or list not owned by caller"),
        (status = 404, description = "Todo list not found")
    )
)]
pub async fn update<S: HasServices>(
    State(state): State<S>,
    auth: AuthUser,
    Path(id): Path<StringUuid>,
    Json(input): Json<UpdateTodoListInput>,
) -> Result<impl IntoResponse> {
    let list = state
        .todo_list_service()
        .update(id, input, auth.user_id)
        .await?;
    Ok(ApiResult::ok(TodoListResponse::from(list)))
}

/// Delete a todo list and its items
#[utoipa::path(
    delete,
    path = "/api/todoLists/{id}",
    tag = "Todo Lists",
    security(("bearer_jwt" = [])),
    params(("id" = String, Path, description = "Todo list id")),
    responses(
        (status = 200, description = "Deleted"),
        (status = 400, description = "List not owned by caller"),
        (status = 404, description = "Todo list not found")
    )
)]
pub async fn delete<S: HasServices>(
    State(state): State<S>,
    auth: AuthUser,
    Path(id): Path<StringUuid>,
) -> Result<impl IntoResponse> {
    let list = state.todo_list_service().delete(id, auth.user_id).await?;
    Ok(ApiResult::ok(BaseResponse::new(list.id)))
}

/// Items belonging to one of the caller's lists
#[utoipa::path(
    get,
    path = "/api/todoLists/{id}/todoItems",
    tag = "Todo Lists",
    security(("bearer_jwt" = [])),
    params(("id" = String, Path, description = "Todo list id")),
    responses(
        (status = 200, description = "Items of the list"),
        (status = 400, description = "List not owned by caller"),
        (status = 404, description = "Todo list not found")
    )
)]
pub async fn list_items<S: HasServices>(
    State(state): State<S>,
    auth: AuthUser,
    Path(id): Path<StringUuid>,
) -> Result<impl IntoResponse> {
    let items = state
        .todo_item_service()
        .list_by_list(id, auth.user_id)
        .await?;
    let items: Vec<TodoItemResponse> = items.into_iter().map(Into::into).collect();
    Ok(ApiResult::ok(items))
}
