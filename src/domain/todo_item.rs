//! Todo item domain model

use super::common::StringUuid;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

/// Todo item entity, owned through its list
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TodoItem {
    pub id: StringUuid,
    pub todo_list_id: StringUuid,
    pub title: String,
    pub body: String,
    pub is_done: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Default for TodoItem {
    fn default() -> Self {
        Self {
            id: StringUuid::new_v4(),
            todo_list_id: StringUuid::nil(),
            title: String::new(),
            body: String::new(),
            is_done: false,
            created_at: Utc::now(),
            updated_at: None,
        }
    }
}

/// Input for creating a todo item
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateTodoItemInput {
    pub todo_list_id: StringUuid,
    #[validate(length(
        min = 5,
        max = 50,
        message = "Title must be between 5 and 50 characters"
    ))]
    pub title: String,
    #[validate(length(
        min = 5,
        max = 100,
        message = "Body must be between 5 and 100 characters"
    ))]
    pub body: String,
}

/// Input for updating a todo item
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTodoItemInput {
    #[validate(length(
        min = 5,
        max = 50,
        message = "Title must be between 5 and 50 characters"
    ))]
    pub title: String,
    #[validate(length(
        min = 5,
        max = 100,
        message = "Body must be between 5 and 100 characters"
    ))]
    pub body: String,
    #[serde(default)]
    pub is_done: bool,
}

/// Todo item as returned by the API
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TodoItemResponse {
    pub id: StringUuid,
    pub todo_list_id: StringUuid,
    pub title: String,
    pub body: String,
    pub is_done: bool,
}

impl From<TodoItem> for TodoItemResponse {
    fn from(item: TodoItem) -> Self {
        Self {
            id: item.id,
            todo_list_id: item.todo_list_id,
            title: item.title,
            body: item.body,
            is_done: item.is_done,
        }
    }
}
