//! Todo list domain model

use super::common::StringUuid;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

/// Todo list entity
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TodoList {
    pub id: StringUuid,
    pub title: String,
    /// Owning user, fixed at creation
    pub created_by: StringUuid,
    pub created_at: DateTime<Utc>,
    pub updated_by: Option<StringUuid>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl TodoList {
    /// Whether `user_id` is allowed to mutate this list
    pub fn is_owned_by(&self, user_id: StringUuid) -> bool {
        self.created_by == user_id
    }
}

impl Default for TodoList {
    fn default() -> Self {
        Self {
            id: StringUuid::new_v4(),
            title: String::new(),
            created_by: StringUuid::nil(),
            created_at: Utc::now(),
            updated_by: None,
            updated_at: None,
        }
    }
}

/// Input for creating a todo list
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateTodoListInput {
    #[validate(length(
        min = 5,
        max = 50,
        message = "Title must be between 5 and 50 characters"
    ))]
    pub title: String,
}

/// Input for updating a todo list
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTodoListInput {
    #[validate(length(
        min = 5,
        max = 50,
        message = "Title must be between 5 and 50 characters"
    ))]
    pub title: String,
}

/// Todo list as returned by the API
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TodoListResponse {
    pub id: StringUuid,
    pub title: String,
}

impl From<TodoList> for TodoListResponse {
    fn from(list: TodoList) -> Self {
        Self {
            id: list.id,
            title: list.title,
        }
    }
}
