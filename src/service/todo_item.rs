//! Todo item business logic
//!
//! Items have no owner of their own; every operation resolves the parent
//! list and applies the list's ownership rule.

use crate::domain::{CreateTodoItemInput, StringUuid, TodoItem, TodoList, UpdateTodoItemInput};
use crate::error::{AppError, Result};
use crate::repository::{TodoItemRepository, TodoListRepository};
use crate::service::todo_list::NOT_OWNER_MESSAGE;
use std::sync::Arc;
use tracing::info;
use validator::Validate;

pub struct TodoItemService<R: TodoItemRepository, L: TodoListRepository> {
    repo: Arc<R>,
    list_repo: Arc<L>,
}

impl<R: TodoItemRepository, L: TodoListRepository> TodoItemService<R, L> {
    pub fn new(repo: Arc<R>, list_repo: Arc<L>) -> Self {
        Self { repo, list_repo }
    }

    pub async fn create(
        &self,
        input: CreateTodoItemInput,
        current_user_id: StringUuid,
    ) -> Result<TodoItem> {
        input.validate()?;
        self.owned_list(input.todo_list_id, current_user_id).await?;

        let item = self.repo.create(&input).await?;
        info!(
            todo_item_id = %item.id,
            todo_list_id = %item.todo_list_id,
            user_id = %current_user_id,
            "Todo item created"
        );
        Ok(item)
    }

    pub async fn update(
        &self,
        id: StringUuid,
        input: UpdateTodoItemInput,
        current_user_id: StringUuid,
    ) -> Result<TodoItem> {
        input.validate()?;
        let existing = self.get(id).await?;
        self.owned_list(existing.todo_list_id, current_user_id)
            .await?;

        let item = self.repo.update(id, &input).await?;
        info!(todo_item_id = %id, user_id = %current_user_id, "Todo item updated");
        Ok(item)
    }

    pub async fn delete(&self, id: StringUuid, current_user_id: StringUuid) -> Result<TodoItem> {
        let existing = self.get(id).await?;
        self.owned_list(existing.todo_list_id, current_user_id)
            .await?;

        self.repo.delete(id).await?;
        info!(todo_item_id = %id, user_id = %current_user_id, "Todo item deleted");
        Ok(existing)
    }

    pub async fn list_by_list(
        &self,
        todo_list_id: StringUuid,
        current_user_id: StringUuid,
    ) -> Result<Vec<TodoItem>> {
        self.owned_list(todo_list_id, current_user_id).await?;
        self.repo.list_by_list(todo_list_id).await
    }

    async fn get(&self, id: StringUuid) -> Result<TodoItem> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Todo item {} not found", id)))
    }

    async fn owned_list(
        &self,
        todo_list_id: StringUuid,
        current_user_id: StringUuid,
    ) -> Result<TodoList> {
        let list = self
            .list_repo
            .find_by_id(todo_list_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Todo list {} not found", todo_list_id)))?;
        if !list.is_owned_by(current_user_id) {
            return Err(AppError::BadRequest(NOT_OWNER_MESSAGE.to_string()));
        }
        Ok(list)
    }
}
