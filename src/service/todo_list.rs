//! Todo list business logic

use crate::domain::{CreateTodoListInput, StringUuid, TodoList, UpdateTodoListInput};
use crate::error::{AppError, Result};
use crate::repository::TodoListRepository;
use std::sync::Arc;
use tracing::info;
use validator::Validate;

pub(crate) const NOT_OWNER_MESSAGE: &str = "The selected list does not belong to you";

pub struct TodoListService<R: TodoListRepository> {
    repo: Arc<R>,
}

impl<R: TodoListRepository> TodoListService<R> {
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn create(
        &self,
        input: CreateTodoListInput,
        current_user_id: StringUuid,
    ) -> Result<TodoList> {
        input.validate()?;

        let list = self.repo.create(current_user_id, &input).await?;
        info!(todo_list_id = %list.id, user_id = %current_user_id, "Todo list created");
        Ok(list)
    }

    pub async fn update(
        &self,
        id: StringUuid,
        input: UpdateTodoListInput,
        current_user_id: StringUuid,
    ) -> Result<TodoList> {
        input.validate()?;

        let existing = self.get(id).await?;
        if !existing.is_owned_by(current_user_id) {
            return Err(AppError::BadRequest(NOT_OWNER_MESSAGE.to_string()));
        }

        let list = self
            .repo
            .update_title(id, &input.title, current_user_id)
            .await?;
        info!(todo_list_id = %id, user_id = %current_user_id, "Todo list updated");
        Ok(list)
    }

    /// Delete a list, returning the removed record
    pub async fn delete(&self, id: StringUuid, current_user_id: StringUuid) -> Result<TodoList> {
        let existing = self.get(id).await?;
        if !existing.is_owned_by(current_user_id) {
            return Err(AppError::BadRequest(NOT_OWNER_MESSAGE.to_string()));
        }

        self.repo.delete(id).await?;
        info!(todo_list_id = %id, user_id = %current_user_id, "Todo list deleted");
        Ok(existing)
    }

    pub async fn list(&self, current_user_id: StringUuid) -> Result<Vec<TodoList>> {
        self.repo.list_by_creator(current_user_id).await
    }

    /// Load a list and check the caller owns it
    pub async fn get_owned(&self, id: StringUuid, current_user_id: StringUuid) -> Result<TodoList> {
        let list = self.get(id).await?;
        if !list.is_owned_by(current_user_id) {
            return Err(AppError::BadRequest(NOT_OWNER_MESSAGE.to_string()));
        }
        Ok(list)
    }

    async fn get(&self, id: StringUuid) -> Result<TodoList> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Todo list {} not found", id)))
    }
}
