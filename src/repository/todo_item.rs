//! Todo item repository

use crate::domain::{CreateTodoItemInput, StringUuid, TodoItem, UpdateTodoItemInput};
use crate::error::{AppError, Result};
use async_trait::async_trait;
use chrono::Utc;
use sqlx::SqlitePool;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TodoItemRepository: Send + Sync {
    async fn create(&self, input: &CreateTodoItemInput) -> Result<TodoItem>;
    async fn find_by_id(&self, id: StringUuid) -> Result<Option<TodoItem>>;
    async fn list_by_list(&self, todo_list_id: StringUuid) -> Result<Vec<TodoItem>>;
    async fn update(&self, id: StringUuid, input: &UpdateTodoItemInput) -> Result<TodoItem>;
    async fn delete(&self, id: StringUuid) -> Result<()>;
}

pub struct TodoItemRepositoryImpl {
    pool: SqlitePool,
}

impl TodoItemRepositoryImpl {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TodoItemRepository for TodoItemRepositoryImpl {
    async fn create(&self, input: &CreateTodoItemInput) -> Result<TodoItem> {
        let id = StringUuid::new_v4();

        sqlx::query(
            r#"
            INSERT INTO todo_items (id, todo_list_id, title, body, is_done, created_at)
            VALUES (?, ?, ?, ?, 0, ?)
            "#,
        )
        .bind(id)
        .bind(input.todo_list_id)
        .bind(&input.title)
        .bind(&input.body)
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;

        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::Internal(anyhow::anyhow!("Failed to create todo item")))
    }

    async fn find_by_id(&self, id: StringUuid) -> Result<Option<TodoItem>> {
        let item = sqlx::query_as::<_, TodoItem>(
            r#"
            SELECT id, todo_list_id, title, body, is_done, created_at, updated_at
            FROM todo_items
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(item)
    }

    async fn list_by_list(&self, todo_list_id: StringUuid) -> Result<Vec<TodoItem>> {
        let items = sqlx::query_as::<_, TodoItem>(
            r#"
            SELECT id, todo_list_id, title, body, is_done, created_at, updated_at
            FROM todo_items
            WHERE todo_list_id = ?
            ORDER BY created_at ASC
            "#,
        )
        .bind(todo_list_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(items)
    }

    async fn update(&self, id: StringUuid, input: &UpdateTodoItemInput) -> Result<TodoItem> {
        let result = sqlx::query(
            r#"
            UPDATE todo_items
            SET title = ?, body = ?, is_done = ?, updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(&input.title)
        .bind(&input.body)
        .bind(input.is_done)
        .bind(Utc::now())
        .bind(id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Todo item {} not found", id)));
        }

        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::Internal(anyhow::anyhow!("Failed to update todo item")))
    }

    async fn delete(&self, id: StringUuid) -> Result<()> {
        let result = sqlx::query("DELETE FROM todo_items WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Todo item {} not found", id)));
        }

        Ok(())
    }
}
