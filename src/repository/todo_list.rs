//! Todo list repository

use crate::domain::{CreateTodoListInput, StringUuid, TodoList};
use crate::error::{AppError, Result};
use async_trait::async_trait;
use chrono::Utc;
use sqlx::SqlitePool;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TodoListRepository: Send + Sync {
    async fn create(
        &self,
        created_by: StringUuid,
        input: &CreateTodoListInput,
    ) -> Result<TodoList>;
    async fn find_by_id(&self, id: StringUuid) -> Result<Option<TodoList>>;
    async fn list_by_creator(&self, created_by: StringUuid) -> Result<Vec<TodoList>>;
    async fn update_title(
        &self,
        id: StringUuid,
        title: &str,
        updated_by: StringUuid,
    ) -> Result<TodoList>;
    async fn delete(&self, id: StringUuid) -> Result<()>;
}

pub struct TodoListRepositoryImpl {
    pool: SqlitePool,
}

impl TodoListRepositoryImpl {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TodoListRepository for TodoListRepositoryImpl {
    async fn create(
        &self,
        created_by: StringUuid,
        input: &CreateTodoListInput,
    ) -> Result<TodoList> {
        let id = StringUuid::new_v4();

        sqlx::query(
            r#"
            INSERT INTO todo_lists (id, title, created_by, created_at)
            VALUES (?, ?, ?, ?)
            "#,
        )
        .bind(id)
        .bind(&input.title)
        .bind(created_by)
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;

        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::Internal(anyhow::anyhow!("Failed to create todo list")))
    }

    async fn find_by_id(&self, id: StringUuid) -> Result<Option<TodoList>> {
        let list = sqlx::query_as::<_, TodoList>(
            r#"
            SELECT id, title, created_by, created_at, updated_by, updated_at
            FROM todo_lists
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(list)
    }

    async fn list_by_creator(&self, created_by: StringUuid) -> Result<Vec<TodoList>> {
        let lists = sqlx::query_as::<_, TodoList>(
            r#"
            SELECT id, title, created_by, created_at, updated_by, updated_at
            FROM todo_lists
            WHERE created_by = ?
            ORDER BY created_at ASC
            "#,
        )
        .bind(created_by)
        .fetch_all(&self.pool)
        .await?;

        Ok(lists)
    }

    async fn update_title(
        &self,
        id: StringUuid,
        title: &str,
        updated_by: StringUuid,
    ) -> Result<TodoList> {
        let result = sqlx::query(
            r#"
            UPDATE todo_lists
            SET title = ?, updated_by = ?, updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(title)
        .bind(updated_by)
        .bind(Utc::now())
        .bind(id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Todo list {} not found", id)));
        }

        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::Internal(anyhow::anyhow!("Failed to update todo list")))
    }

    async fn delete(&self, id: StringUuid) -> Result<()> {
        let result = sqlx::query("DELETE FROM todo_lists WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Todo list {} not found", id)));
        }

        Ok(())
    }
}
