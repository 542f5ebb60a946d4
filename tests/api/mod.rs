//! API handler test infrastructure
//!
//! In-memory repository implementations so the production router can be
//! exercised with `tower::ServiceExt::oneshot`, without a database.


use async_trait::async_trait;
use chrono::Utc;
use std::sync::atomic::{AtomicBool, Ordering};
use todo_core::config::JwtConfig;
use todo_core::domain::{
    CreateTodoItemInput, CreateTodoListInput, StringUuid, TodoItem, TodoList, UpdateTodoItemInput,
    User,
};
use todo_core::error::{AppError, Result};
use todo_core::jwt::JwtManager;
use todo_core::repository::{TodoItemRepository, TodoListRepository, UserRepository};
use tokio::sync::RwLock;

// ============================================================================
// Test Configuration
// ============================================================================

pub fn test_jwt_config() -> JwtConfig {
    JwtConfig {
        secret: "test-secret-key-for-api-testing-purposes".to_string(),
        issuer: "https://todo.test".to_string(),
        access_token_ttl_secs: 3600,
    }
}

pub fn create_test_jwt_manager() -> JwtManager {
    JwtManager::new(test_jwt_config())
}

/// Identity token for an arbitrary user id
pub fn create_test_identity_token_for_user(user_id: StringUuid) -> String {
    create_test_jwt_manager()
        .create_identity_token(*user_id, "test-user@test.com", "test-user")
        .expect("Failed to create test identity token")
}

// ============================================================================
// Test Repository Implementations
// ============================================================================

/// In-memory todo list repository.
///
/// `fail_reads` makes every lookup fail with an internal error, to check how
/// storage failures surface over HTTP.
#[derive(Default)]
pub struct TestTodoListRepository {
    lists: RwLock<Vec<TodoList>>,
    fail_reads: AtomicBool,
}

impl TestTodoListRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn add_list(&self, list: TodoList) {
        self.lists.write().await.push(list);
    }

    pub async fn get(&self, id: StringUuid) -> Option<TodoList> {
        self.lists.read().await.iter().find(|l| l.id == id).cloned()
    }

    pub async fn len(&self) -> usize {
        self.lists.read().await.len()
    }

    pub fn fail_reads(&self) {
        self.fail_reads.store(true, Ordering::SeqCst);
    }

    fn check_reads(&self) -> Result<()> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(AppError::Internal(anyhow::anyhow!(
                "simulated storage failure: disk on fire"
            )));
        }
        Ok(())
    }
}

#[async_trait]
impl TodoListRepository for TestTodoListRepository {
    async fn create(
        &self,
        created_by: StringUuid,
        input: &CreateTodoListInput,
    ) -> Result<TodoList> {
        let list = TodoList {
            id: StringUuid::new_v4(),
            title: input.title.clone(),
            created_by,
            created_at: Utc::now(),
            updated_by: None,
            updated_at: None,
        };
        self.lists.write().await.push(list.clone());
        Ok(list)
    }

    async fn find_by_id(&self, id: StringUuid) -> Result<Option<TodoList>> {
        self.check_reads()?;
        Ok(self.get(id).await)
    }

    async fn list_by_creator(&self, created_by: StringUuid) -> Result<Vec<TodoList>> {
        self.check_reads()?;
        Ok(self
            .lists
            .read()
            .await
            .iter()
            .filter(|l| l.created_by == created_by)
            .cloned()
            .collect())
    }

    async fn update_title(
        &self,
        id: StringUuid,
        title: &str,
        updated_by: StringUuid,
    ) -> Result<TodoList> {
        let mut lists = self.lists.write().await;
        let list = lists
            .iter_mut()
            .find(|l| l.id == id)
            .ok_or_else(|| AppError::NotFound(format!("Todo list {} not found", id)))?;
        list.title = title.to_string();
        list.updated_by = Some(updated_by);
        list.updated_at = Some(Utc::now());
        Ok(list.clone())
    }

    async fn delete(&self, id: StringUuid) -> Result<()> {
        let mut lists = self.lists.write().await;
        let before = lists.len();
        lists.retain(|l| l.id != id);
        if lists.len() == before {
            return Err(AppError::NotFound(format!("Todo list {} not found", id)));
        }
        Ok(())
    }
}

#[derive(Default)]
pub struct TestTodoItemRepository {
    items: RwLock<Vec<TodoItem>>,
}

impl TestTodoItemRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn add_item(&self, item: TodoItem) {
        self.items.write().await.push(item);
    }

    pub async fn len(&self) -> usize {
        self.items.read().await.len()
    }
}

#[async_trait]
impl TodoItemRepository for TestTodoItemRepository {
    async fn create(&self, input: &CreateTodoItemInput) -> Result<TodoItem> {
        let item = TodoItem {
            id: StringUuid::new_v4(),
            todo_list_id: input.todo_list_id,
            title: input.title.clone(),
            body: input.body.clone(),
            is_done: false,
            created_at: Utc::now(),
            updated_at: None,
        };
        self.items.write().await.push(item.clone());
        Ok(item)
    }

    async fn find_by_id(&self, id: StringUuid) -> Result<Option<TodoItem>> {
        Ok(self.items.read().await.iter().find(|i| i.id == id).cloned())
    }

    async fn list_by_list(&self, todo_list_id: StringUuid) -> Result<Vec<TodoItem>> {
        Ok(self
            .items
            .read()
            .await
            .iter()
            .filter(|i| i.todo_list_id == todo_list_id)
            .cloned()
            .collect())
    }

    async fn update(&self, id: StringUuid, input: &UpdateTodoItemInput) -> Result<TodoItem> {
        let mut items = self.items.write().await;
        let item = items
            .iter_mut()
            .find(|i| i.id == id)
            .ok_or_else(|| AppError::NotFound(format!("Todo item {} not found", id)))?;
        item.title = input.title.clone();
        item.body = input.body.clone();
        item.is_done = input.is_done;
        item.updated_at = Some(Utc::now());
        Ok(item.clone())
    }

    async fn delete(&self, id: StringUuid) -> Result<()> {
        let mut items = self.items.write().await;
        let before = items.len();
        items.retain(|i| i.id != id);
        if items.len() == before {
            return Err(AppError::NotFound(format!("Todo item {} not found", id)));
        }
        Ok(())
    }
}

#[derive(Default)]
pub struct TestUserRepository {
    users: RwLock<Vec<User>>,
}

impl TestUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn add_user(&self, user: User) {
        self.users.write().await.push(user);
    }
}

#[async_trait]
impl UserRepository for TestUserRepository {
    async fn create(&self, username: &str, email: &str, password_hash: &str) -> Result<User> {
        let mut users = self.users.write().await;
        if users
            .iter()
            .any(|u| u.username == username || u.email.eq_ignore_ascii_case(email))
        {
            return Err(AppError::Conflict(
                "Username or email is already registered".to_string(),
            ));
        }
        let user = User {
            username: username.to_string(),
            email: email.to_lowercase(),
            password_hash: password_hash.to_string(),
            ..Default::default()
        };
        users.push(user.clone());
        Ok(user)
    }

    async fn find_by_id(&self, id: StringUuid) -> Result<Option<User>> {
        Ok(self.users.read().await.iter().find(|u| u.id == id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        Ok(self
            .users
            .read()
            .await
            .iter()
            .find(|u| u.email.eq_ignore_ascii_case(email))
            .cloned())
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>> {
        Ok(self
            .users
            .read()
            .await
            .iter()
            .find(|u| u.username == username)
            .cloned())
    }

    async fn update_password_hash(&self, id: StringUuid, password_hash: &str) -> Result<()> {
        let mut users = self.users.write().await;
        let user = users
            .iter_mut()
            .find(|u| u.id == id)
            .ok_or_else(|| AppError::NotFound(format!("User {} not found", id)))?;
        user.password_hash = password_hash.to_string();
        Ok(())
    }
}
