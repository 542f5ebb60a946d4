//! Application state traits for dependency injection
//!
//! Handlers are generic over [`HasServices`] so the same router can be
//! driven by the production `AppState` or by a test implementation.

use crate::config::Config;
use crate::jwt::JwtManager;
use crate::repository::{TodoItemRepository, TodoListRepository, UserRepository};
use crate::service::{TodoItemService, TodoListService, UserService};

/// Trait for application state that provides access to all services.
pub trait HasServices: Clone + Send + Sync + 'static {
    /// The todo list repository type
    type TodoListRepo: TodoListRepository;
    /// The todo item repository type
    type TodoItemRepo: TodoItemRepository;
    /// The user repository type
    type UserRepo: UserRepository;

    /// Get the application configuration
    fn config(&self) -> &Config;

    /// Get the todo list service
    fn todo_list_service(&self) -> &TodoListService<Self::TodoListRepo>;

    /// Get the todo item service
    fn todo_item_service(&self) -> &TodoItemService<Self::TodoItemRepo, Self::TodoListRepo>;

    /// Get the user service
    fn user_service(&self) -> &UserService<Self::UserRepo>;

    /// Get the JWT manager used to verify bearer tokens
    fn jwt_manager(&self) -> &JwtManager;

    /// Check whether backing stores are reachable
    fn check_ready(&self) -> impl std::future::Future<Output = bool> + Send;
}
