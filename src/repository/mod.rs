//! Data access layer (Repository pattern)

pub mod todo_item;
pub mod todo_list;
pub mod user;

pub use todo_item::TodoItemRepository;
pub use todo_list::TodoListRepository;
pub use user::UserRepository;
