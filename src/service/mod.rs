//! Business logic layer

pub mod todo_item;
pub mod todo_list;
pub mod user;

pub use todo_item::TodoItemService;
pub use todo_list::TodoListService;
pub use user::UserService;
