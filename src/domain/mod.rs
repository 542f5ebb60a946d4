//! Domain models for the todo service

pub mod common;
pub mod todo_item;
pub mod todo_list;
pub mod user;

pub use common::*;
pub use todo_item::*;
pub use todo_list::*;
pub use user::*;
