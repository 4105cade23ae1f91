//! todolists-core: the list/todo domain model
//!
//! Pure types and functions shared by every storage backend:
//! - [`validation`]: name length and uniqueness rules
//! - [`model`]: lists, todos and completion state
//! - [`ordering`]: incomplete-first display ordering

pub mod model;
pub mod ordering;
pub mod validation;

pub use model::{parse_completed_flag, Completion, ListId, ListName, Todo, TodoId, TodoList, TodoName};
pub use ordering::{sort_by_completion, sort_for_display};
pub use validation::{
    validate_list_name, validate_list_rename, validate_todo_name, NameField, ValidationError,
    MAX_NAME_LEN, MIN_NAME_LEN,
};
