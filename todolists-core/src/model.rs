//! List and todo entities
//!
//! Names are validated at construction (see [`crate::validation`]);
//! ids are assigned by storage and never change afterwards.

use std::fmt;

use serde::Serialize;

/// Storage-assigned list identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct ListId(pub i64);

/// Storage-assigned todo identifier, unique within its list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct TodoId(pub i64);

impl fmt::Display for ListId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for TodoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

macro_rules! validated_name {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Only validation hands these out.
            pub(crate) fn from_validated(s: String) -> Self {
                Self(s)
            }

            /// Get the name as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consume and return the inner string.
            pub fn into_string(self) -> String {
                self.0
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

validated_name!(
    /// Validated list name (1-100 characters)
    ListName
);

validated_name!(
    /// Validated todo name (1-100 characters)
    TodoName
);

/// A single todo item
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Todo {
    pub id: TodoId,
    pub name: String,
    pub completed: bool,
}

impl Todo {
    pub fn new(id: TodoId, name: impl Into<String>, completed: bool) -> Self {
        Self {
            id,
            name: name.into(),
            completed,
        }
    }
}

/// A named list owning its todos in insertion order
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TodoList {
    pub id: ListId,
    pub name: String,
    pub todos: Vec<Todo>,
}

impl TodoList {
    pub fn new(id: ListId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            todos: Vec::new(),
        }
    }

    pub fn todo_count(&self) -> usize {
        self.todos.len()
    }

    /// Number of todos not yet completed.
    pub fn remaining_count(&self) -> usize {
        self.todos.iter().filter(|todo| !todo.completed).count()
    }

    /// A list is complete once it has at least one todo and none remain.
    pub fn is_complete(&self) -> bool {
        self.todo_count() > 0 && self.remaining_count() == 0
    }

    pub fn todo_mut(&mut self, id: TodoId) -> Option<&mut Todo> {
        self.todos.iter_mut().find(|todo| todo.id == id)
    }

    /// Mark every todo completed. Applying it twice changes nothing.
    pub fn complete_all(&mut self) {
        for todo in &mut self.todos {
            todo.completed = true;
        }
    }
}

/// Anything with a binary done/not-done state, used for display ordering.
pub trait Completion {
    fn is_complete(&self) -> bool;
}

impl Completion for Todo {
    fn is_complete(&self) -> bool {
        self.completed
    }
}

impl Completion for TodoList {
    fn is_complete(&self) -> bool {
        TodoList::is_complete(self)
    }
}

impl<T: Completion + ?Sized> Completion for &T {
    fn is_complete(&self) -> bool {
        (**self).is_complete()
    }
}

/// Interpret a submitted status value. Only `"true"` means completed.
pub fn parse_completed_flag(value: &str) -> bool {
    value == "true"
}

#[cfg(test)]
mod tests {
    use super::*;

    fn list_with(statuses: &[bool]) -> TodoList {
        let mut list = TodoList::new(ListId(1), "Groceries");
        for (i, &completed) in statuses.iter().enumerate() {
            list.todos
                .push(Todo::new(TodoId(i as i64 + 1), format!("todo {i}"), completed));
        }
        list
    }

    #[test]
    fn empty_list_is_not_complete() {
        let list = list_with(&[]);
        assert_eq!(list.todo_count(), 0);
        assert_eq!(list.remaining_count(), 0);
        assert!(!list.is_complete());
    }

    #[test]
    fn complete_only_when_all_done() {
        let mut list = list_with(&[true, false]);
        assert_eq!(list.remaining_count(), 1);
        assert!(!list.is_complete());

        list.todo_mut(TodoId(2)).unwrap().completed = true;
        assert!(list.is_complete());

        // Reverting any todo makes the list incomplete again
        list.todo_mut(TodoId(1)).unwrap().completed = false;
        assert!(!list.is_complete());
    }

    #[test]
    fn complete_all_is_idempotent() {
        let mut list = list_with(&[false, true, false]);
        list.complete_all();
        let once = list.clone();
        list.complete_all();
        assert_eq!(list, once);
        assert!(list.is_complete());
    }

    #[test]
    fn completion_trait_matches_inherent() {
        let list = list_with(&[true]);
        assert!(Completion::is_complete(&list));
        assert!(Completion::is_complete(&list.todos[0]));
    }

    #[test]
    fn completed_flag_parsing() {
        assert!(parse_completed_flag("true"));
        assert!(!parse_completed_flag("false"));
        assert!(!parse_completed_flag("TRUE"));
        assert!(!parse_completed_flag(""));
    }

    #[test]
    fn serializes_ids_transparently() {
        let todo = Todo::new(TodoId(7), "Milk", false);
        let json = serde_json::to_value(&todo).unwrap();
        assert_eq!(json["id"], 7);
        assert_eq!(json["name"], "Milk");
        assert_eq!(json["completed"], false);
    }
}
