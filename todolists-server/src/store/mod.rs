//! Storage strategy for lists and todos
//!
//! Two interchangeable backends implement [`TodoStore`]:
//! - [`PgStore`]: PostgreSQL, shared by every session
//! - [`MemoryStore`]: in-memory, one private instance per session
//!
//! Both address lists and todos by stable generated ids and report the
//! same errors for the same situations.

pub mod memory;
pub mod postgres;

use std::fmt;

use async_trait::async_trait;
use todolists_core::{ListId, ListName, TodoId, TodoList, TodoName};

pub use memory::MemoryStore;
pub use postgres::PgStore;

/// Kind of entity a lookup failed for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    List(ListId),
    Todo(ListId, TodoId),
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::List(id) => write!(f, "list {}", id),
            Self::Todo(list_id, todo_id) => write!(f, "todo {} in list {}", todo_id, list_id),
        }
    }
}

/// Storage error type
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("not found: {0}")]
    NotFound(Resource),

    #[error("a list named '{0}' already exists")]
    DuplicateName(String),

    #[error("corrupt row: {0}")]
    Corrupt(String),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// CRUD operations over lists and their todos.
///
/// Mutations on a missing list or todo report [`StoreError::NotFound`],
/// except [`TodoStore::delete_list`], which silently does nothing.
#[async_trait]
pub trait TodoStore: Send + Sync {
    /// Fetch a list with its todos.
    async fn find_list(&self, id: ListId) -> StoreResult<TodoList>;

    /// All lists with their todos, in creation order.
    async fn all_lists(&self) -> StoreResult<Vec<TodoList>>;

    /// Names of all lists, for uniqueness checks.
    async fn list_names(&self) -> StoreResult<Vec<String>>;

    async fn create_list(&self, name: ListName) -> StoreResult<ListId>;

    /// Remove a list and all of its todos.
    async fn delete_list(&self, id: ListId) -> StoreResult<()>;

    async fn rename_list(&self, id: ListId, name: ListName) -> StoreResult<()>;

    async fn create_todo(&self, list_id: ListId, name: TodoName) -> StoreResult<TodoId>;

    async fn delete_todo(&self, list_id: ListId, todo_id: TodoId) -> StoreResult<()>;

    async fn set_todo_status(
        &self,
        list_id: ListId,
        todo_id: TodoId,
        completed: bool,
    ) -> StoreResult<()>;

    /// Mark every todo in the list completed.
    async fn complete_all_todos(&self, list_id: ListId) -> StoreResult<()>;
}

/// Shared contract checks, run against each backend.
#[cfg(test)]
pub(crate) mod contract {
    use super::*;
    use todolists_core::{
        sort_by_completion, validate_list_name, validate_todo_name, Completion,
    };

    fn list_name(s: &str) -> ListName {
        validate_list_name(s, std::iter::empty::<&str>()).unwrap()
    }

    fn todo_name(s: &str) -> TodoName {
        validate_todo_name(s).unwrap()
    }

    pub async fn create_and_find(store: &dyn TodoStore) {
        let before = store.all_lists().await.unwrap().len();
        let id = store.create_list(list_name("Groceries")).await.unwrap();

        let list = store.find_list(id).await.unwrap();
        assert_eq!(list.name, "Groceries");
        assert!(list.todos.is_empty());
        assert!(!list.is_complete());
        assert_eq!(store.all_lists().await.unwrap().len(), before + 1);
    }

    pub async fn all_lists_in_creation_order(store: &dyn TodoStore) {
        let a = store.create_list(list_name("First")).await.unwrap();
        let b = store.create_list(list_name("Second")).await.unwrap();
        let c = store.create_list(list_name("Third")).await.unwrap();

        let ids: Vec<_> = store
            .all_lists()
            .await
            .unwrap()
            .into_iter()
            .map(|l| l.id)
            .filter(|id| [a, b, c].contains(id))
            .collect();
        assert_eq!(ids, vec![a, b, c]);
    }

    pub async fn duplicate_name_rejected(store: &dyn TodoStore) {
        store.create_list(list_name("A")).await.unwrap();
        let count = store.all_lists().await.unwrap().len();

        let err = store.create_list(list_name("A")).await.unwrap_err();
        assert!(matches!(err, StoreError::DuplicateName(ref n) if n == "A"));
        assert_eq!(store.all_lists().await.unwrap().len(), count);
    }

    pub async fn rename(store: &dyn TodoStore) {
        let id = store.create_list(list_name("Old")).await.unwrap();
        store.create_list(list_name("Taken")).await.unwrap();

        store.rename_list(id, list_name("New")).await.unwrap();
        assert_eq!(store.find_list(id).await.unwrap().name, "New");

        // Renaming to its own name is harmless
        store.rename_list(id, list_name("New")).await.unwrap();

        let err = store.rename_list(id, list_name("Taken")).await.unwrap_err();
        assert!(matches!(err, StoreError::DuplicateName(_)));

        let err = store
            .rename_list(ListId(i64::MAX), list_name("Ghost"))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::NotFound(Resource::List(_))));
    }

    pub async fn groceries_scenario(store: &dyn TodoStore) {
        let id = store.create_list(list_name("Groceries")).await.unwrap();
        let milk = store.create_todo(id, todo_name("Milk")).await.unwrap();
        let eggs = store.create_todo(id, todo_name("Eggs")).await.unwrap();
        assert_ne!(milk, eggs);

        store.set_todo_status(id, milk, true).await.unwrap();
        let list = store.find_list(id).await.unwrap();
        let names: Vec<_> = sort_by_completion(&list.todos)
            .into_iter()
            .map(|t| t.name.as_str())
            .collect();
        assert_eq!(names, vec!["Eggs", "Milk"]);
        assert!(!list.is_complete());

        store.set_todo_status(id, eggs, true).await.unwrap();
        let list = store.find_list(id).await.unwrap();
        assert!(list.is_complete());

        // Reverting one todo makes the list incomplete again
        store.set_todo_status(id, milk, false).await.unwrap();
        let list = store.find_list(id).await.unwrap();
        assert!(!Completion::is_complete(&list));
        assert_eq!(list.remaining_count(), 1);
    }

    pub async fn complete_all_idempotent(store: &dyn TodoStore) {
        let id = store.create_list(list_name("Chores")).await.unwrap();
        store.create_todo(id, todo_name("Dishes")).await.unwrap();
        store.create_todo(id, todo_name("Laundry")).await.unwrap();

        store.complete_all_todos(id).await.unwrap();
        let once = store.find_list(id).await.unwrap();
        store.complete_all_todos(id).await.unwrap();
        let twice = store.find_list(id).await.unwrap();

        assert_eq!(once, twice);
        assert!(twice.is_complete());
    }

    pub async fn delete_list_cascades(store: &dyn TodoStore) {
        let id = store.create_list(list_name("Doomed")).await.unwrap();
        store.create_todo(id, todo_name("One")).await.unwrap();
        store.create_todo(id, todo_name("Two")).await.unwrap();

        store.delete_list(id).await.unwrap();

        let err = store.find_list(id).await.unwrap_err();
        assert!(matches!(err, StoreError::NotFound(Resource::List(missing)) if missing == id));
        assert!(store
            .all_lists()
            .await
            .unwrap()
            .iter()
            .all(|l| l.id != id));

        // Deleting again is a silent no-op
        store.delete_list(id).await.unwrap();
    }

    pub async fn delete_todo(store: &dyn TodoStore) {
        let id = store.create_list(list_name("Errands")).await.unwrap();
        let keep = store.create_todo(id, todo_name("Keep")).await.unwrap();
        let drop = store.create_todo(id, todo_name("Drop")).await.unwrap();

        store.delete_todo(id, drop).await.unwrap();
        let list = store.find_list(id).await.unwrap();
        assert_eq!(list.todos.len(), 1);
        assert_eq!(list.todos[0].id, keep);

        let err = store.delete_todo(id, drop).await.unwrap_err();
        assert!(matches!(err, StoreError::NotFound(Resource::Todo(_, _))));
    }

    pub async fn ids_not_reused(store: &dyn TodoStore) {
        let first = store.create_list(list_name("Temp")).await.unwrap();
        let todo = store.create_todo(first, todo_name("x")).await.unwrap();
        store.delete_todo(first, todo).await.unwrap();
        let next_todo = store.create_todo(first, todo_name("y")).await.unwrap();
        assert_ne!(todo, next_todo);

        store.delete_list(first).await.unwrap();
        let second = store.create_list(list_name("Temp")).await.unwrap();
        assert_ne!(first, second);
    }

    pub async fn todos_scoped_to_their_list(store: &dyn TodoStore) {
        let a = store.create_list(list_name("Mine")).await.unwrap();
        let b = store.create_list(list_name("Yours")).await.unwrap();
        let todo = store.create_todo(a, todo_name("Private")).await.unwrap();

        let err = store.set_todo_status(b, todo, true).await.unwrap_err();
        assert!(matches!(err, StoreError::NotFound(Resource::Todo(_, _))));
        let err = store.delete_todo(b, todo).await.unwrap_err();
        assert!(matches!(err, StoreError::NotFound(Resource::Todo(_, _))));

        assert!(!store.find_list(a).await.unwrap().todos[0].completed);
    }

    pub async fn missing_list_operations(store: &dyn TodoStore) {
        let ghost = ListId(i64::MAX);
        assert!(matches!(
            store.find_list(ghost).await,
            Err(StoreError::NotFound(Resource::List(_)))
        ));
        assert!(matches!(
            store.create_todo(ghost, todo_name("x")).await,
            Err(StoreError::NotFound(Resource::List(_)))
        ));
        assert!(matches!(
            store.complete_all_todos(ghost).await,
            Err(StoreError::NotFound(Resource::List(_)))
        ));
        // Todo operations report the todo, whichever backend
        assert!(matches!(
            store.delete_todo(ghost, TodoId(1)).await,
            Err(StoreError::NotFound(Resource::Todo(l, t))) if l == ghost && t == TodoId(1)
        ));
        assert!(matches!(
            store.set_todo_status(ghost, TodoId(1), true).await,
            Err(StoreError::NotFound(Resource::Todo(l, _))) if l == ghost
        ));
        store.delete_list(ghost).await.unwrap();
    }
}
