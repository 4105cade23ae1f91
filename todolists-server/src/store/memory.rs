//! Ephemeral in-memory backend
//!
//! One instance lives inside each session and disappears with it.
//! Every operation takes the lock once, so each call is atomic.

use async_trait::async_trait;
use tokio::sync::RwLock;
use todolists_core::{ListId, ListName, Todo, TodoId, TodoList, TodoName};

use super::{Resource, StoreError, StoreResult, TodoStore};

#[derive(Debug)]
struct StoredList {
    list: TodoList,
    next_todo_id: i64,
}

#[derive(Debug)]
struct Inner {
    lists: Vec<StoredList>,
    next_list_id: i64,
}

impl Inner {
    fn get(&self, id: ListId) -> StoreResult<&StoredList> {
        self.lists
            .iter()
            .find(|stored| stored.list.id == id)
            .ok_or(StoreError::NotFound(Resource::List(id)))
    }

    fn get_mut(&mut self, id: ListId) -> StoreResult<&mut StoredList> {
        self.lists
            .iter_mut()
            .find(|stored| stored.list.id == id)
            .ok_or(StoreError::NotFound(Resource::List(id)))
    }

    fn name_taken(&self, name: &str, except: Option<ListId>) -> bool {
        self.lists
            .iter()
            .any(|stored| stored.list.name == name && Some(stored.list.id) != except)
    }
}

/// Session-scoped list storage
#[derive(Debug)]
pub struct MemoryStore {
    inner: RwLock<Inner>,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self {
            inner: RwLock::new(Inner {
                lists: Vec::new(),
                next_list_id: 1,
            }),
        }
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TodoStore for MemoryStore {
    async fn find_list(&self, id: ListId) -> StoreResult<TodoList> {
        let inner = self.inner.read().await;
        Ok(inner.get(id)?.list.clone())
    }

    async fn all_lists(&self) -> StoreResult<Vec<TodoList>> {
        let inner = self.inner.read().await;
        Ok(inner.lists.iter().map(|stored| stored.list.clone()).collect())
    }

    async fn list_names(&self) -> StoreResult<Vec<String>> {
        let inner = self.inner.read().await;
        Ok(inner
            .lists
            .iter()
            .map(|stored| stored.list.name.clone())
            .collect())
    }

    async fn create_list(&self, name: ListName) -> StoreResult<ListId> {
        let mut inner = self.inner.write().await;
        if inner.name_taken(name.as_str(), None) {
            return Err(StoreError::DuplicateName(name.into_string()));
        }

        let id = ListId(inner.next_list_id);
        inner.next_list_id += 1;
        inner.lists.push(StoredList {
            list: TodoList::new(id, name.into_string()),
            next_todo_id: 1,
        });
        Ok(id)
    }

    async fn delete_list(&self, id: ListId) -> StoreResult<()> {
        let mut inner = self.inner.write().await;
        inner.lists.retain(|stored| stored.list.id != id);
        Ok(())
    }

    async fn rename_list(&self, id: ListId, name: ListName) -> StoreResult<()> {
        let mut inner = self.inner.write().await;
        inner.get(id)?;
        if inner.name_taken(name.as_str(), Some(id)) {
            return Err(StoreError::DuplicateName(name.into_string()));
        }
        inner.get_mut(id)?.list.name = name.into_string();
        Ok(())
    }

    async fn create_todo(&self, list_id: ListId, name: TodoName) -> StoreResult<TodoId> {
        let mut inner = self.inner.write().await;
        let stored = inner.get_mut(list_id)?;

        let id = TodoId(stored.next_todo_id);
        stored.next_todo_id += 1;
        stored.list.todos.push(Todo::new(id, name.into_string(), false));
        Ok(id)
    }

    async fn delete_todo(&self, list_id: ListId, todo_id: TodoId) -> StoreResult<()> {
        let mut inner = self.inner.write().await;
        let todos = &mut inner
            .get_mut(list_id)
            .map_err(|_| StoreError::NotFound(Resource::Todo(list_id, todo_id)))?
            .list
            .todos;

        let position = todos
            .iter()
            .position(|todo| todo.id == todo_id)
            .ok_or(StoreError::NotFound(Resource::Todo(list_id, todo_id)))?;
        todos.remove(position);
        Ok(())
    }

    async fn set_todo_status(
        &self,
        list_id: ListId,
        todo_id: TodoId,
        completed: bool,
    ) -> StoreResult<()> {
        let mut inner = self.inner.write().await;
        let todo = inner
            .get_mut(list_id)
            .map_err(|_| StoreError::NotFound(Resource::Todo(list_id, todo_id)))?
            .list
            .todo_mut(todo_id)
            .ok_or(StoreError::NotFound(Resource::Todo(list_id, todo_id)))?;
        todo.completed = completed;
        Ok(())
    }

    async fn complete_all_todos(&self, list_id: ListId) -> StoreResult<()> {
        let mut inner = self.inner.write().await;
        inner.get_mut(list_id)?.list.complete_all();
        Ok(())
    }
}
