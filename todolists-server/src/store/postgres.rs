//! PostgreSQL backend
//!
//! Handles list/todo CRUD with:
//! - Todos re-fetched on every read (no caching)
//! - Two queries for all lists, grouped in memory (no N+1)
//! - Unique violations on `lists.name` reported as duplicates
//! - Transactions around multi-statement operations

use async_trait::async_trait;
use sqlx::{FromRow, PgPool};
use todolists_core::{ListId, ListName, Todo, TodoId, TodoList, TodoName};

use super::{Resource, StoreError, StoreResult, TodoStore};

/// List record from database
#[derive(Debug, Clone, FromRow)]
struct ListRow {
    id: i64,
    name: String,
}

/// Todo record from database, with `completed` read back as text
#[derive(Debug, Clone, FromRow)]
struct TodoRow {
    id: i64,
    list_id: i64,
    name: String,
    completed: String,
}

impl TryFrom<TodoRow> for Todo {
    type Error = StoreError;

    fn try_from(row: TodoRow) -> Result<Self, Self::Error> {
        Ok(Todo::new(
            TodoId(row.id),
            row.name,
            parse_truth_flag(&row.completed)?,
        ))
    }
}

/// Map a Postgres textual boolean to `bool`.
///
/// Accepts both the wire form (`t`/`f`) and the cast form (`true`/`false`).
pub fn parse_truth_flag(value: &str) -> StoreResult<bool> {
    match value {
        "t" | "true" => Ok(true),
        "f" | "false" => Ok(false),
        other => Err(StoreError::Corrupt(format!(
            "unexpected completion flag '{}'",
            other
        ))),
    }
}

/// Turn a unique violation into a duplicate-name error.
fn map_name_conflict(err: sqlx::Error, name: &str) -> StoreError {
    match &err {
        sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
            StoreError::DuplicateName(name.to_owned())
        }
        _ => StoreError::Database(err),
    }
}

/// Relational list storage
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn todos_for_list(&self, list_id: ListId) -> StoreResult<Vec<Todo>> {
        let rows: Vec<TodoRow> = sqlx::query_as(
            r#"
            SELECT id::int8 AS id, list_id::int8 AS list_id, name, completed::text AS completed
            FROM todos
            WHERE list_id = $1
            ORDER BY id
            "#,
        )
        .bind(list_id.0)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Todo::try_from).collect()
    }
}

#[async_trait]
impl TodoStore for PgStore {
    async fn find_list(&self, id: ListId) -> StoreResult<TodoList> {
        let row: ListRow = sqlx::query_as("SELECT id::int8 AS id, name FROM lists WHERE id = $1")
            .bind(id.0)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(StoreError::NotFound(Resource::List(id)))?;

        let todos = self.todos_for_list(id).await?;
        Ok(TodoList {
            id: ListId(row.id),
            name: row.name,
            todos,
        })
    }

    async fn all_lists(&self) -> StoreResult<Vec<TodoList>> {
        let list_rows: Vec<ListRow> =
            sqlx::query_as("SELECT id::int8 AS id, name FROM lists ORDER BY id")
                .fetch_all(&self.pool)
                .await?;

        let todo_rows: Vec<TodoRow> = sqlx::query_as(
            r#"
            SELECT id::int8 AS id, list_id::int8 AS list_id, name, completed::text AS completed
            FROM todos
            ORDER BY list_id, id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        let mut lists: Vec<TodoList> = list_rows
            .into_iter()
            .map(|row| TodoList::new(ListId(row.id), row.name))
            .collect();

        for row in todo_rows {
            let list_id = ListId(row.list_id);
            // A todo inserted between the two queries may belong to a list we didn't see
            if let Some(list) = lists.iter_mut().find(|list| list.id == list_id) {
                list.todos.push(Todo::try_from(row)?);
            }
        }

        Ok(lists)
    }

    async fn list_names(&self) -> StoreResult<Vec<String>> {
        let names: Vec<(String,)> = sqlx::query_as("SELECT name FROM lists ORDER BY id")
            .fetch_all(&self.pool)
            .await?;
        Ok(names.into_iter().map(|(name,)| name).collect())
    }

    async fn create_list(&self, name: ListName) -> StoreResult<ListId> {
        let (id,): (i64,) =
            sqlx::query_as("INSERT INTO lists (name) VALUES ($1) RETURNING id::int8")
                .bind(name.as_str())
                .fetch_one(&self.pool)
                .await
                .map_err(|e| map_name_conflict(e, name.as_str()))?;

        tracing::debug!(list_id = id, "created list");
        Ok(ListId(id))
    }

    async fn delete_list(&self, id: ListId) -> StoreResult<()> {
        let mut tx = self.pool.begin().await?;

        let todos = sqlx::query("DELETE FROM todos WHERE list_id = $1")
            .bind(id.0)
            .execute(&mut *tx)
            .await?;

        sqlx::query("DELETE FROM lists WHERE id = $1")
            .bind(id.0)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        tracing::debug!(
            list_id = id.0,
            todos_removed = todos.rows_affected(),
            "deleted list"
        );
        Ok(())
    }

    async fn rename_list(&self, id: ListId, name: ListName) -> StoreResult<()> {
        let result = sqlx::query("UPDATE lists SET name = $1 WHERE id = $2")
            .bind(name.as_str())
            .bind(id.0)
            .execute(&self.pool)
            .await
            .map_err(|e| map_name_conflict(e, name.as_str()))?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound(Resource::List(id)));
        }
        Ok(())
    }

    async fn create_todo(&self, list_id: ListId, name: TodoName) -> StoreResult<TodoId> {
        let mut tx = self.pool.begin().await?;

        // Lock the parent row so a concurrent delete can't orphan the todo
        let exists: Option<(i64,)> =
            sqlx::query_as("SELECT id::int8 FROM lists WHERE id = $1 FOR SHARE")
                .bind(list_id.0)
                .fetch_optional(&mut *tx)
                .await?;

        if exists.is_none() {
            return Err(StoreError::NotFound(Resource::List(list_id)));
        }

        let (id,): (i64,) =
            sqlx::query_as("INSERT INTO todos (name, list_id) VALUES ($1, $2) RETURNING id::int8")
                .bind(name.as_str())
                .bind(list_id.0)
                .fetch_one(&mut *tx)
                .await?;

        tx.commit().await?;
        Ok(TodoId(id))
    }

    async fn delete_todo(&self, list_id: ListId, todo_id: TodoId) -> StoreResult<()> {
        let result = sqlx::query("DELETE FROM todos WHERE list_id = $1 AND id = $2")
            .bind(list_id.0)
            .bind(todo_id.0)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound(Resource::Todo(list_id, todo_id)));
        }
        Ok(())
    }

    async fn set_todo_status(
        &self,
        list_id: ListId,
        todo_id: TodoId,
        completed: bool,
    ) -> StoreResult<()> {
        let result = sqlx::query("UPDATE todos SET completed = $1 WHERE id = $2 AND list_id = $3")
            .bind(completed)
            .bind(todo_id.0)
            .bind(list_id.0)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound(Resource::Todo(list_id, todo_id)));
        }
        Ok(())
    }

    async fn complete_all_todos(&self, list_id: ListId) -> StoreResult<()> {
        let mut tx = self.pool.begin().await?;

        let exists: Option<(i64,)> =
            sqlx::query_as("SELECT id::int8 FROM lists WHERE id = $1 FOR SHARE")
                .bind(list_id.0)
                .fetch_optional(&mut *tx)
                .await?;

        if exists.is_none() {
            return Err(StoreError::NotFound(Resource::List(list_id)));
        }

        sqlx::query("UPDATE todos SET completed = true WHERE list_id = $1")
            .bind(list_id.0)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(())
    }
}
