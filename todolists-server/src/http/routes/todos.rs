//! Todo endpoints, nested under their list

use axum::{response::Redirect, routing::post, Form, Router};
use serde::Deserialize;
use todolists_core::{parse_completed_flag, validate_todo_name};
use tracing::instrument;

use crate::http::error::ApiError;
use crate::http::extractors::{ListPath, TodoPath};
use crate::session::Session;
use crate::state::AppState;

/// Add todo form
#[derive(Debug, Deserialize)]
pub struct TodoForm {
    pub todo: String,
}

/// Status toggle form; only `completed=true` marks the todo done
#[derive(Debug, Deserialize)]
pub struct StatusForm {
    #[serde(default)]
    pub completed: String,
}

fn list_url(id: impl std::fmt::Display) -> String {
    format!("/lists/{}", id)
}

/// POST /lists/{id}/todos - add a todo
#[instrument(skip_all, fields(list_id = %list_id))]
async fn create(
    session: Session,
    ListPath(list_id): ListPath,
    Form(form): Form<TodoForm>,
) -> Result<Redirect, ApiError> {
    // Missing list redirects before the name is looked at
    session.store().find_list(list_id).await?;

    let name =
        validate_todo_name(form.todo.trim()).map_err(|e| ApiError::validation(e, &form.todo))?;

    let todo_id = session.store().create_todo(list_id, name).await?;
    tracing::debug!(todo_id = %todo_id, "todo added");

    session.flash_success("The todo was added.").await;
    Ok(Redirect::to(&list_url(list_id)))
}

/// POST /lists/{id}/todos/{todo_id}/destroy - delete a todo
#[instrument(skip_all, fields(list_id = %path.list_id, todo_id = %path.todo_id))]
async fn destroy(session: Session, path: TodoPath) -> Result<Redirect, ApiError> {
    session.store().find_list(path.list_id).await?;
    session
        .store()
        .delete_todo(path.list_id, path.todo_id)
        .await?;

    session.flash_success("The todo has been deleted.").await;
    Ok(Redirect::to(&list_url(path.list_id)))
}

/// POST /lists/{id}/todos/{todo_id} - set completion status
#[instrument(skip_all, fields(list_id = %path.list_id, todo_id = %path.todo_id))]
async fn update_status(
    session: Session,
    path: TodoPath,
    Form(form): Form<StatusForm>,
) -> Result<Redirect, ApiError> {
    session.store().find_list(path.list_id).await?;

    let completed = parse_completed_flag(&form.completed);
    session
        .store()
        .set_todo_status(path.list_id, path.todo_id, completed)
        .await?;

    session.flash_success("The todo has been updated.").await;
    Ok(Redirect::to(&list_url(path.list_id)))
}

/// Todo routes
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/lists/{id}/todos", post(create))
        .route("/lists/{id}/todos/{todo_id}", post(update_status))
        .route("/lists/{id}/todos/{todo_id}/destroy", post(destroy))
}
