//! List endpoints

use axum::{
    response::Redirect,
    routing::{get, post},
    Form, Json, Router,
};
use serde::Deserialize;
use todolists_core::{validate_list_name, validate_list_rename};
use tracing::instrument;

use crate::http::error::ApiError;
use crate::http::extractors::ListPath;
use crate::http::views::{EditListPage, ListPage, ListsPage, NewListPage};
use crate::session::Session;
use crate::state::AppState;

/// Create/rename list form
#[derive(Debug, Deserialize)]
pub struct ListNameForm {
    pub list_name: String,
}

/// GET / - the overview is the home page
async fn home() -> Redirect {
    Redirect::to("/lists")
}

/// GET /lists - all lists, incomplete first
async fn index(session: Session) -> Result<Json<ListsPage>, ApiError> {
    let lists = session.store().all_lists().await?;
    let flash = session.take_flash().await;
    Ok(Json(ListsPage::new(flash, &lists)))
}

/// GET /lists/new - the empty new-list form
async fn new_list(session: Session) -> Json<NewListPage> {
    Json(NewListPage {
        flash: session.take_flash().await,
    })
}

/// POST /lists - create a new list
#[instrument(skip_all)]
async fn create(session: Session, Form(form): Form<ListNameForm>) -> Result<Redirect, ApiError> {
    let existing = session.store().list_names().await?;
    let name = validate_list_name(form.list_name.trim(), &existing)
        .map_err(|e| ApiError::validation(e, &form.list_name))?;

    let id = session.store().create_list(name).await?;
    tracing::info!(list_id = %id, "list created");

    session.flash_success("The list has been created.").await;
    Ok(Redirect::to("/lists"))
}

/// GET /lists/{id} - a single list with its todos
async fn show(session: Session, ListPath(id): ListPath) -> Result<Json<ListPage>, ApiError> {
    let list = session.store().find_list(id).await?;
    let flash = session.take_flash().await;
    Ok(Json(ListPage {
        flash,
        list: list.into(),
    }))
}

/// GET /lists/{id}/edit - current name for the edit form
async fn edit(session: Session, ListPath(id): ListPath) -> Result<Json<EditListPage>, ApiError> {
    let list = session.store().find_list(id).await?;
    let flash = session.take_flash().await;
    Ok(Json(EditListPage {
        flash,
        id: list.id,
        name: list.name,
    }))
}

/// POST /lists/{id} - rename a list
#[instrument(skip_all, fields(list_id = %id))]
async fn rename(
    session: Session,
    ListPath(id): ListPath,
    Form(form): Form<ListNameForm>,
) -> Result<Redirect, ApiError> {
    let list = session.store().find_list(id).await?;
    let existing = session.store().list_names().await?;
    let name = validate_list_rename(form.list_name.trim(), &list.name, &existing)
        .map_err(|e| ApiError::validation(e, &form.list_name))?;

    session.store().rename_list(id, name).await?;

    session.flash_success("The list name has been changed.").await;
    Ok(Redirect::to(&format!("/lists/{}", id)))
}

/// POST /lists/{id}/destroy - delete a list and its todos
#[instrument(skip_all, fields(list_id = %id))]
async fn destroy(session: Session, ListPath(id): ListPath) -> Result<Redirect, ApiError> {
    session.store().delete_list(id).await?;
    tracing::info!("list deleted");

    session.flash_success("The list has been deleted.").await;
    Ok(Redirect::to("/lists"))
}

/// POST /lists/{id}/complete_all - mark every todo completed
async fn complete_all(session: Session, ListPath(id): ListPath) -> Result<Redirect, ApiError> {
    session.store().complete_all_todos(id).await?;

    session.flash_success("Completed all todos.").await;
    Ok(Redirect::to(&format!("/lists/{}", id)))
}

/// List routes
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(home))
        .route("/lists", get(index).post(create))
        .route("/lists/new", get(new_list))
        .route("/lists/{id}", get(show).post(rename))
        .route("/lists/{id}/edit", get(edit))
        .route("/lists/{id}/destroy", post(destroy))
        .route("/lists/{id}/complete_all", post(complete_all))
}
