//! Custom Axum extractors

use std::collections::HashMap;

use axum::extract::{FromRequestParts, Path};
use axum::http::request::Parts;
use todolists_core::{ListId, TodoId};

use super::error::ApiError;
use crate::session::Session;

async fn path_params<S>(parts: &mut Parts, state: &S) -> Option<HashMap<String, String>>
where
    S: Send + Sync,
{
    Path::<HashMap<String, String>>::from_request_parts(parts, state)
        .await
        .ok()
        .map(|Path(params)| params)
}

/// Extract a list id from the `{id}` path segment.
///
/// A malformed id is treated like a missing list.
pub struct ListPath(pub ListId);

impl<S> FromRequestParts<S> for ListPath
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let id = path_params(parts, state)
            .await
            .and_then(|params| params.get("id")?.parse::<i64>().ok())
            .ok_or(ApiError::ListNotFound)?;

        Ok(Self(ListId(id)))
    }
}

/// Extract list and todo ids from the `{id}` and `{todo_id}` path segments.
pub struct TodoPath {
    pub list_id: ListId,
    pub todo_id: TodoId,
}

impl<S> FromRequestParts<S> for TodoPath
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let params = path_params(parts, state).await.unwrap_or_default();

        let list_id = params
            .get("id")
            .and_then(|v| v.parse::<i64>().ok())
            .map(ListId)
            .ok_or(ApiError::ListNotFound)?;

        let todo_id = params
            .get("todo_id")
            .and_then(|v| v.parse::<i64>().ok())
            .map(TodoId)
            .ok_or(ApiError::TodoNotFound { list_id })?;

        Ok(Self { list_id, todo_id })
    }
}

/// The current session, placed in extensions by the session middleware.
impl<S> FromRequestParts<S> for Session
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Session>()
            .cloned()
            .ok_or_else(|| ApiError::Internal {
                message: "session middleware not installed".into(),
            })
    }
}
