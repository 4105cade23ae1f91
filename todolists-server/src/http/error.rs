//! API error types with IntoResponse
//!
//! Validation failures are answered in place (422 with the submitted
//! input echoed back). Missing lists and todos redirect with an error
//! flash, which the session middleware stores for the next render.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Redirect, Response};
use axum::Json;
use serde_json::json;
use todolists_core::{ListId, ValidationError};

use crate::session::Flash;
use crate::store::{Resource, StoreError};

pub const LIST_NOT_FOUND: &str = "The specified list was not found.";
pub const TODO_NOT_FOUND: &str = "The specified todo was not found.";

/// API error type with automatic HTTP status mapping
#[derive(Debug)]
pub enum ApiError {
    /// Name failed validation (422), with the input to redisplay
    Validation {
        error: ValidationError,
        input: String,
    },

    /// List lookup failed (303 to the overview)
    ListNotFound,

    /// Todo lookup failed (303 back to its list)
    TodoNotFound { list_id: ListId },

    /// Storage failure (500, logged)
    Storage(StoreError),

    /// Internal error (500)
    Internal { message: String },
}

impl ApiError {
    pub fn validation(error: ValidationError, input: impl Into<String>) -> Self {
        Self::Validation {
            error,
            input: input.into(),
        }
    }
}

fn redirect_with_error(to: &str, message: &str) -> Response {
    let mut response = Redirect::to(to).into_response();
    response
        .extensions_mut()
        .insert(Flash::Error(message.to_owned()));
    response
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            Self::Validation { error, input } => (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(json!({
                    "error": "validation_error",
                    "message": error.to_string(),
                    "input": input,
                })),
            )
                .into_response(),
            Self::ListNotFound => redirect_with_error("/lists", LIST_NOT_FOUND),
            Self::TodoNotFound { list_id } => {
                redirect_with_error(&format!("/lists/{}", list_id), TODO_NOT_FOUND)
            }
            Self::Storage(e) => {
                // Log the actual error, return generic message
                tracing::error!("Storage error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({
                        "error": "internal_error",
                        "message": "an internal error occurred"
                    })),
                )
                    .into_response()
            }
            Self::Internal { message } => {
                tracing::error!("Internal error: {}", message);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({
                        "error": "internal_error",
                        "message": "an internal error occurred"
                    })),
                )
                    .into_response()
            }
        }
    }
}

impl From<StoreError> for ApiError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::NotFound(Resource::List(_)) => Self::ListNotFound,
            StoreError::NotFound(Resource::Todo(list_id, _)) => Self::TodoNotFound { list_id },
            StoreError::DuplicateName(name) => Self::Validation {
                error: ValidationError::DuplicateName { name: name.clone() },
                input: name,
            },
            _ => Self::Storage(e),
        }
    }
}
