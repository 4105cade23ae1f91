//! HTTP server layer
//!
//! Axum server with:
//! - Cookie sessions and flash messages
//! - CORS (localhost only by default)
//! - Request tracing
//! - Graceful shutdown
//! - JSON views and errors

pub mod error;
pub mod extractors;
pub mod routes;
pub mod server;
pub mod views;

pub use error::ApiError;
pub use server::{build_router, run_server, ServerConfig, ServerError};
