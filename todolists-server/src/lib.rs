//! todolists-server: HTTP surface and storage for todolists
//!
//! Lists and todos live either in PostgreSQL, shared by every visitor, or
//! in a private in-memory store per session. Handlers only ever see the
//! [`TodoStore`] trait.

pub mod db;
pub mod http;
pub mod session;
pub mod state;
pub mod store;

pub use http::{build_router, run_server, ServerConfig, ServerError};
pub use session::{Flash, SessionManager, DEFAULT_SESSION_TTL};
pub use state::{AppState, Backend};
pub use store::{MemoryStore, PgStore, StoreError, TodoStore};
