//! Database layer - connection pool and schema bootstrap
//!
//! The relational backend itself lives in [`crate::store::postgres`].

pub mod pool;
pub mod schema;

pub use pool::{create_pool, create_pool_with_options};
pub use schema::ensure_schema;
