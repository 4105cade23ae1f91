//! Application state shared across handlers

use std::sync::Arc;
use std::time::Duration;

use uuid::Uuid;

use crate::db::{create_pool, ensure_schema};
use crate::session::SessionManager;
use crate::store::{MemoryStore, PgStore, TodoStore};

/// Which storage strategy backs the lists
#[derive(Clone)]
pub enum Backend {
    /// One PostgreSQL store shared by every session
    Postgres(PgStore),
    /// A private in-memory store per session
    Memory,
}

impl Backend {
    /// Connect to PostgreSQL and make sure the tables exist.
    pub async fn connect_postgres(database_url: &str) -> Result<Self, sqlx::Error> {
        let pool = create_pool(database_url).await?;
        ensure_schema(&pool).await?;
        tracing::info!("connected to postgres");
        Ok(Self::Postgres(PgStore::new(pool)))
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Postgres(_) => "postgres",
            Self::Memory => "memory",
        }
    }
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    backend: Backend,
    sessions: Arc<SessionManager>,
}

impl AppState {
    pub fn new(backend: Backend, session_ttl: Duration) -> Self {
        let ephemeral = matches!(backend, Backend::Memory);
        Self {
            inner: Arc::new(AppStateInner {
                backend,
                sessions: Arc::new(SessionManager::new(session_ttl, ephemeral)),
            }),
        }
    }

    pub fn backend(&self) -> &Backend {
        &self.inner.backend
    }

    pub fn sessions(&self) -> &SessionManager {
        &self.inner.sessions
    }

    pub fn sessions_handle(&self) -> Arc<SessionManager> {
        Arc::clone(&self.inner.sessions)
    }

    /// Storage for the given session.
    ///
    /// With the ephemeral backend a session that vanished mid-request
    /// gets an empty throwaway store rather than someone else's.
    pub async fn store_for(&self, session: Uuid) -> Arc<dyn TodoStore> {
        match &self.inner.backend {
            Backend::Postgres(store) => Arc::new(store.clone()),
            Backend::Memory => {
                let store: Arc<MemoryStore> = self
                    .inner
                    .sessions
                    .memory_store(session)
                    .await
                    .unwrap_or_default();
                store as Arc<dyn TodoStore>
            }
        }
    }
}
