//! Cookie-identified sessions
//!
//! A session owns its single-use flash message and, with the ephemeral
//! backend, its private [`MemoryStore`]. Sessions expire after an idle
//! TTL; expired sessions are swept whenever a request resolves one.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use axum::extract::{Request, State};
use axum::http::header::{COOKIE, SET_COOKIE};
use axum::http::{HeaderMap, HeaderValue};
use axum::middleware::Next;
use axum::response::Response;
use serde::Serialize;
use tokio::sync::RwLock;
use tokio::time::Instant;
use uuid::Uuid;

use crate::state::AppState;
use crate::store::{MemoryStore, TodoStore};

/// Name of the cookie carrying the session id
pub const SESSION_COOKIE: &str = "todolists_session";

/// Default idle lifetime of a session
pub const DEFAULT_SESSION_TTL: Duration = Duration::from_secs(30 * 60);

/// One-shot notification shown on the next render
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "message", rename_all = "lowercase")]
pub enum Flash {
    Success(String),
    Error(String),
}

#[derive(Debug)]
struct SessionEntry {
    flash: Option<Flash>,
    last_seen: Instant,
    store: Option<Arc<MemoryStore>>,
}

/// All live sessions
#[derive(Debug)]
pub struct SessionManager {
    sessions: RwLock<HashMap<Uuid, SessionEntry>>,
    ttl: Duration,
    ephemeral: bool,
}

impl SessionManager {
    /// `ephemeral` gives every new session its own [`MemoryStore`].
    pub fn new(ttl: Duration, ephemeral: bool) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            ttl,
            ephemeral,
        }
    }

    /// Look up a live session or start a new one.
    ///
    /// Returns the session id and whether it was just created. Unknown or
    /// expired ids are never reused; a fresh id is minted instead.
    pub async fn resolve(&self, requested: Option<Uuid>) -> (Uuid, bool) {
        let now = Instant::now();
        let mut sessions = self.sessions.write().await;

        let before = sessions.len();
        sessions.retain(|_, entry| now.duration_since(entry.last_seen) < self.ttl);
        let expired = before - sessions.len();
        if expired > 0 {
            tracing::debug!(expired, "expired idle sessions");
        }

        if let Some(id) = requested {
            if let Some(entry) = sessions.get_mut(&id) {
                entry.last_seen = now;
                return (id, false);
            }
        }

        let id = Uuid::new_v4();
        sessions.insert(
            id,
            SessionEntry {
                flash: None,
                last_seen: now,
                store: self.ephemeral.then(|| Arc::new(MemoryStore::new())),
            },
        );
        tracing::debug!(session = %id, "started session");
        (id, true)
    }

    /// Replace the session's flash message.
    pub async fn set_flash(&self, id: Uuid, flash: Flash) {
        if let Some(entry) = self.sessions.write().await.get_mut(&id) {
            entry.flash = Some(flash);
        }
    }

    /// Remove and return the session's flash message.
    pub async fn take_flash(&self, id: Uuid) -> Option<Flash> {
        self.sessions
            .write()
            .await
            .get_mut(&id)
            .and_then(|entry| entry.flash.take())
    }

    /// The session's private store, when running the ephemeral backend.
    pub async fn memory_store(&self, id: Uuid) -> Option<Arc<MemoryStore>> {
        self.sessions
            .read()
            .await
            .get(&id)
            .and_then(|entry| entry.store.clone())
    }

    /// Number of sessions, including expired ones not yet swept.
    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }
}

/// Per-request view of the current session, placed in request extensions
/// by [`session_middleware`].
#[derive(Clone)]
pub struct Session {
    id: Uuid,
    store: Arc<dyn TodoStore>,
    manager: Arc<SessionManager>,
}

impl Session {
    pub fn new(id: Uuid, store: Arc<dyn TodoStore>, manager: Arc<SessionManager>) -> Self {
        Self { id, store, manager }
    }

    /// Storage backing this session.
    pub fn store(&self) -> &dyn TodoStore {
        self.store.as_ref()
    }

    pub async fn flash_success(&self, message: impl Into<String>) {
        self.manager
            .set_flash(self.id, Flash::Success(message.into()))
            .await;
    }

    pub async fn take_flash(&self) -> Option<Flash> {
        self.manager.take_flash(self.id).await
    }
}

/// Read the session id from the request's `Cookie` headers.
pub fn session_id_from_headers(headers: &HeaderMap) -> Option<Uuid> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .filter(|(name, _)| *name == SESSION_COOKIE)
        .find_map(|(_, value)| Uuid::parse_str(value).ok())
}

fn session_cookie(id: Uuid) -> HeaderValue {
    let cookie = format!("{}={}; Path=/; HttpOnly; SameSite=Lax", SESSION_COOKIE, id);
    // A hyphenated UUID and fixed attributes are always valid header bytes
    HeaderValue::from_str(&cookie).unwrap_or_else(|_| HeaderValue::from_static(""))
}

/// Resolve (or start) the session and expose it to handlers.
///
/// Also stores any flash attached to the response and sets the cookie
/// when the session is new.
pub async fn session_middleware(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Response {
    let requested = session_id_from_headers(req.headers());
    let (id, created) = state.sessions().resolve(requested).await;

    let store = state.store_for(id).await;
    req.extensions_mut()
        .insert(Session::new(id, store, state.sessions_handle()));

    let mut response = next.run(req).await;

    // Error responses carry their flash in extensions; keep it for the next render
    if let Some(flash) = response.extensions_mut().remove::<Flash>() {
        state.sessions().set_flash(id, flash).await;
    }

    if created {
        response
            .headers_mut()
            .append(SET_COOKIE, session_cookie(id));
    }
    response
}
