// src/presentation/http/session.rs
use std::sync::{
    Arc, Mutex, PoisonError,
    atomic::{AtomicBool, Ordering},
};

use axum::http::{HeaderMap, HeaderValue};
use headers::{Cookie, HeaderMapExt};
use uuid::Uuid;

use crate::{
    application::{
        ApplicationResult,
        dto::{SessionData, SessionUser},
        error::ApplicationError,
        ports::SessionStorePort,
    },
    config::SessionConfig,
};

/// The browser session of the current request.
///
/// Cloning shares the same underlying state, so a presenter and the HTTP handler
/// see each other's changes. Nothing reaches the store until [`SessionHandle::save`].
#[derive(Clone)]
pub struct SessionHandle {
    inner: Arc<SessionInner>,
}

struct SessionInner {
    id: Mutex<String>,
    is_new: bool,
    data: Mutex<SessionData>,
    saved: AtomicBool,
    store: Arc<SessionStorePort>,
}

impl SessionHandle {
    /// Load the session named by `id`, or start a new one when the id is absent or
    /// unknown to the store.
    pub async fn open(store: Arc<SessionStorePort>, id: Option<&str>) -> ApplicationResult<Self> {
        if let Some(id) = id {
            if let Some(data) = store.load(id).await? {
                return Ok(Self::with_state(store, id.to_string(), false, data));
            }
            tracing::debug!("unknown session id presented, starting a new session");
        }

        let id = Uuid::new_v4().to_string();
        Ok(Self::with_state(store, id, true, SessionData::default()))
    }

    /// Open the session referenced by the request's cookie.
    pub async fn from_headers(
        store: Arc<SessionStorePort>,
        headers: &HeaderMap,
        config: &SessionConfig,
    ) -> ApplicationResult<Self> {
        let id = session_id_from_headers(headers, &config.cookie_name);
        Self::open(store, id.as_deref()).await
    }

    fn with_state(
        store: Arc<SessionStorePort>,
        id: String,
        is_new: bool,
        data: SessionData,
    ) -> Self {
        Self {
            inner: Arc::new(SessionInner {
                id: Mutex::new(id),
                is_new,
                data: Mutex::new(data),
                saved: AtomicBool::new(false),
                store,
            }),
        }
    }

    pub fn id(&self) -> String {
        self.inner
            .id
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn is_new(&self) -> bool {
        self.inner.is_new
    }

    pub fn data(&self) -> SessionData {
        self.lock().clone()
    }

    pub fn user(&self) -> Option<SessionUser> {
        self.lock().user.clone()
    }

    pub fn activate_user(&self, user: SessionUser) {
        self.lock().activate(user);
    }

    /// Move the session to a fresh id and drop the old one from the store. The data
    /// is kept and reaches the store with the next [`SessionHandle::save`].
    pub async fn regenerate_id(&self) -> ApplicationResult<()> {
        let new_id = Uuid::new_v4().to_string();
        let old_id = std::mem::replace(
            &mut *self.inner.id.lock().unwrap_or_else(PoisonError::into_inner),
            new_id,
        );
        if !self.inner.is_new {
            self.inner.store.destroy(&old_id).await?;
        }
        tracing::debug!("session id regenerated");
        Ok(())
    }

    pub async fn save(&self) -> ApplicationResult<()> {
        let data = self.data();
        self.inner.store.save(&self.id(), data).await?;
        self.inner.saved.store(true, Ordering::SeqCst);
        Ok(())
    }

    /// Whether this request persisted the session (and so must send the cookie).
    pub fn was_saved(&self) -> bool {
        self.inner.saved.load(Ordering::SeqCst)
    }

    /// `Set-Cookie` value carrying this session's id.
    pub fn cookie(&self, config: &SessionConfig) -> ApplicationResult<HeaderValue> {
        let mut cookie = format!(
            "{}={}; Path=/; HttpOnly; SameSite=Lax; Max-Age={}",
            config.cookie_name,
            self.id(),
            config.ttl.as_secs()
        );
        if config.secure {
            cookie.push_str("; Secure");
        }
        HeaderValue::from_str(&cookie).map_err(|err| {
            ApplicationError::infrastructure(format!("invalid session cookie: {err}"))
        })
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, SessionData> {
        self.inner.data.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl std::fmt::Debug for SessionHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionHandle")
            .field("is_new", &self.inner.is_new)
            .field("saved", &self.was_saved())
            .finish_non_exhaustive()
    }
}

pub fn session_id_from_headers(headers: &HeaderMap, cookie_name: &str) -> Option<String> {
    headers
        .typed_get::<Cookie>()
        .and_then(|cookie| cookie.get(cookie_name).map(str::to_string))
        .filter(|id| !id.is_empty())
}
