// src/presentation/http/state.rs
use crate::{
    application::ports::SessionStorePort,
    config::SessionConfig,
    infrastructure::ioc::Container,
    presentation::http::{
        error::{HttpResult, IntoHttpResult},
        session::SessionHandle,
    },
};
use axum::http::HeaderMap;
use std::sync::Arc;

#[derive(Clone)]
pub struct HttpState {
    pub container: Container,
    pub sessions: Arc<SessionStorePort>,
    pub session_config: SessionConfig,
}

impl HttpState {
    pub fn new(
        container: Container,
        sessions: Arc<SessionStorePort>,
        session_config: SessionConfig,
    ) -> Self {
        Self {
            container,
            sessions,
            session_config,
        }
    }

    pub async fn open_session(&self, headers: &HeaderMap) -> HttpResult<SessionHandle> {
        SessionHandle::from_headers(Arc::clone(&self.sessions), headers, &self.session_config)
            .await
            .into_http()
    }
}
