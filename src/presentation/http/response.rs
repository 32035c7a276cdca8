// src/presentation/http/response.rs
use std::sync::{Arc, Mutex, PoisonError};

use axum::{
    Json,
    http::{StatusCode, header::SET_COOKIE},
    response::{IntoResponse, Response},
};
use serde::Serialize;

use crate::{
    application::{ApplicationResult, error::ApplicationError},
    config::SessionConfig,
    presentation::http::{
        error::{HttpError, HttpResult},
        session::SessionHandle,
    },
};

#[derive(Debug, Clone, PartialEq)]
pub struct PresentedResponse {
    pub status: StatusCode,
    pub body: serde_json::Value,
}

/// Write-once slot a presenter fills with the HTTP answer for the current request.
#[derive(Clone, Default)]
pub struct ResponseHandle {
    slot: Arc<Mutex<Option<PresentedResponse>>>,
}

impl ResponseHandle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn send<B: Serialize>(&self, status: StatusCode, body: &B) -> ApplicationResult<()> {
        let body = serde_json::to_value(body).map_err(|err| {
            ApplicationError::infrastructure(format!("response serialization: {err}"))
        })?;

        let mut slot = self.slot.lock().unwrap_or_else(PoisonError::into_inner);
        if slot.is_some() {
            return Err(ApplicationError::infrastructure("response already sent"));
        }
        *slot = Some(PresentedResponse { status, body });
        Ok(())
    }

    pub fn is_sent(&self) -> bool {
        self.slot
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }

    pub fn peek(&self) -> Option<PresentedResponse> {
        self.slot
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn take(&self) -> Option<PresentedResponse> {
        self.slot.lock().unwrap_or_else(PoisonError::into_inner).take()
    }

    /// Turn what the presenter wrote into an axum response, attaching the session
    /// cookie when the session was persisted during the request.
    pub fn into_http(
        self,
        session: &SessionHandle,
        config: &SessionConfig,
    ) -> HttpResult<Response> {
        let presented = self
            .take()
            .ok_or_else(|| HttpError::internal("no response was presented"))?;

        let mut response = (presented.status, Json(presented.body)).into_response();
        if session.was_saved() {
            let cookie = session.cookie(config).map_err(HttpError::from_error)?;
            response.headers_mut().insert(SET_COOKIE, cookie);
        }
        Ok(response)
    }
}

impl std::fmt::Debug for ResponseHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResponseHandle")
            .field("sent", &self.is_sent())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn second_send_is_rejected() {
        let response = ResponseHandle::new();
        response.send(StatusCode::OK, &json!({"a": 1})).unwrap();
        assert!(response.send(StatusCode::OK, &json!({"a": 2})).is_err());
        assert_eq!(response.peek().unwrap().body, json!({"a": 1}));
    }

    #[test]
    fn clones_share_the_slot() {
        let response = ResponseHandle::new();
        let presenter_side = response.clone();
        presenter_side
            .send(StatusCode::UNAUTHORIZED, &json!({"status": "error"}))
            .unwrap();
        assert_eq!(response.take().unwrap().status, StatusCode::UNAUTHORIZED);
        assert!(!response.is_sent());
    }
}
