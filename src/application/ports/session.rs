// src/application/ports/session.rs
use crate::application::{ApplicationResult, dto::SessionData};
use async_trait::async_trait;

#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn load(&self, session_id: &str) -> ApplicationResult<Option<SessionData>>;
    async fn save(&self, session_id: &str, data: SessionData) -> ApplicationResult<()>;
    async fn destroy(&self, session_id: &str) -> ApplicationResult<()>;
}
