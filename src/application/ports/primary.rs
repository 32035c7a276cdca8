// src/application/ports/primary.rs
//! Input ports, implemented by the use cases and driven by controllers.
use crate::application::{ApplicationResult, dto::UserPassLoginRequest};
use async_trait::async_trait;

#[async_trait]
pub trait UserPassLoginInputPort: Send + Sync {
    async fn execute(&self, request: UserPassLoginRequest) -> ApplicationResult<()>;
}

#[async_trait]
pub trait LoginConfigInputPort: Send + Sync {
    async fn execute(&self) -> ApplicationResult<()>;
}
