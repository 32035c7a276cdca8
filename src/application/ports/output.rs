// src/application/ports/output.rs
//! Presenter ports. A use case reports its outcome through these instead of
//! returning it, so the delivery channel decides how success and failure look.
use crate::application::{
    ApplicationResult,
    dto::{LoginConfigError, LoginConfigResponse, UserPassLoginError, UserPassLoginResponse},
};
use async_trait::async_trait;

#[async_trait]
pub trait UserPassLoginOutputPort: Send + Sync {
    async fn present_success(&self, response: UserPassLoginResponse) -> ApplicationResult<()>;
    async fn present_error(&self, error: UserPassLoginError) -> ApplicationResult<()>;
}

#[async_trait]
pub trait LoginConfigOutputPort: Send + Sync {
    async fn present_success(&self, response: LoginConfigResponse) -> ApplicationResult<()>;
    async fn present_error(&self, error: LoginConfigError) -> ApplicationResult<()>;
}
