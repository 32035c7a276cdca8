// src/presentation/http/presenters/mod.rs
mod login_config;
mod userpass_login;

pub use login_config::{LoginConfigPresenter, LoginConfigViewModel};
pub use userpass_login::{UserPassLoginPresenter, UserPassLoginViewModel};

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Body of every failed use-case response.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ErrorViewModel {
    pub status: String,
    pub message: String,
}

impl ErrorViewModel {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            status: "error".into(),
            message: message.into(),
        }
    }
}
