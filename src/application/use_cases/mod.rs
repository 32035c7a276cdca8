// src/application/use_cases/mod.rs
mod login_config;
mod userpass_login;

pub use login_config::LoginConfigUseCase;
pub use userpass_login::{UserPassLoginUseCase, sanitize_redirect};
