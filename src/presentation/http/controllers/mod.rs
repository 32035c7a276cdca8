// src/presentation/http/controllers/mod.rs
pub mod login_config;
pub mod userpass_login;

pub use login_config::{LoginConfigController, LoginConfigControllerPort, LoginConfigParams};
pub use userpass_login::{
    UserPassLoginBody, UserPassLoginController, UserPassLoginControllerPort, UserPassLoginParams,
};
