pub mod auth;
pub mod login_config;
pub mod session;

pub use auth::{
    AuthToken, DEFAULT_REDIRECT, DEFAULT_VO, UserPassCredentials, UserPassLoginError,
    UserPassLoginErrorKind, UserPassLoginRequest, UserPassLoginResponse,
};
pub use login_config::{LoginConfigError, LoginConfigResponse, OidcProviderDto, VoDto};
pub use session::{AuthType, SessionData, SessionUser};
