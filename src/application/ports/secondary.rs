// src/application/ports/secondary.rs
use crate::application::{
    ApplicationResult,
    dto::{AuthToken, OidcProviderDto, UserPassCredentials, VoDto},
};
use async_trait::async_trait;

#[async_trait]
pub trait AuthServerGatewayOutputPort: Send + Sync {
    /// Exchange username/password for a token.
    ///
    /// Rejected credentials surface as `ApplicationError::Unauthorized`; transport or
    /// protocol failures as `ApplicationError::Infrastructure`.
    async fn userpass_login(
        &self,
        credentials: &UserPassCredentials,
    ) -> ApplicationResult<AuthToken>;
}

/// Deployment settings the login page depends on.
#[async_trait]
pub trait EnvConfigGatewayOutputPort: Send + Sync {
    async fn rucio_host(&self) -> ApplicationResult<String>;
    async fn rucio_auth_host(&self) -> ApplicationResult<String>;
    async fn userpass_enabled(&self) -> ApplicationResult<bool>;
    async fn x509_enabled(&self) -> ApplicationResult<bool>;
    async fn oidc_enabled(&self) -> ApplicationResult<bool>;
    async fn oidc_providers(&self) -> ApplicationResult<Vec<OidcProviderDto>>;
    async fn multivo_enabled(&self) -> ApplicationResult<bool>;
    async fn vo_list(&self) -> ApplicationResult<Vec<VoDto>>;
}
