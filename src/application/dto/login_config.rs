use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OidcProviderDto {
    pub name: String,
    pub client_id: String,
    pub authorization_url: String,
    pub token_url: String,
    pub redirect_url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VoDto {
    pub short_name: String,
    pub name: String,
    pub oidc_enabled: bool,
    #[serde(default)]
    pub oidc_provider_names: Vec<String>,
}

impl VoDto {
    /// The implicit VO of a single-VO deployment.
    pub fn default_vo() -> Self {
        Self {
            short_name: super::DEFAULT_VO.into(),
            name: "default".into(),
            oidc_enabled: false,
            oidc_provider_names: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginConfigResponse {
    pub userpass_enabled: bool,
    pub x509_enabled: bool,
    pub oidc_enabled: bool,
    pub oidc_providers: Vec<OidcProviderDto>,
    pub multivo_enabled: bool,
    pub vo_list: Vec<VoDto>,
    pub rucio_auth_host: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginConfigError {
    pub message: String,
}
