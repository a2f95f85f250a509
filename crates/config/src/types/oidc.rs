//! `oidc` section: identity provider settings.

use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::secret::option_secret_string;

/// How the client authenticates against the provider's token endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenEndpointAuthMethod {
    ClientSecretPost,
    ClientSecretBasic,
    ClientSecretJwt,
}

impl TokenEndpointAuthMethod {
    /// Every accepted value, in the spelling used by the config file.
    pub const ALL: [TokenEndpointAuthMethod; 3] = [
        TokenEndpointAuthMethod::ClientSecretPost,
        TokenEndpointAuthMethod::ClientSecretBasic,
        TokenEndpointAuthMethod::ClientSecretJwt,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            TokenEndpointAuthMethod::ClientSecretPost => "client_secret_post",
            TokenEndpointAuthMethod::ClientSecretBasic => "client_secret_basic",
            TokenEndpointAuthMethod::ClientSecretJwt => "client_secret_jwt",
        }
    }

    /// Parse the config-file spelling.
    pub fn parse(raw: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|method| method.as_str() == raw)
    }
}

impl fmt::Display for TokenEndpointAuthMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// OpenID Connect login settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OidcConfig {
    pub issuer: String,
    pub client_id: String,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "option_secret_string"
    )]
    pub client_secret: Option<SecretString>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_secret_path: Option<String>,
    pub token_endpoint_auth_method: TokenEndpointAuthMethod,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub redirect_uri: Option<String>,
    /// Where OIDC user records are persisted.
    pub user_storage_file: String,
    /// Hide the API-key login form when OIDC is configured.
    pub disable_api_key_login: bool,
    /// Headscale API key used for OIDC-authenticated sessions.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "option_secret_string"
    )]
    pub headscale_api_key: Option<SecretString>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub headscale_api_key_path: Option<String>,
    pub strict_validation: bool,
}
