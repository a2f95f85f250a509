//! `headscale` section: how to reach the control plane.

use serde::{Deserialize, Serialize};

/// Connection settings for the Headscale control-plane server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HeadscaleConfig {
    /// Base URL of the Headscale API, without a trailing slash.
    pub url: String,
    /// CA or self-signed certificate to trust when talking to `url`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tls_cert_path: Option<String>,
    /// URL users see, when it differs from `url`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub public_url: Option<String>,
    /// Path to Headscale's own `config.yaml`, enabling config editing.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config_path: Option<String>,
    /// Refuse to start when Headscale's config file fails validation.
    pub config_strict: bool,
}
