//! Per-section field declarations.
//!
//! One function per section, shared by both schema modes. The `Presence`
//! given for each field only matters in full mode.

use super::Mode;
use super::coerce;
use super::section::{Presence, Section, UnknownKeys};
use crate::constants::{
    COOKIE_SECRET_LENGTH, DEFAULT_AGENT_CACHE_PATH, DEFAULT_AGENT_TTL_MS, DEFAULT_DOCKER_SOCKET,
    DEFAULT_OIDC_STRICT_VALIDATION, DEFAULT_USER_STORAGE_FILE,
};
use crate::types::TokenEndpointAuthMethod;

/// The document root. Unknown top-level keys are dropped.
pub(crate) fn root(doc: &mut Section<'_>) {
    match doc.mode() {
        // The loader injects the caller's value; a bare document means `false`.
        Mode::Full => doc.boolean("debug", Presence::default_bool(false)),
        Mode::Partial => {
            if doc.take("debug").is_some() {
                tracing::warn!("Ignoring override for `debug`; it follows the logging debug state");
            }
        }
    }
    doc.section("server", Presence::Required, UnknownKeys::Drop, server);
    doc.section("oidc", Presence::Optional, UnknownKeys::Reject, oidc);
    doc.section("headscale", Presence::Required, UnknownKeys::Reject, headscale);
    doc.section(
        "integration",
        Presence::Optional,
        UnknownKeys::Drop,
        integration,
    );
}

fn server(server: &mut Section<'_>) {
    server.string_with("host", Presence::Required, coerce::ip_address);
    server.integer("port", Presence::Required, u64::from(u16::MAX));
    server.string_with("cookie_secret", Presence::Optional, |s| {
        coerce::exact_length(s, COOKIE_SECRET_LENGTH)
    });
    server.string("cookie_secret_path", Presence::Optional);
    server.boolean("cookie_secure", Presence::Required);
    server.section(
        "agent",
        Presence::default_section(),
        UnknownKeys::Reject,
        agent,
    );
}

fn agent(agent: &mut Section<'_>) {
    agent.string("authkey", Presence::default_str(""));
    agent.integer("ttl", Presence::default_u64(DEFAULT_AGENT_TTL_MS), u64::MAX);
    agent.string("cache_path", Presence::default_str(DEFAULT_AGENT_CACHE_PATH));
}

fn oidc(oidc: &mut Section<'_>) {
    oidc.string_with("issuer", Presence::Required, coerce::url);
    oidc.string("client_id", Presence::Required);
    oidc.string("client_secret", Presence::Optional);
    oidc.string("client_secret_path", Presence::Optional);
    oidc.string_with(
        "token_endpoint_auth_method",
        Presence::Required,
        token_endpoint_auth_method,
    );
    oidc.string_with("redirect_uri", Presence::Optional, coerce::url);
    oidc.string(
        "user_storage_file",
        Presence::default_str(DEFAULT_USER_STORAGE_FILE),
    );
    oidc.boolean("disable_api_key_login", Presence::Required);
    oidc.string("headscale_api_key", Presence::Optional);
    oidc.string("headscale_api_key_path", Presence::Optional);
    oidc.boolean(
        "strict_validation",
        Presence::default_bool(DEFAULT_OIDC_STRICT_VALIDATION),
    );
}

fn token_endpoint_auth_method(raw: String) -> Result<String, String> {
    match TokenEndpointAuthMethod::parse(&raw) {
        Some(method) => Ok(method.as_str().to_string()),
        None => {
            let allowed: Vec<&str> = TokenEndpointAuthMethod::ALL
                .iter()
                .map(|m| m.as_str())
                .collect();
            Err(format!("must be one of {}, got {raw:?}", allowed.join(", ")))
        }
    }
}

fn headscale(headscale: &mut Section<'_>) {
    headscale.string_with("url", Presence::Required, |s| {
        coerce::url(s).map(|url| coerce::strip_trailing_slash(&url))
    });
    headscale.string("tls_cert_path", Presence::Optional);
    headscale.string_with("public_url", Presence::Optional, coerce::url);
    headscale.string("config_path", Presence::Optional);
    headscale.boolean("config_strict", Presence::Required);
}

fn integration(integration: &mut Section<'_>) {
    integration.section("docker", Presence::Optional, UnknownKeys::Reject, docker);
    integration.section(
        "kubernetes",
        Presence::Optional,
        UnknownKeys::Reject,
        kubernetes,
    );
    integration.section("proc", Presence::Optional, UnknownKeys::Reject, proc);
}

fn docker(docker: &mut Section<'_>) {
    docker.boolean("enabled", Presence::Required);
    docker.string("container_name", Presence::Required);
    docker.string("socket", Presence::default_str(DEFAULT_DOCKER_SOCKET));
    docker.string("container_label", Presence::Optional);
}

fn kubernetes(kubernetes: &mut Section<'_>) {
    kubernetes.boolean("enabled", Presence::Required);
    kubernetes.string("pod_name", Presence::Required);
    kubernetes.boolean("validate_manifest", Presence::Required);
}

fn proc(proc: &mut Section<'_>) {
    proc.boolean("enabled", Presence::Required);
}
