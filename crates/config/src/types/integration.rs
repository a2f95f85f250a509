//! `integration` section: how Headplane reloads Headscale after config edits.

use serde::{Deserialize, Serialize};

/// Optional integrations; any combination may be configured.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IntegrationConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub docker: Option<DockerIntegration>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kubernetes: Option<KubernetesIntegration>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub proc: Option<ProcIntegration>,
}

impl IntegrationConfig {
    /// Names of the integrations whose `enabled` flag is set.
    pub fn enabled(&self) -> Vec<&'static str> {
        let mut names = Vec::new();
        if self.docker.as_ref().is_some_and(|d| d.enabled) {
            names.push("docker");
        }
        if self.kubernetes.as_ref().is_some_and(|k| k.enabled) {
            names.push("kubernetes");
        }
        if self.proc.as_ref().is_some_and(|p| p.enabled) {
            names.push("proc");
        }
        names
    }
}

/// Signal Headscale through the Docker daemon.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DockerIntegration {
    pub enabled: bool,
    pub container_name: String,
    /// Docker daemon socket, e.g. `unix:///var/run/docker.sock`.
    pub socket: String,
    /// Label used to discover the Headscale container instead of its name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub container_label: Option<String>,
}

/// Restart Headscale through the Kubernetes API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KubernetesIntegration {
    pub enabled: bool,
    pub pod_name: String,
    pub validate_manifest: bool,
}

/// Signal a Headscale process running on the same host.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcIntegration {
    pub enabled: bool,
}
