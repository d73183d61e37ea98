// ABOUTME: Connectivity descriptor returned after a successful deploy.
// ABOUTME: Host, port, and either the archive name or a targeted module.

use crate::types::ModuleName;

/// What the endpoint points at: the whole deployed archive, or the single
/// module that was targeted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeployTarget {
    Archive(String),
    Module(ModuleName),
}

/// Where the deployed application is reachable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    /// `<app-id>.<server>`.
    pub host: String,
    pub port: u16,
    pub target: DeployTarget,
}

impl Endpoint {
    pub fn new(host: impl Into<String>, port: u16, target: DeployTarget) -> Self {
        Self {
            host: host.into(),
            port,
            target,
        }
    }
}
