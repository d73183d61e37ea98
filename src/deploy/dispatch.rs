// ABOUTME: Resolves where each unit deploys and drives the deploy flow.
// ABOUTME: Explicit configuration beats descriptor-embedded identity.

use super::orchestrator::run_upload;
use super::rearrange::rearrange;
use super::registry::ModuleRegistry;
use super::DeployError;
use crate::config::{Credentials, DeployConfig};
use crate::output::Output;
use crate::package::{
    APPENGINE_APPLICATION_XML, APPENGINE_WEB_XML, APPLICATION_XML, Package, StagingArea,
    TOKEN_APPLICATION, parse_tokens,
};
use crate::platform::{DeployTarget, Endpoint, UpdateCheck, Uploader};
use crate::types::{AppId, DEFAULT_MODULE, ModuleName};
use std::path::PathBuf;
use std::sync::Arc;

/// Where a unit deploys: the application id plus an optional module name.
/// Explicit caller-supplied values win over descriptor-embedded ones.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApplicationIdentity {
    pub app_id: AppId,
    pub module: Option<ModuleName>,
}

/// One unit ready to upload.
#[derive(Debug, Clone)]
pub struct DeployRequest {
    pub identity: ApplicationIdentity,
    /// Staged content of the unit.
    pub unit: PathBuf,
    pub credentials: Credentials,
}

/// Plan the deploy requests for a routed registry.
///
/// A selected module resolves through the registry and fails if unknown.
/// Without a selection, a sole unit deploys directly; multiple units all
/// deploy, each under its own module name, with the id override applied
/// uniformly.
pub fn plan(
    app_id: AppId,
    selected: Option<&ModuleName>,
    registry: &ModuleRegistry,
    credentials: Credentials,
) -> Result<Vec<DeployRequest>, DeployError> {
    if let Some(name) = selected {
        let source = registry.get(name).ok_or_else(|| DeployError::UnknownModule {
            name: name.to_string(),
            known: registry.names(),
        })?;
        return Ok(vec![DeployRequest {
            identity: ApplicationIdentity {
                app_id,
                module: Some(name.clone()),
            },
            unit: source.to_path_buf(),
            credentials,
        }]);
    }

    if registry.len() == 1 {
        if let Some((name, source)) = registry.iter().next() {
            // The sole unit deploys directly whatever it is named; the
            // implicit default carries no module in its identity.
            let module = (name.as_str() != DEFAULT_MODULE).then(|| name.clone());
            return Ok(vec![DeployRequest {
                identity: ApplicationIdentity { app_id, module },
                unit: source.to_path_buf(),
                credentials,
            }]);
        }
    }

    Ok(registry
        .iter()
        .map(|(name, source)| DeployRequest {
            identity: ApplicationIdentity {
                app_id: app_id.clone(),
                module: Some(name.clone()),
            },
            unit: source.to_path_buf(),
            credentials: credentials.clone(),
        })
        .collect())
}

/// Deploys packages through an injected upload capability.
pub struct Deployer {
    config: DeployConfig,
    uploader: Arc<dyn Uploader>,
    update_check: Option<Arc<dyn UpdateCheck>>,
    output: Output,
}

impl Deployer {
    /// Create a deployer, validating the configuration up front.
    pub fn new(
        config: DeployConfig,
        uploader: Arc<dyn Uploader>,
        output: Output,
    ) -> Result<Self, DeployError> {
        config.validate()?;
        Ok(Self {
            config,
            uploader,
            update_check: None,
            output,
        })
    }

    /// Attach an optional version/nag check, queried before deploying when
    /// the configuration enables it.
    pub fn with_update_check(mut self, check: Arc<dyn UpdateCheck>) -> Self {
        self.update_check = Some(check);
        self
    }

    /// Deploy a package: rearrange, route, and upload every selected unit,
    /// returning where the application is reachable.
    pub async fn deploy(&self, package: &Package) -> Result<Endpoint, DeployError> {
        if self.config.update_check
            && let Some(check) = &self.update_check
            && let Some(message) = check.nag_message().await
        {
            self.output.warning(&message);
        }

        // Credentials resolve before any upload is attempted.
        let credentials = Credentials::resolve(&self.config)?;

        let staging = StagingArea::new()?;
        let registry = rearrange(package, &staging)?;

        let app_id = self.resolve_app_id(package)?;
        let requests = plan(
            app_id.clone(),
            self.config.module.as_ref(),
            &registry,
            credentials,
        )?;

        for request in requests {
            tracing::info!(
                app_id = %request.identity.app_id,
                module = ?request.identity.module.as_ref().map(ModuleName::as_str),
                unit = %request.unit.display(),
                "deploying unit"
            );
            run_upload(
                request,
                self.uploader.clone(),
                self.output.clone(),
                self.config.startup_timeout,
            )
            .await?;
        }

        let host = format!("{}.{}", app_id, self.config.effective_server());
        let target = match &self.config.module {
            Some(module) => DeployTarget::Module(module.clone()),
            None => DeployTarget::Archive(package.name()),
        };
        Ok(Endpoint::new(host, self.config.port, target))
    }

    /// Resolve the application id: explicit configuration wins, then the
    /// value embedded in the package's descriptor; with neither, fail.
    fn resolve_app_id(&self, package: &Package) -> Result<AppId, DeployError> {
        if let Some(app_id) = &self.config.app_id {
            return Ok(app_id.clone());
        }

        let path = if package.has_entry(APPLICATION_XML) {
            APPENGINE_APPLICATION_XML
        } else {
            APPENGINE_WEB_XML
        };

        let xml = package
            .read_entry(path)
            .map_err(|e| DeployError::Configuration(e.to_string()))?
            .ok_or_else(|| {
                DeployError::Configuration(format!(
                    "no application id configured and the package has no {path}"
                ))
            })?;

        let tokens =
            parse_tokens(&xml, &[TOKEN_APPLICATION]).map_err(|e| DeployError::MalformedDescriptor {
                path: path.to_string(),
                reason: e.to_string(),
            })?;

        let value = tokens.get(TOKEN_APPLICATION).ok_or_else(|| {
            DeployError::Configuration(format!(
                "no application id configured and {path} does not declare one"
            ))
        })?;

        AppId::new(value).map_err(|e| {
            DeployError::Configuration(format!("invalid application id in {path}: {e}"))
        })
    }
}
