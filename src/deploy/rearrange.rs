// ABOUTME: Rearranges a composite package into independently deployable units.
// ABOUTME: Merges shared libraries into each unit and routes them by module name.

use super::registry::ModuleRegistry;
use super::DeployError;
use crate::package::{
    APPENGINE_WEB_XML, APPLICATION_XML, DEFAULT_LIB_DIR, Package, StagingArea, TOKEN_MODULE,
    parse_composite, parse_tokens,
};
use crate::types::ModuleName;

/// Turn a package into a registry of self-contained deployable units.
///
/// A package without a composite descriptor is already a single deployable
/// unit and registers as the implicit default module. A composite package
/// has each declared web module staged as a private copy with the shared
/// libraries merged in, keyed by its original relative path. Descriptors are
/// read and routed before any unit is copied, so routing failures (duplicate
/// module names included) abort with zero units staged; the staging root
/// itself is cleaned up when the caller drops it.
pub fn rearrange(package: &Package, staging: &StagingArea) -> Result<ModuleRegistry, DeployError> {
    let Some(composite_xml) = package
        .read_entry(APPLICATION_XML)
        .map_err(|e| DeployError::Configuration(e.to_string()))?
    else {
        // No sub-modules: the package itself is the sole unit.
        let mut registry = ModuleRegistry::default();
        registry.insert(ModuleName::default_module(), package.root().to_path_buf())?;
        return Ok(registry);
    };

    let descriptor =
        parse_composite(&composite_xml).map_err(|e| DeployError::MalformedDescriptor {
            path: APPLICATION_XML.to_string(),
            reason: e.to_string(),
        })?;

    // The descriptor's declared library area wins; "lib" is only the
    // fallback for descriptors that declare none.
    let lib_dir = descriptor
        .library_directory
        .as_deref()
        .unwrap_or(DEFAULT_LIB_DIR);
    let libraries = package
        .entries_with_extension(lib_dir, "jar")
        .map_err(|e| DeployError::Configuration(e.to_string()))?;
    tracing::debug!(
        lib_dir,
        count = libraries.len(),
        "collected shared libraries"
    );

    let mut planned = Vec::new();
    for module in &descriptor.modules {
        // Modules without a web URI carry no deployable content and are
        // dropped from registration.
        let Some(uri) = module.web_uri.as_deref() else {
            continue;
        };

        let unit_root = package.root().join(uri);
        if !unit_root.is_dir() {
            return Err(DeployError::Configuration(format!(
                "web module {uri} is declared but not present in the package"
            )));
        }

        let unit = Package::open(&unit_root)
            .map_err(|e| DeployError::Configuration(e.to_string()))?;
        let descriptor_xml = unit
            .read_entry(APPENGINE_WEB_XML)
            .map_err(|e| DeployError::Configuration(e.to_string()))?
            .ok_or_else(|| DeployError::MissingUnitDescriptor {
                descriptor: APPENGINE_WEB_XML.to_string(),
                unit: uri.to_string(),
            })?;

        let tokens = parse_tokens(&descriptor_xml, &[TOKEN_MODULE]).map_err(|e| {
            DeployError::MalformedDescriptor {
                path: format!("{uri}/{APPENGINE_WEB_XML}"),
                reason: e.to_string(),
            }
        })?;

        let name = tokens
            .get(TOKEN_MODULE)
            .map(|value| {
                ModuleName::new(value).map_err(|e| {
                    DeployError::Configuration(format!("invalid module name in {uri}: {e}"))
                })
            })
            .transpose()?;

        planned.push((name, uri.to_string(), unit));
    }

    // Route by name before anything is copied, so a duplicate aborts with
    // zero units staged.
    ModuleRegistry::route(
        planned
            .iter()
            .map(|(name, _, unit)| (name.clone(), unit.root().to_path_buf())),
    )?;

    let mut routed = Vec::new();
    for (name, uri, unit) in planned {
        let staged = staging.stage_unit(unit.root(), &uri, &libraries)?;
        tracing::debug!(%uri, module = ?name, "staged unit");
        routed.push((name, staged));
    }

    ModuleRegistry::route(routed)
}
