// ABOUTME: Module registry mapping module names to staged unit content.
// ABOUTME: Ordered, duplicate-rejecting, read-only after routing.

use super::DeployError;
use crate::types::ModuleName;
use std::path::{Path, PathBuf};

/// Mapping from module name to the staged content it deploys.
///
/// Built once per rearrangement pass in unit enumeration order and read-only
/// afterward. The registry is a value owned by the deploy call graph, so
/// independent deploy sequences never share routing state.
#[derive(Debug, Default)]
pub struct ModuleRegistry {
    entries: Vec<(ModuleName, PathBuf)>,
}

impl ModuleRegistry {
    /// Build a registry from units in enumeration order. A unit without a
    /// module name registers under the implicit default name.
    pub fn route(
        units: impl IntoIterator<Item = (Option<ModuleName>, PathBuf)>,
    ) -> Result<Self, DeployError> {
        let mut registry = Self::default();
        for (name, source) in units {
            let name = name.unwrap_or_else(ModuleName::default_module);
            registry.insert(name, source)?;
        }
        Ok(registry)
    }

    pub fn insert(&mut self, name: ModuleName, source: PathBuf) -> Result<(), DeployError> {
        if self.entries.iter().any(|(existing, _)| *existing == name) {
            return Err(DeployError::DuplicateModule {
                name: name.to_string(),
                existing: self.describe(),
            });
        }
        self.entries.push((name, source));
        Ok(())
    }

    pub fn get(&self, name: &ModuleName) -> Option<&Path> {
        self.entries
            .iter()
            .find(|(existing, _)| existing == name)
            .map(|(_, source)| source.as_path())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Registered module names, in insertion order.
    pub fn names(&self) -> Vec<String> {
        self.entries
            .iter()
            .map(|(name, _)| name.to_string())
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&ModuleName, &Path)> {
        self.entries
            .iter()
            .map(|(name, source)| (name, source.as_path()))
    }

    fn describe(&self) -> String {
        self.entries
            .iter()
            .map(|(name, source)| format!("{}={}", name, source.display()))
            .collect::<Vec<_>>()
            .join(", ")
    }
}
