// ABOUTME: Exploded package model used for deploys.
// ABOUTME: Packages are directory trees; entries are addressed by logical path.

mod descriptor;
mod staging;

pub use descriptor::{
    APPENGINE_APPLICATION_XML, APPENGINE_WEB_XML, APPLICATION_XML, CompositeDescriptor,
    CompositeModule, DEFAULT_LIB_DIR, DescriptorError, TOKEN_APPLICATION, TOKEN_MODULE,
    parse_composite, parse_tokens,
};
pub use staging::StagingArea;

use crate::error::{Error, Result};
use std::path::{Path, PathBuf};

/// A packaged application on disk, either a single deployable unit or a
/// composite bundling several units plus shared libraries.
///
/// Archive extraction is not this crate's concern: callers hand over an
/// already-exploded directory tree.
#[derive(Debug, Clone)]
pub struct Package {
    root: PathBuf,
}

impl Package {
    /// Open a package rooted at the given directory.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let root = path.as_ref().to_path_buf();
        if !root.is_dir() {
            return Err(Error::PackageNotFound(root));
        }
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// The package's display name (the root directory name).
    pub fn name(&self) -> String {
        self.root
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.root.display().to_string())
    }

    /// Read the entry at a logical path, or `None` if it is absent.
    pub fn read_entry(&self, logical_path: &str) -> Result<Option<String>> {
        let path = self.root.join(logical_path);
        if !path.is_file() {
            return Ok(None);
        }
        Ok(Some(std::fs::read_to_string(path)?))
    }

    /// Whether an entry exists at the logical path.
    pub fn has_entry(&self, logical_path: &str) -> bool {
        self.root.join(logical_path).is_file()
    }

    /// Collect files under a logical directory with the given extension,
    /// in name order. An absent directory yields an empty list.
    pub fn entries_with_extension(&self, dir: &str, extension: &str) -> Result<Vec<PathBuf>> {
        let dir_path = self.root.join(dir);
        if !dir_path.is_dir() {
            return Ok(Vec::new());
        }

        let mut entries = Vec::new();
        for entry in std::fs::read_dir(dir_path)? {
            let path = entry?.path();
            if path.is_file() && path.extension().and_then(|e| e.to_str()) == Some(extension) {
                entries.push(path);
            }
        }
        entries.sort();
        Ok(entries)
    }
}
