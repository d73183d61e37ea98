// ABOUTME: Staging area for rearranged deployable units.
// ABOUTME: Materializes merged unit copies under an ephemeral root.

use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};
use tempfile::TempDir;

/// Directory inside a unit that shared libraries are merged into.
const UNIT_LIB_DIR: &str = "WEB-INF/lib";

/// An ephemeral staging root for rearranged units.
///
/// The backing directory is removed when the area is dropped, so staged
/// content lives exactly as long as the enclosing deploy call.
#[derive(Debug)]
pub struct StagingArea {
    dir: TempDir,
}

impl StagingArea {
    pub fn new() -> io::Result<Self> {
        Ok(Self {
            dir: TempDir::with_prefix("skylift-staging-")?,
        })
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    /// Stage a self-contained copy of a unit under the staging root, keyed
    /// by its original relative path, with the shared libraries merged into
    /// the unit's own library directory.
    pub fn stage_unit(
        &self,
        source: &Path,
        relative_path: &str,
        libraries: &[PathBuf],
    ) -> io::Result<PathBuf> {
        let relative = Path::new(relative_path);
        // The key comes from descriptor content; only plain relative
        // components may land under the staging root.
        if relative
            .components()
            .any(|c| !matches!(c, Component::Normal(_)))
        {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("unit path escapes the staging root: {relative_path}"),
            ));
        }

        let dest = self.dir.path().join(relative);
        copy_tree(source, &dest)?;

        if !libraries.is_empty() {
            let lib_dest = dest.join(UNIT_LIB_DIR);
            fs::create_dir_all(&lib_dest)?;
            for library in libraries {
                let name = library.file_name().ok_or_else(|| {
                    io::Error::new(
                        io::ErrorKind::InvalidInput,
                        format!("library has no file name: {}", library.display()),
                    )
                })?;
                fs::copy(library, lib_dest.join(name))?;
            }
        }

        Ok(dest)
    }
}

fn copy_tree(src: &Path, dst: &Path) -> io::Result<()> {
    fs::create_dir_all(dst)?;
    for entry in fs::read_dir(src)? {
        let entry = entry?;
        let target = dst.join(entry.file_name());
        if entry.file_type()?.is_dir() {
            copy_tree(&entry.path(), &target)?;
        } else {
            fs::copy(entry.path(), target)?;
        }
    }
    Ok(())
}
