//! Staging directory for package assembly
//!
//! A [`Staging`] directory mirrors the archive layout on disk. It is created
//! fresh for every generation run and removed when dropped, on every exit
//! path. Removal failures are logged, never returned.

use crate::error::{InputError, Result};
use std::fs;
use std::path::{Component, Path, PathBuf};
use tempfile::TempDir;

const STAGING_PREFIX: &str = "quire-";

/// Normalize a caller-supplied in-package path, rejecting any that escape
/// the package root
pub fn normalize_package_path(path: &str) -> std::result::Result<PathBuf, InputError> {
    if path.trim().is_empty() {
        return Err(InputError::EmptyPath);
    }

    let mut normalized = PathBuf::new();
    for component in Path::new(path).components() {
        match component {
            Component::Normal(c) => normalized.push(c),
            Component::CurDir => {} // Ignore "."
            Component::ParentDir | Component::Prefix(_) | Component::RootDir => {
                return Err(InputError::PathEscapesPackage(path.to_string()));
            }
        }
    }

    if normalized.as_os_str().is_empty() {
        return Err(InputError::EmptyPath);
    }
    Ok(normalized)
}

/// A randomly named temporary directory owned by one generation run
#[derive(Debug)]
pub struct Staging {
    path: PathBuf,
    dir: Option<TempDir>,
}

impl Staging {
    /// Create a new staging directory under `root`, or the system temp
    /// directory when `root` is `None`
    pub fn create(root: Option<&Path>) -> Result<Self> {
        let mut builder = tempfile::Builder::new();
        builder.prefix(STAGING_PREFIX);
        let dir = match root {
            Some(root) => {
                fs::create_dir_all(root)?;
                builder.tempdir_in(root)?
            }
            None => builder.tempdir()?,
        };

        tracing::debug!("Created staging directory {}", dir.path().display());
        Ok(Self {
            path: dir.path().to_path_buf(),
            dir: Some(dir),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write `data` at `relative` (already normalized), creating parent
    /// directories as needed
    pub fn write(&self, relative: &Path, data: &[u8]) -> Result<PathBuf> {
        let full_path = self.path.join(relative);
        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&full_path, data)?;
        tracing::debug!("Staged {} ({} bytes)", relative.display(), data.len());
        Ok(full_path)
    }
}

impl Drop for Staging {
    fn drop(&mut self) {
        if let Some(dir) = self.dir.take() {
            if let Err(e) = dir.close() {
                tracing::warn!(
                    "Failed to remove staging directory {}: {}",
                    self.path.display(),
                    e
                );
            }
        }
    }
}
