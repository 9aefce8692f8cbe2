//! Filesystem-based resource provider.
//!
//! Paths are resolved relative to a base directory and may not escape it.

use quire_traits::{ResourceError, ResourceProvider, SharedResourceData};
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;

/// Loads resources from a directory, typically the one holding the source document.
#[derive(Debug)]
pub struct FilesystemResourceProvider {
    base_path: PathBuf,
    /// Canonicalized base path for containment checks
    canonical_base: Option<PathBuf>,
}

impl FilesystemResourceProvider {
    pub fn new<P: AsRef<Path>>(base_path: P) -> Self {
        let base = base_path.as_ref().to_path_buf();
        let canonical = base.canonicalize().ok();
        Self {
            base_path: base,
            canonical_base: canonical,
        }
    }

    pub fn base(&self) -> &Path {
        &self.base_path
    }

    /// Returns `None` when `path` is absolute or would leave the base directory.
    fn resolve_path_safe(&self, path: &str) -> Option<PathBuf> {
        let relative = Path::new(path);
        if relative.is_absolute() {
            return None;
        }
        if relative.components().any(|c| matches!(c, Component::ParentDir)) {
            return None;
        }

        let full_path = self.base_path.join(relative);
        match (full_path.canonicalize(), &self.canonical_base) {
            (Ok(canonical), Some(base)) if canonical.starts_with(base) => Some(canonical),
            // Symlink pointing outside the base.
            (Ok(_), Some(_)) => None,
            _ => Some(full_path),
        }
    }
}

impl ResourceProvider for FilesystemResourceProvider {
    fn load(&self, path: &str) -> Result<SharedResourceData, ResourceError> {
        let full_path = self
            .resolve_path_safe(path)
            .ok_or_else(|| ResourceError::NotFound(format!("{} (outside resource directory)", path)))?;

        std::fs::read(&full_path).map(Arc::new).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                ResourceError::NotFound(path.to_string())
            } else {
                ResourceError::LoadFailed {
                    path: path.to_string(),
                    message: e.to_string(),
                }
            }
        })
    }

    fn exists(&self, path: &str) -> bool {
        self.resolve_path_safe(path)
            .map(|p| p.exists())
            .unwrap_or(false)
    }

    fn base_path(&self) -> Option<&str> {
        self.base_path.to_str()
    }

    fn name(&self) -> &'static str {
        "FilesystemResourceProvider"
    }
}
