//! Byte-level resource loading, decoupled from any particular storage.

use std::fmt::Debug;
use std::sync::Arc;
use thiserror::Error;

#[derive(Error, Debug, Clone)]
pub enum ResourceError {
    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Failed to load resource '{path}': {message}")]
    LoadFailed { path: String, message: String },

    #[error("Invalid resource format: {0}")]
    InvalidFormat(String),

    #[error("I/O error: {0}")]
    Io(String),
}

impl From<std::io::Error> for ResourceError {
    fn from(err: std::io::Error) -> Self {
        ResourceError::Io(err.to_string())
    }
}

pub type SharedResourceData = Arc<Vec<u8>>;

/// Loads embedded resources (images) by the path written in the document.
pub trait ResourceProvider: Send + Sync + Debug {
    fn load(&self, path: &str) -> Result<SharedResourceData, ResourceError>;

    fn exists(&self, path: &str) -> bool;

    /// Base directory relative paths are resolved against, if any.
    fn base_path(&self) -> Option<&str> {
        None
    }

    fn name(&self) -> &'static str;
}

#[cfg(any(test, feature = "testing"))]
pub use in_memory::InMemoryResourceProvider;

#[cfg(any(test, feature = "testing"))]
mod in_memory {
    use super::{ResourceError, ResourceProvider, SharedResourceData};
    use std::collections::HashMap;
    use std::sync::{Arc, RwLock};

    /// Provider backed by a pre-populated map, for tests that should not touch
    /// the filesystem.
    #[derive(Debug, Default)]
    pub struct InMemoryResourceProvider {
        resources: RwLock<HashMap<String, SharedResourceData>>,
    }

    impl InMemoryResourceProvider {
        pub fn new() -> Self {
            Self::default()
        }

        /// Stores `data` under `path`, replacing any previous entry.
        pub fn add(&self, path: impl Into<String>, data: Vec<u8>) -> Result<(), ResourceError> {
            let path = path.into();
            let mut resources = self
                .resources
                .write()
                .map_err(|_| ResourceError::LoadFailed {
                    path: path.clone(),
                    message: "resource store lock poisoned".to_string(),
                })?;
            resources.insert(path, Arc::new(data));
            Ok(())
        }

        pub fn len(&self) -> usize {
            self.resources.read().map(|r| r.len()).unwrap_or(0)
        }

        pub fn is_empty(&self) -> bool {
            self.len() == 0
        }
    }

    impl ResourceProvider for InMemoryResourceProvider {
        fn load(&self, path: &str) -> Result<SharedResourceData, ResourceError> {
            let resources = self
                .resources
                .read()
                .map_err(|_| ResourceError::LoadFailed {
                    path: path.to_string(),
                    message: "resource store lock poisoned".to_string(),
                })?;
            resources
                .get(path)
                .cloned()
                .ok_or_else(|| ResourceError::NotFound(path.to_string()))
        }

        fn exists(&self, path: &str) -> bool {
            self.resources
                .read()
                .map(|r| r.contains_key(path))
                .unwrap_or(false)
        }

        fn name(&self) -> &'static str {
            "InMemoryResourceProvider"
        }
    }
}
