//! Pluggable cache persistence.
//!
//! A [`CacheStore`] moves an opaque string payload in and out of some backing
//! medium under a namespace. The engine never interprets the payload here;
//! encoding and decoding happen in the cache itself, so a store stays usable
//! for any serializable cache value type.

use std::path::PathBuf;

use tracing::debug;

use crate::error::CacheError;

/// Load/save of namespaced string payloads.
pub trait CacheStore {
    /// Load the payload stored under `namespace`, if any.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::StoreFailed`] if the medium cannot be read.
    /// A missing payload is `Ok(None)`, not an error.
    fn load(&self, namespace: &str) -> Result<Option<String>, CacheError>;

    /// Save `payload` under `namespace`, replacing any previous payload.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::StoreFailed`] if the medium cannot be written.
    fn save(&self, namespace: &str, payload: &str) -> Result<(), CacheError>;
}

/// File-based store writing one JSON file per namespace.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    /// Create a store rooted at `dir`. The directory is created lazily on
    /// first save.
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path_for(&self, namespace: &str) -> PathBuf {
        self.dir.join(format!("{namespace}.json"))
    }
}

impl CacheStore for JsonFileStore {
    fn load(&self, namespace: &str) -> Result<Option<String>, CacheError> {
        let path = self.path_for(namespace);
        if !path.exists() {
            debug!(path = %path.display(), "No stored payload");
            return Ok(None);
        }
        std::fs::read_to_string(&path)
            .map(Some)
            .map_err(|e| CacheError::StoreFailed {
                message: format!("failed to read {}: {e}", path.display()),
            })
    }

    fn save(&self, namespace: &str, payload: &str) -> Result<(), CacheError> {
        std::fs::create_dir_all(&self.dir).map_err(|e| CacheError::StoreFailed {
            message: format!("failed to create {}: {e}", self.dir.display()),
        })?;
        let path = self.path_for(namespace);
        std::fs::write(&path, payload).map_err(|e| CacheError::StoreFailed {
            message: format!("failed to write {}: {e}", path.display()),
        })
    }
}
