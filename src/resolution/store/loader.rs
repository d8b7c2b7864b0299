use std::fs;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;

use super::validate::ConfigInvalid;
use crate::config::DocumentPaths;
use crate::resolution::defaults;
use crate::resolution::domain::{FeatureFlagSet, Foundation, Governance};

/// Source abstraction for configuration documents so the store can be
/// exercised against files, fixtures, or the built-in standard set.
pub trait ConfigLoader: Send + Sync {
    fn load_foundation(&self) -> Result<Foundation, LoadError>;
    fn load_governance(&self) -> Result<Governance, LoadError>;
    fn load_feature_flags(&self) -> Result<FeatureFlagSet, LoadError>;

    /// Filesystem paths backing this loader, if any; consumed by the
    /// document watcher to detect out-of-band edits.
    fn document_paths(&self) -> Vec<PathBuf> {
        Vec::new()
    }
}

/// Error raised while producing a configuration snapshot.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("failed to read configuration document {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("configuration document {path} is not valid JSON: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error(transparent)]
    Invalid(#[from] ConfigInvalid),
}

/// Loader reading the three JSON documents from disk.
#[derive(Debug, Clone)]
pub struct JsonDocumentLoader {
    foundation: PathBuf,
    governance: PathBuf,
    flags: PathBuf,
}

impl JsonDocumentLoader {
    pub fn new(
        foundation: impl Into<PathBuf>,
        governance: impl Into<PathBuf>,
        flags: impl Into<PathBuf>,
    ) -> Self {
        Self {
            foundation: foundation.into(),
            governance: governance.into(),
            flags: flags.into(),
        }
    }

    pub fn from_paths(paths: &DocumentPaths) -> Self {
        Self::new(&paths.foundation, &paths.governance, &paths.flags)
    }

    fn read<T: DeserializeOwned>(path: &Path) -> Result<T, LoadError> {
        let raw = fs::read_to_string(path).map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&raw).map_err(|source| LoadError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }
}

impl ConfigLoader for JsonDocumentLoader {
    fn load_foundation(&self) -> Result<Foundation, LoadError> {
        Self::read(&self.foundation)
    }

    fn load_governance(&self) -> Result<Governance, LoadError> {
        Self::read(&self.governance)
    }

    fn load_feature_flags(&self) -> Result<FeatureFlagSet, LoadError> {
        Self::read(&self.flags)
    }

    fn document_paths(&self) -> Vec<PathBuf> {
        vec![
            self.foundation.clone(),
            self.governance.clone(),
            self.flags.clone(),
        ]
    }
}

/// In-memory loader wrapping fully-built documents; used by tests and demos.
#[derive(Debug, Clone)]
pub struct StaticLoader {
    foundation: Foundation,
    governance: Governance,
    flags: FeatureFlagSet,
}

impl StaticLoader {
    pub fn new(foundation: Foundation, governance: Governance, flags: FeatureFlagSet) -> Self {
        Self {
            foundation,
            governance,
            flags,
        }
    }

    /// Loader seeded with the built-in standard documents.
    pub fn standard() -> Self {
        Self::new(
            defaults::standard_foundation(),
            defaults::standard_governance(),
            defaults::standard_feature_flags(),
        )
    }
}

impl ConfigLoader for StaticLoader {
    fn load_foundation(&self) -> Result<Foundation, LoadError> {
        Ok(self.foundation.clone())
    }

    fn load_governance(&self) -> Result<Governance, LoadError> {
        Ok(self.governance.clone())
    }

    fn load_feature_flags(&self) -> Result<FeatureFlagSet, LoadError> {
        Ok(self.flags.clone())
    }
}
