//! The installed set: artifacts present in the destination directory.

use std::path::{Path, PathBuf};

use chatmate_fs::SafeStore;

use crate::{ArtifactSet, Result};

#[derive(Debug, Clone)]
pub struct InstalledSet {
    dir: PathBuf,
    store: SafeStore,
}

impl InstalledSet {
    pub fn new(dir: impl Into<PathBuf>, store: SafeStore) -> Self {
        Self {
            dir: dir.into(),
            store,
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// List installed artifacts. A destination that does not exist yet is
    /// an empty set.
    pub fn list(&self) -> Result<ArtifactSet> {
        Ok(self
            .store
            .list_artifact_files(&self.dir)?
            .into_iter()
            .collect())
    }
}
