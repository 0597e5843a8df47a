use std::path::{Path, PathBuf};

use chatmate_fs::SafeStore;

use super::ArtifactSource;
use crate::{ArtifactSet, Error, Result};

/// Artifacts read from an external directory.
#[derive(Debug, Clone)]
pub struct DirectorySource {
    dir: PathBuf,
    store: SafeStore,
}

impl DirectorySource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            store: SafeStore::new(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl ArtifactSource for DirectorySource {
    fn list(&self) -> Result<ArtifactSet> {
        Ok(self
            .store
            .list_artifact_files(&self.dir)?
            .into_iter()
            .collect())
    }

    fn read(&self, filename: &str) -> Result<Vec<u8>> {
        self.store
            .read_file(&self.dir, filename)
            .map_err(|e| match e {
                chatmate_fs::Error::NotFound { .. } => Error::ArtifactNotFound {
                    filename: filename.to_string(),
                },
                other => other.into(),
            })
    }

    fn describe(&self) -> String {
        format!("directory {}", self.dir.display())
    }
}
