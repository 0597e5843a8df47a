//! Providers of the available artifact set
//!
//! Two backends share one capability, list names and read bytes by name:
//! [`DirectorySource`] reads an external directory through the
//! [`SafeStore`](chatmate_fs::SafeStore), [`EmbeddedSource`] serves the table
//! compiled into the binary. [`select_source`] picks one when the engine is
//! built and the choice is not revisited afterwards.

mod directory;
mod embedded;

use std::path::Path;

pub use directory::DirectorySource;
pub use embedded::EmbeddedSource;

use crate::{Artifact, ArtifactSet, Result};

/// Something that offers artifacts for installation.
pub trait ArtifactSource {
    /// Current available set, in discovery order.
    fn list(&self) -> Result<ArtifactSet>;

    /// Raw bytes of one artifact. Unknown names are
    /// [`Error::ArtifactNotFound`](crate::Error::ArtifactNotFound).
    fn read(&self, filename: &str) -> Result<Vec<u8>>;

    /// Read one artifact and check it against the filename grammar and the
    /// content contract.
    fn load(&self, filename: &str) -> Result<Artifact> {
        Artifact::new(filename, self.read(filename)?)
    }

    /// Human-readable origin, for reports and logs.
    fn describe(&self) -> String;
}

/// Use `external` when it is an existing directory, otherwise fall back to
/// the embedded table.
pub fn select_source(external: Option<&Path>) -> Box<dyn ArtifactSource> {
    match external {
        Some(dir) if dir.is_dir() => {
            tracing::debug!(dir = %dir.display(), "using external artifact directory");
            Box::new(DirectorySource::new(dir))
        }
        Some(dir) => {
            tracing::debug!(
                dir = %dir.display(),
                "external artifact directory missing, using embedded artifacts"
            );
            Box::new(EmbeddedSource::builtin())
        }
        None => Box::new(EmbeddedSource::builtin()),
    }
}
