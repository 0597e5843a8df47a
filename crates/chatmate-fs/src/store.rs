//! Confined artifact storage
//!
//! [`SafeStore`] is the only type in the workspace that reads, writes or
//! deletes artifact files. Every call validates the filename against the
//! artifact grammar and checks that the joined path stays inside the
//! directory it was given before touching disk.

use std::fs;
use std::path::{Path, PathBuf};

use crate::constants::MAX_CONTENT_SIZE;
use crate::io::{self, RobustnessConfig};
use crate::validation::{is_path_safe, validate_artifact_filename, validate_content_length};
use crate::{Error, NormalizedPath, Result};

/// Result of a delete that did not fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    /// The file existed and was removed.
    Deleted,
    /// There was nothing to remove.
    AlreadyAbsent,
}

/// Validated filesystem access rooted at caller-supplied directories.
#[derive(Debug, Default, Clone)]
pub struct SafeStore {
    robustness: RobustnessConfig,
}

impl SafeStore {
    /// Create a new SafeStore with default robustness settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new SafeStore with custom robustness settings.
    pub fn with_robustness(robustness: RobustnessConfig) -> Self {
        Self { robustness }
    }

    /// Create `dir` and its parents if missing. Idempotent.
    pub fn ensure_directory(&self, dir: &Path) -> Result<()> {
        let mut builder = fs::DirBuilder::new();
        builder.recursive(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::DirBuilderExt;
            builder.mode(crate::constants::DIR_MODE);
        }
        builder.create(dir).map_err(|e| Error::io(dir, e))
    }

    /// List artifact filenames in `dir`, in directory order.
    ///
    /// Entries that are not regular files or fail the artifact filename
    /// grammar are skipped. A missing directory yields an empty list.
    pub fn list_artifact_files(&self, dir: &Path) -> Result<Vec<String>> {
        let entries = match fs::read_dir(dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(Error::io(dir, e)),
        };

        let mut names = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| Error::io(dir, e))?;
            let file_type = entry.file_type().map_err(|e| Error::io(entry.path(), e))?;
            if !file_type.is_file() {
                continue;
            }
            let Ok(name) = entry.file_name().into_string() else {
                tracing::debug!(path = %entry.path().display(), "skipping non UTF-8 filename");
                continue;
            };
            if validate_artifact_filename(&name).is_ok() {
                names.push(name);
            } else {
                tracing::trace!(%name, "skipping non-artifact entry");
            }
        }
        Ok(names)
    }

    /// Read the artifact `filename` from `dir`.
    pub fn read_file(&self, dir: &Path, filename: &str) -> Result<Vec<u8>> {
        let path = self.confined_path(dir, filename)?;

        let size = fs::metadata(path.to_native())
            .map_err(|e| Error::from_io(path.to_native(), e))?
            .len();
        if size > MAX_CONTENT_SIZE as u64 {
            return Err(crate::ValidationError::ContentTooLarge {
                size: usize::try_from(size).unwrap_or(usize::MAX),
                max: MAX_CONTENT_SIZE,
            }
            .into());
        }

        io::read_bytes(&path)
    }

    /// Write `content` as the artifact `filename` inside `dir`.
    ///
    /// Creates `dir` when missing. Existing files are replaced atomically.
    pub fn write_file(&self, dir: &Path, filename: &str, content: &[u8]) -> Result<()> {
        validate_content_length(content, MAX_CONTENT_SIZE)?;
        // Validate before creating anything on disk.
        self.confined_path(dir, filename)?;

        self.ensure_directory(dir)?;
        // Now that `dir` exists its symlinks can be resolved.
        let path = self.confined_path(dir, filename)?;
        io::write_atomic(&path, content, self.robustness)
    }

    /// Delete the artifact `filename` from `dir`.
    ///
    /// Deleting a file that does not exist succeeds with
    /// [`DeleteOutcome::AlreadyAbsent`].
    pub fn delete_file(&self, dir: &Path, filename: &str) -> Result<DeleteOutcome> {
        let path = self.confined_path(dir, filename)?;
        let native = path.to_native();

        match fs::symlink_metadata(&native) {
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Ok(DeleteOutcome::AlreadyAbsent);
            }
            Err(e) => return Err(Error::io(&native, e)),
            Ok(meta) if meta.is_dir() => {
                return Err(Error::io(
                    &native,
                    std::io::Error::other("refusing to delete a directory"),
                ));
            }
            Ok(_) => {}
        }

        match fs::remove_file(&native) {
            Ok(()) => Ok(DeleteOutcome::Deleted),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(DeleteOutcome::AlreadyAbsent),
            Err(e) => Err(Error::io(&native, e)),
        }
    }

    /// Validate `filename` and join it onto `dir`, refusing any result that
    /// leaves `dir`.
    ///
    /// `dir` is anchored to an absolute path first, so a relative root such
    /// as `../prompts` is checked against where it points, not its spelling.
    fn confined_path(&self, dir: &Path, filename: &str) -> Result<NormalizedPath> {
        validate_artifact_filename(filename)?;

        let base = NormalizedPath::new(anchor_root(dir)?);
        let path = base.join(filename);
        if !is_path_safe(&base, &path) {
            tracing::warn!(%filename, base = %base, "confinement check failed");
            return Err(Error::SecurityViolation {
                path: path.to_native(),
                base: base.to_native(),
            });
        }
        Ok(path)
    }
}

/// Absolute form of a store root.
///
/// An existing root is canonicalized, so a linked prompts directory is
/// followed while links inside it are still refused. A missing root is made
/// absolute against the working directory.
fn anchor_root(dir: &Path) -> Result<PathBuf> {
    match dunce::canonicalize(dir) {
        Ok(root) => Ok(root),
        Err(_) => std::path::absolute(dir).map_err(|e| Error::io(dir, e)),
    }
}
