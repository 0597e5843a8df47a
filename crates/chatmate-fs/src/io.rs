//! Atomic I/O operations with file locking

use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Duration;

use backoff::ExponentialBackoffBuilder;
use fs2::FileExt;

use crate::constants::{LOCK_FILE_NAME, TEMP_FILE_PREFIX};
use crate::{Error, NormalizedPath, Result};

/// Tuning for [`write_atomic`].
#[derive(Debug, Clone, Copy)]
pub struct RobustnessConfig {
    /// How long to keep retrying the advisory lock before giving up.
    pub lock_timeout: Duration,
    /// Flush the temp file to disk before renaming it into place.
    pub enable_fsync: bool,
}

impl Default for RobustnessConfig {
    fn default() -> Self {
        Self {
            lock_timeout: Duration::from_secs(5),
            enable_fsync: true,
        }
    }
}

/// Removes the directory lock file once the write is done.
struct LockGuard {
    file: File,
    path: PathBuf,
}

impl Drop for LockGuard {
    fn drop(&mut self) {
        let _ = self.file.unlock();
        let _ = fs::remove_file(&self.path);
    }
}

/// Take the advisory lock for writes into `dir`.
///
/// The lock file has a fixed name so its length never depends on the
/// artifact filename, which may already be at the filesystem limit.
fn acquire_lock(dir: &Path, target: &Path, timeout: Duration) -> Result<LockGuard> {
    let lock_path = dir.join(LOCK_FILE_NAME);
    let file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(false)
        .open(&lock_path)
        .map_err(|e| Error::io(&lock_path, e))?;

    let policy = ExponentialBackoffBuilder::new()
        .with_initial_interval(Duration::from_millis(10))
        .with_max_elapsed_time(Some(timeout))
        .build();

    backoff::retry(policy, || {
        file.try_lock_exclusive()
            .map_err(backoff::Error::transient)
    })
    .map_err(|_| Error::LockFailed {
        path: target.to_path_buf(),
    })?;

    Ok(LockGuard {
        file,
        path: lock_path,
    })
}

/// Refuse targets that are symlinks or sit directly inside a symlinked
/// directory.
fn reject_symlinks(target: &Path) -> Result<()> {
    let candidates = std::iter::once(target).chain(target.parent());
    for candidate in candidates {
        if let Ok(meta) = fs::symlink_metadata(candidate)
            && meta.file_type().is_symlink()
        {
            return Err(Error::SymlinkInPath {
                path: candidate.to_path_buf(),
            });
        }
    }
    Ok(())
}

/// Write content atomically to a file with locking.
///
/// Uses write-to-temp-then-rename so readers never see a partial file. An
/// advisory lock on [`LOCK_FILE_NAME`] in the parent directory serializes
/// concurrent writers. Lock and temp file names are short and fixed-length.
pub fn write_atomic(path: &NormalizedPath, content: &[u8], config: RobustnessConfig) -> Result<()> {
    let native_path = path.to_native();
    reject_symlinks(&native_path)?;

    let parent = match native_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;

    let _lock = acquire_lock(parent, &native_path, config.lock_timeout)?;

    // Same directory keeps the rename on one filesystem. The temp file is
    // removed on drop if anything below fails.
    let mut temp = tempfile::Builder::new()
        .prefix(TEMP_FILE_PREFIX)
        .suffix(".tmp")
        .tempfile_in(parent)
        .map_err(|e| Error::io(parent, e))?;

    temp.write_all(content)
        .map_err(|e| Error::io(temp.path(), e))?;
    if config.enable_fsync {
        temp.as_file()
            .sync_all()
            .map_err(|e| Error::io(temp.path(), e))?;
    }
    temp.persist(&native_path)
        .map_err(|e| Error::io(&native_path, e.error))?;

    set_file_mode(&native_path)?;
    tracing::trace!(path = %native_path.display(), bytes = content.len(), "atomic write complete");
    Ok(())
}

#[cfg(unix)]
fn set_file_mode(path: &Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;

    fs::set_permissions(path, fs::Permissions::from_mode(crate::constants::FILE_MODE))
        .map_err(|e| Error::io(path, e))
}

#[cfg(not(unix))]
fn set_file_mode(_path: &Path) -> Result<()> {
    Ok(())
}

/// Read raw bytes from a file. A missing file is [`Error::NotFound`].
pub fn read_bytes(path: &NormalizedPath) -> Result<Vec<u8>> {
    let native_path = path.to_native();
    fs::read(&native_path).map_err(|e| Error::from_io(&native_path, e))
}

/// Read text content from a file.
pub fn read_text(path: &NormalizedPath) -> Result<String> {
    let native_path = path.to_native();
    fs::read_to_string(&native_path).map_err(|e| Error::from_io(&native_path, e))
}

/// Write text content to a file atomically with default settings.
pub fn write_text(path: &NormalizedPath, content: &str) -> Result<()> {
    write_atomic(path, content.as_bytes(), RobustnessConfig::default())
}
