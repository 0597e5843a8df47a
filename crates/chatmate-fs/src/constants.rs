//! Constants shared by the validator and the store.

/// Suffix every artifact filename carries.
pub const ARTIFACT_SUFFIX: &str = ".chatmode.md";

/// Longest filename accepted, in bytes.
pub const MAX_FILENAME_LENGTH: usize = 255;

/// Advisory lock taken in a directory while an artifact is written into it.
pub const LOCK_FILE_NAME: &str = ".chatmate.lock";

/// Prefix of the temp file an artifact is staged in before the rename.
pub const TEMP_FILE_PREFIX: &str = ".chatmate";

/// Largest artifact body accepted (10 MiB).
pub const MAX_CONTENT_SIZE: usize = 10 * 1024 * 1024;

/// Characters rejected anywhere in a relative path.
pub const DANGEROUS_CHARACTERS: &[char] = &[
    '~', '$', '`', '|', '&', ';', '(', ')', '{', '}', '[', ']',
];

/// Device names that cannot be used as a file base name on Windows.
pub const RESERVED_NAMES: &[&str] = &[
    "CON", "PRN", "AUX", "NUL", "COM1", "COM2", "COM3", "COM4", "COM5", "COM6", "COM7", "COM8",
    "COM9", "LPT1", "LPT2", "LPT3", "LPT4", "LPT5", "LPT6", "LPT7", "LPT8", "LPT9",
];

/// Permission bits applied to written artifacts on Unix (rw-r--r--).
#[cfg(unix)]
pub const FILE_MODE: u32 = 0o644;

/// Permission bits applied to created directories on Unix (rwxr-xr-x).
#[cfg(unix)]
pub const DIR_MODE: u32 = 0o755;
