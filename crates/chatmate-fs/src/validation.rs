//! Filename, path and input validation
//!
//! These checks sit in front of every filesystem call the engine makes. They
//! over-reject on purpose: a refused benign name is cheap, an accepted
//! malicious one is not.
//!
//! [`validate_path`] rejects any occurrence of `..`, not only whole `..`
//! segments, so `a..b.txt` is refused as a traversal attempt.

use std::path::Path;

use crate::constants::{
    ARTIFACT_SUFFIX, DANGEROUS_CHARACTERS, MAX_FILENAME_LENGTH, RESERVED_NAMES,
};
use crate::path::NormalizedPath;

/// Why an input was rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("name is empty")]
    EmptyName,

    #[error("name contains a null byte")]
    NullBytes,

    #[error("name is {length} bytes long, limit is {max}")]
    TooLong { length: usize, max: usize },

    #[error("name contains invalid character {character:?}")]
    InvalidCharacters { character: char },

    #[error("{name:?} is a reserved device name")]
    ReservedName { name: String },

    #[error("{name:?} is not an artifact filename (expected suffix {ARTIFACT_SUFFIX})")]
    InvalidArtifactFilename { name: String },

    #[error("path {path:?} contains a directory traversal sequence")]
    DirectoryTraversal { path: String },

    #[error("path {path:?} is absolute")]
    AbsolutePath { path: String },

    #[error("path {path:?} contains dangerous character {character:?}")]
    DangerousCharacter { character: char, path: String },

    #[error("content is {size} bytes, limit is {max}")]
    ContentTooLarge { size: usize, max: usize },

    #[error("{name:?} does not have an allowed extension ({allowed})")]
    InvalidExtension { name: String, allowed: String },
}

fn is_allowed_filename_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, ' ' | '.' | '_' | '-')
}

/// Validate a bare filename.
///
/// Accepts only `[A-Za-z0-9 ._-]`, at most [`MAX_FILENAME_LENGTH`] bytes,
/// and refuses Windows device names such as `CON` or `lpt1.txt`.
pub fn validate_filename(name: &str) -> Result<(), ValidationError> {
    if name.is_empty() {
        return Err(ValidationError::EmptyName);
    }
    if name.contains('\0') {
        return Err(ValidationError::NullBytes);
    }
    if name.len() > MAX_FILENAME_LENGTH {
        return Err(ValidationError::TooLong {
            length: name.len(),
            max: MAX_FILENAME_LENGTH,
        });
    }
    if let Some(character) = name.chars().find(|c| !is_allowed_filename_char(*c)) {
        return Err(ValidationError::InvalidCharacters { character });
    }

    // Windows resolves `CON.anything` to the device, so compare the part
    // before the first dot.
    let base = name.split('.').next().unwrap_or(name).trim_end();
    if RESERVED_NAMES
        .iter()
        .any(|reserved| reserved.eq_ignore_ascii_case(base))
    {
        return Err(ValidationError::ReservedName {
            name: name.to_string(),
        });
    }

    Ok(())
}

/// Validate a filename that must name an artifact (`<name>.chatmode.md`).
pub fn validate_artifact_filename(name: &str) -> Result<(), ValidationError> {
    validate_filename(name)?;
    match name.strip_suffix(ARTIFACT_SUFFIX) {
        Some(stem) if !stem.trim().is_empty() => Ok(()),
        _ => Err(ValidationError::InvalidArtifactFilename {
            name: name.to_string(),
        }),
    }
}

/// Validate a relative path supplied from outside.
pub fn validate_path(path: &str) -> Result<(), ValidationError> {
    if path.is_empty() {
        return Err(ValidationError::EmptyName);
    }
    if path.contains('\0') {
        return Err(ValidationError::NullBytes);
    }
    if path.contains("..") {
        return Err(ValidationError::DirectoryTraversal {
            path: path.to_string(),
        });
    }
    if path.starts_with('/')
        || path.starts_with('\\')
        || Path::new(path).is_absolute()
        || NormalizedPath::new(path).is_absolute()
    {
        return Err(ValidationError::AbsolutePath {
            path: path.to_string(),
        });
    }
    if let Some(character) = path.chars().find(|c| DANGEROUS_CHARACTERS.contains(c)) {
        return Err(ValidationError::DangerousCharacter {
            character,
            path: path.to_string(),
        });
    }
    Ok(())
}

/// Clean a free-form string in three steps, in this order: drop null bytes,
/// trim surrounding whitespace, then strip the remaining C0 control
/// characters except `\n` and `\t`.
///
/// Trimming happens before the control strip, so whitespace that was only
/// shielded by a control character survives: `"\x01 a"` becomes `" a"`.
pub fn sanitize_input(input: &str) -> String {
    let without_nul = input.replace('\0', "");
    without_nul
        .trim()
        .chars()
        .filter(|c| matches!(*c, '\n' | '\t') || !matches!(*c, '\0'..='\x1f'))
        .collect()
}

/// Confinement predicate: does `target` stay inside `base`?
///
/// Both paths are cleaned lexically. An absolute target is rewritten relative
/// to `base`; the result is unsafe if it starts with `..` or contains a
/// `/../` segment.
pub fn is_path_safe(base: impl AsRef<Path>, target: impl AsRef<Path>) -> bool {
    let base = NormalizedPath::new(base);
    let target = NormalizedPath::new(target);

    let relative = if target.is_absolute() {
        match target.relative_to(&base) {
            Some(relative) => relative,
            None => return false,
        }
    } else {
        target
    };

    let relative = relative.as_str();
    !(relative.starts_with("..") || relative.contains("/../"))
}

/// Reject content longer than `max` bytes.
pub fn validate_content_length(content: &[u8], max: usize) -> Result<(), ValidationError> {
    if content.len() > max {
        return Err(ValidationError::ContentTooLarge {
            size: content.len(),
            max,
        });
    }
    Ok(())
}

/// Check that `name` ends with one of `allowed` (case-insensitive).
///
/// Entries may be given with or without the leading dot, and may span more
/// than one dot (`chatmode.md`).
pub fn validate_file_extension(name: &str, allowed: &[&str]) -> Result<(), ValidationError> {
    let lowered = name.to_ascii_lowercase();
    let matched = allowed.iter().any(|ext| {
        let ext = ext.trim_start_matches('.').to_ascii_lowercase();
        !ext.is_empty() && lowered.ends_with(&format!(".{ext}"))
    });
    if matched {
        Ok(())
    } else {
        Err(ValidationError::InvalidExtension {
            name: name.to_string(),
            allowed: allowed.join(", "),
        })
    }
}
