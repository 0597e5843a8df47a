//! Normalized path handling for cross-platform compatibility

use std::path::{Path, PathBuf};

/// A lexically cleaned path using forward slashes internally.
///
/// Cleaning collapses repeated separators, drops `.` segments and resolves
/// `..` against the preceding segment. A `..` that climbs above the start of
/// a relative path is kept, so callers can still see that the path escapes;
/// above the root of an absolute path it is dropped.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NormalizedPath {
    inner: String,
}

impl NormalizedPath {
    /// Clean any path-like input. Non UTF-8 bytes are replaced.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            inner: clean(&path.as_ref().to_string_lossy()),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.inner
    }

    /// Platform path for handing to `std::fs`.
    pub fn to_native(&self) -> PathBuf {
        PathBuf::from(&self.inner)
    }

    /// Append `segment` and clean, so `..` inside it is resolved lexically.
    pub fn join(&self, segment: &str) -> Self {
        let separator = if self.inner.ends_with('/') { "" } else { "/" };
        Self {
            inner: clean(&format!("{}{separator}{segment}", self.inner)),
        }
    }

    /// Whether the path is rooted (`/...` or `C:/...`).
    pub fn is_absolute(&self) -> bool {
        let (_, rest) = split_drive(&self.inner);
        rest.starts_with('/')
    }

    /// Express `self` relative to `base`, lexically.
    ///
    /// Returns `None` when no relative form exists: one path is absolute and
    /// the other is not, the drives differ, or `base` itself climbs out with
    /// leading `..` segments that `self` does not share.
    pub fn relative_to(&self, base: &NormalizedPath) -> Option<NormalizedPath> {
        if self.is_absolute() != base.is_absolute() {
            return None;
        }
        let (target_drive, target_rest) = split_drive(&self.inner);
        let (base_drive, base_rest) = split_drive(&base.inner);
        if !target_drive.eq_ignore_ascii_case(base_drive) {
            return None;
        }

        let target_parts = segments(target_rest);
        let base_parts = segments(base_rest);
        let common = target_parts
            .iter()
            .zip(base_parts.iter())
            .take_while(|(a, b)| a == b)
            .count();

        if base_parts[common..].iter().any(|part| *part == "..") {
            return None;
        }

        let mut parts: Vec<&str> = vec![".."; base_parts.len() - common];
        parts.extend_from_slice(&target_parts[common..]);
        let inner = if parts.is_empty() {
            ".".to_string()
        } else {
            parts.join("/")
        };
        Some(Self { inner })
    }

    /// Final segment, if any.
    pub fn file_name(&self) -> Option<&str> {
        self.inner.rsplit('/').next().filter(|name| !matches!(*name, "" | "." | ".."))
    }

    /// Text after the last dot of the file name. Dotfiles have none.
    pub fn extension(&self) -> Option<&str> {
        let name = self.file_name()?;
        match name.rfind('.') {
            Some(0) | None => None,
            Some(idx) => Some(&name[idx + 1..]),
        }
    }
}

/// Split a leading `C:` drive designator off a normalized string.
fn split_drive(s: &str) -> (&str, &str) {
    let bytes = s.as_bytes();
    if bytes.len() >= 2 && bytes[1] == b':' && bytes[0].is_ascii_alphabetic() {
        s.split_at(2)
    } else {
        ("", s)
    }
}

fn segments(s: &str) -> Vec<&str> {
    s.split('/').filter(|part| !part.is_empty()).collect()
}

fn clean(raw: &str) -> String {
    let slashed = raw.replace('\\', "/");
    let (drive, rest) = split_drive(&slashed);
    let rooted = rest.starts_with('/');

    let mut stack: Vec<&str> = Vec::new();
    for part in rest.split('/') {
        match part {
            "" | "." => {}
            ".." => match stack.last() {
                Some(last) if *last != ".." => {
                    stack.pop();
                }
                _ if rooted => {}
                _ => stack.push(".."),
            },
            other => stack.push(other),
        }
    }

    let body = stack.join("/");
    match (rooted, body.is_empty()) {
        (true, _) => format!("{drive}/{body}"),
        (false, true) if drive.is_empty() => ".".to_string(),
        (false, _) => format!("{drive}{body}"),
    }
}

impl AsRef<Path> for NormalizedPath {
    fn as_ref(&self) -> &Path {
        Path::new(&self.inner)
    }
}

impl std::fmt::Display for NormalizedPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.inner)
    }
}
