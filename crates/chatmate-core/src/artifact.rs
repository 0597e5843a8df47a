//! Artifacts and artifact sets
//!
//! An artifact is a `<name>.chatmode.md` file. The engine treats its body as
//! opaque bytes apart from a minimal structural check: the file opens with a
//! `---` line, closes the block with another `---` line, and declares a
//! `description:` key in between.

use std::collections::HashSet;

use chatmate_fs::{ARTIFACT_SUFFIX, MAX_CONTENT_SIZE, validate_artifact_filename};
use serde::Serialize;

use crate::{Error, Result};

const DELIMITER: &str = "---";
const DESCRIPTION_KEY: &str = "description:";

/// A named unit of content, immutable once read from its source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    name: String,
    filename: String,
    content: Vec<u8>,
}

impl Artifact {
    /// Build an artifact, validating both the filename and the content.
    pub fn new(filename: impl Into<String>, content: Vec<u8>) -> Result<Self> {
        let filename = filename.into();
        validate_artifact_filename(&filename).map_err(chatmate_fs::Error::from)?;
        check_content(&filename, &content)?;
        Ok(Self {
            name: display_name(&filename).to_string(),
            filename,
            content,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn filename(&self) -> &str {
        &self.filename
    }

    pub fn content(&self) -> &[u8] {
        &self.content
    }

    /// The `description:` value from the metadata block.
    pub fn description(&self) -> Option<String> {
        parse_description(&self.content)
    }
}

/// Strip the artifact suffix from a filename.
pub fn display_name(filename: &str) -> &str {
    filename.strip_suffix(ARTIFACT_SUFFIX).unwrap_or(filename)
}

/// Filename for a display name.
pub fn filename_for(name: &str) -> String {
    format!("{name}{ARTIFACT_SUFFIX}")
}

/// Lines of the metadata block, or the reason there is none.
fn metadata_block(content: &str) -> std::result::Result<Vec<&str>, &'static str> {
    let mut lines = content.lines().map(|line| line.trim_end());
    if lines.next() != Some(DELIMITER) {
        return Err("missing opening '---' line");
    }
    let mut block = Vec::new();
    for line in lines {
        if line == DELIMITER {
            return Ok(block);
        }
        block.push(line);
    }
    Err("missing closing '---' line")
}

/// Check the content contract: non-empty, within the size limit, and
/// carrying a delimited metadata block with a `description:` key.
pub fn check_content(filename: &str, content: &[u8]) -> Result<()> {
    let invalid = |reason: &str| Error::InvalidContent {
        filename: filename.to_string(),
        reason: reason.to_string(),
    };

    if content.is_empty() {
        return Err(invalid("content is empty"));
    }
    if content.len() > MAX_CONTENT_SIZE {
        return Err(invalid(&format!(
            "content is {} bytes, limit is {MAX_CONTENT_SIZE}",
            content.len()
        )));
    }

    let text = String::from_utf8_lossy(content);
    let block = metadata_block(&text).map_err(invalid)?;
    if !block
        .iter()
        .any(|line| line.trim_start().starts_with(DESCRIPTION_KEY))
    {
        return Err(invalid("metadata block has no 'description:' key"));
    }
    Ok(())
}

/// Extract the `description:` value, unquoted.
pub fn parse_description(content: &[u8]) -> Option<String> {
    let text = String::from_utf8_lossy(content);
    let block = metadata_block(&text).ok()?;
    block.iter().find_map(|line| {
        let value = line.trim_start().strip_prefix(DESCRIPTION_KEY)?.trim();
        let value = value
            .strip_prefix('\'')
            .and_then(|v| v.strip_suffix('\''))
            .or_else(|| value.strip_prefix('"').and_then(|v| v.strip_suffix('"')))
            .unwrap_or(value);
        Some(value.to_string())
    })
}

/// Distinct artifact filenames at one point in time, in discovery order.
///
/// Sets are computed fresh for every engine call and never cached.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ArtifactSet {
    filenames: Vec<String>,
    #[serde(skip)]
    index: HashSet<String>,
}

impl ArtifactSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a filename, ignoring duplicates. Returns whether it was new.
    pub fn insert(&mut self, filename: impl Into<String>) -> bool {
        let filename = filename.into();
        if self.index.insert(filename.clone()) {
            self.filenames.push(filename);
            true
        } else {
            false
        }
    }

    pub fn contains(&self, filename: &str) -> bool {
        self.index.contains(filename)
    }

    pub fn len(&self) -> usize {
        self.filenames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.filenames.is_empty()
    }

    /// Filenames in discovery order.
    pub fn filenames(&self) -> &[String] {
        &self.filenames
    }

    /// Filenames in a stable, case-insensitive order.
    pub fn sorted(&self) -> Vec<String> {
        let mut sorted = self.filenames.clone();
        sorted.sort_by(|a, b| {
            a.to_lowercase()
                .cmp(&b.to_lowercase())
                .then_with(|| a.cmp(b))
        });
        sorted
    }

    /// Sorted members of `self` that are also in `other`.
    pub fn intersection(&self, other: &ArtifactSet) -> Vec<String> {
        self.sorted()
            .into_iter()
            .filter(|f| other.contains(f))
            .collect()
    }

    /// Sorted members of `self` missing from `other`.
    pub fn difference(&self, other: &ArtifactSet) -> Vec<String> {
        self.sorted()
            .into_iter()
            .filter(|f| !other.contains(f))
            .collect()
    }
}

impl<S: Into<String>> FromIterator<S> for ArtifactSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut set = Self::new();
        for filename in iter {
            set.insert(filename);
        }
        set
    }
}
