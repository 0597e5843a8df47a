use std::borrow::Cow;

use chatmate_fs::validate_artifact_filename;
use include_dir::{Dir, include_dir};

use super::ArtifactSource;
use crate::{ArtifactSet, Error, Result};

/// Artifacts shipped inside the binary.
static BUILTIN_CHATMODES: Dir<'_> = include_dir!("$CARGO_MANIFEST_DIR/chatmodes");

/// Read-only name to bytes table.
#[derive(Debug, Clone)]
pub struct EmbeddedSource {
    entries: Vec<(String, Cow<'static, [u8]>)>,
}

impl EmbeddedSource {
    /// The table compiled in from `chatmodes/`.
    pub fn builtin() -> Self {
        let entries = BUILTIN_CHATMODES
            .files()
            .filter_map(|file| {
                let name = file.path().file_name()?.to_str()?;
                Some((name.to_string(), Cow::Borrowed(file.contents())))
            })
            .collect();
        Self { entries }
    }

    /// A table built from in-memory entries.
    pub fn from_entries<N, C>(entries: impl IntoIterator<Item = (N, C)>) -> Self
    where
        N: Into<String>,
        C: Into<Vec<u8>>,
    {
        Self {
            entries: entries
                .into_iter()
                .map(|(name, content)| (name.into(), Cow::Owned(content.into())))
                .collect(),
        }
    }
}

impl ArtifactSource for EmbeddedSource {
    fn list(&self) -> Result<ArtifactSet> {
        Ok(self
            .entries
            .iter()
            .map(|(name, _)| name.as_str())
            .filter(|name| validate_artifact_filename(name).is_ok())
            .collect())
    }

    fn read(&self, filename: &str) -> Result<Vec<u8>> {
        validate_artifact_filename(filename).map_err(chatmate_fs::Error::from)?;
        self.entries
            .iter()
            .find(|(name, _)| name == filename)
            .map(|(_, content)| content.to_vec())
            .ok_or_else(|| Error::ArtifactNotFound {
                filename: filename.to_string(),
            })
    }

    fn describe(&self) -> String {
        "embedded artifacts".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::artifact::check_content;

    #[test]
    fn test_builtin_table_is_valid() {
        let source = EmbeddedSource::builtin();
        let set = source.list().unwrap();
        assert!(!set.is_empty());
        for filename in set.filenames() {
            let content = source.read(filename).unwrap();
            check_content(filename, &content).unwrap();
        }
    }

    #[test]
    fn test_invalid_names_are_hidden() {
        let source = EmbeddedSource::from_entries([
            ("Good.chatmode.md", "x"),
            ("../Bad.chatmode.md", "x"),
            ("README.md", "x"),
        ]);
        assert_eq!(source.list().unwrap().filenames(), ["Good.chatmode.md"]);
        assert!(source.read("../Bad.chatmode.md").is_err());
    }
}
