//! [`TestPrompts`] fixture for engine and CLI scenarios.

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

use crate::content::chatmode_content;

const SUFFIX: &str = ".chatmode.md";

/// A temporary root holding `source/` (available artifacts) and `prompts/`
/// (the destination). `prompts/` is not created until something is written
/// into it, so tests can exercise the missing-destination path.
///
/// # Example
///
/// ```rust,no_run
/// use chatmate_test_utils::TestPrompts;
///
/// let fixture = TestPrompts::new();
/// fixture.add_available("Solve Issue");
/// fixture.add_installed("Mine", "---\ndescription: mine\n---\n");
/// fixture.assert_installed("Mine");
/// ```
pub struct TestPrompts {
    temp_dir: TempDir,
}

impl Default for TestPrompts {
    fn default() -> Self {
        Self::new()
    }
}

impl TestPrompts {
    /// Create an empty root with an empty `source/` directory.
    pub fn new() -> Self {
        let temp_dir = TempDir::new().unwrap();
        fs::create_dir(temp_dir.path().join("source")).unwrap();
        Self { temp_dir }
    }

    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    /// The external source directory.
    pub fn source_dir(&self) -> PathBuf {
        self.root().join("source")
    }

    /// The destination directory.
    pub fn prompts_dir(&self) -> PathBuf {
        self.root().join("prompts")
    }

    /// Add a well-formed available artifact called `name`.
    pub fn add_available(&self, name: &str) -> PathBuf {
        self.add_available_with(name, &chatmode_content(name))
    }

    /// Add an available artifact with explicit content.
    pub fn add_available_with(&self, name: &str, content: &str) -> PathBuf {
        let path = self.source_dir().join(format!("{name}{SUFFIX}"));
        fs::write(&path, content)
            .unwrap_or_else(|e| panic!("add_available: failed to write {}: {e}", path.display()));
        path
    }

    /// Remove an available artifact, turning any installed copy into an
    /// orphan.
    pub fn remove_available(&self, name: &str) {
        fs::remove_file(self.source_dir().join(format!("{name}{SUFFIX}"))).unwrap();
    }

    /// Place a file in the destination directly, bypassing the engine.
    pub fn add_installed(&self, name: &str, content: &str) -> PathBuf {
        fs::create_dir_all(self.prompts_dir()).unwrap();
        let path = self.prompts_dir().join(format!("{name}{SUFFIX}"));
        fs::write(&path, content)
            .unwrap_or_else(|e| panic!("add_installed: failed to write {}: {e}", path.display()));
        path
    }

    /// Path of the installed artifact `name`.
    pub fn installed_path(&self, name: &str) -> PathBuf {
        self.prompts_dir().join(format!("{name}{SUFFIX}"))
    }

    /// Display names of the artifact files in the destination, sorted.
    pub fn installed_names(&self) -> Vec<String> {
        let Ok(entries) = fs::read_dir(self.prompts_dir()) else {
            return Vec::new();
        };
        let mut names: Vec<String> = entries
            .filter_map(|entry| entry.ok())
            .filter_map(|entry| entry.file_name().into_string().ok())
            .filter_map(|name| name.strip_suffix(SUFFIX).map(str::to_string))
            .collect();
        names.sort();
        names
    }

    /// All entry names in the destination, sorted, including non-artifacts.
    pub fn destination_entries(&self) -> Vec<String> {
        let Ok(entries) = fs::read_dir(self.prompts_dir()) else {
            return Vec::new();
        };
        let mut names: Vec<String> = entries
            .filter_map(|entry| entry.ok())
            .filter_map(|entry| entry.file_name().into_string().ok())
            .collect();
        names.sort();
        names
    }

    /// Read an installed artifact.
    ///
    /// # Panics
    /// Panics if the file cannot be read.
    pub fn read_installed(&self, name: &str) -> String {
        let path = self.installed_path(name);
        fs::read_to_string(&path)
            .unwrap_or_else(|_| panic!("Could not read installed artifact: {}", path.display()))
    }

    /// Assert that artifact `name` is present in the destination.
    pub fn assert_installed(&self, name: &str) {
        let path = self.installed_path(name);
        assert!(path.is_file(), "Expected artifact to be installed: {}", path.display());
    }

    /// Assert that artifact `name` is absent from the destination.
    pub fn assert_not_installed(&self, name: &str) {
        let path = self.installed_path(name);
        assert!(
            !path.exists(),
            "Expected artifact NOT to be installed: {}",
            path.display()
        );
    }
}
