//! Confinement tests across the validator, the store and the engine
//!
//! Hostile names can reach the engine from a source that does not filter
//! them. None of them may cause a write or delete outside the destination,
//! and none of them may abort the rest of the batch.

use chatmate_core::{
    ArtifactSet, ArtifactSource, Error, Outcome, ReconciliationEngine, Result,
};
use chatmate_fs::{
    DeleteOutcome, SafeStore, ValidationError, is_path_safe, validate_filename, validate_path,
};
use chatmate_test_utils::{TestPrompts, chatmode_content};
use pretty_assertions::assert_eq;
use std::fs;

/// A source that offers whatever names it is given, unfiltered.
struct HostileSource {
    names: Vec<&'static str>,
}

impl ArtifactSource for HostileSource {
    fn list(&self) -> Result<ArtifactSet> {
        Ok(self.names.iter().copied().collect())
    }

    fn read(&self, filename: &str) -> Result<Vec<u8>> {
        Ok(chatmode_content(filename).into_bytes())
    }

    fn describe(&self) -> String {
        "hostile test source".to_string()
    }
}

#[test]
fn test_validate_path_rejects_escapes() {
    for path in [
        "../etc/passwd",
        "a..b.txt",
        "/etc/passwd",
        "dir/$HOME",
        "x|y",
        "~/prompts",
        "a;b",
        "{a}",
        "[a]",
        "(a)",
        "a&b",
        "`cmd`",
    ] {
        assert!(validate_path(path).is_err(), "{path:?} should be rejected");
    }
    assert!(validate_path("nested/Solve Issue.chatmode.md").is_ok());
}

#[test]
fn test_is_path_safe_rejects_parent_traversal() {
    let base = "/home/user/.config/Code/User/prompts";
    assert!(!is_path_safe(base, format!("{base}/../../etc/passwd")));
    assert!(is_path_safe(base, format!("{base}/Solve Issue.chatmode.md")));
}

#[test]
fn test_reserved_names_rejected() {
    for name in ["CON", "con.txt", "PRN.md"] {
        assert!(
            matches!(
                validate_filename(name),
                Err(ValidationError::ReservedName { .. })
            ),
            "{name:?} should be reserved"
        );
    }
}

#[test]
fn test_store_round_trip_is_byte_exact() {
    let fixture = TestPrompts::new();
    let store = SafeStore::new();
    let content = b"---\ndescription: x\n---\n\x00\xff binary tail\r\n";

    store
        .write_file(&fixture.prompts_dir(), "Bytes.chatmode.md", content)
        .unwrap();

    assert_eq!(
        store
            .read_file(&fixture.prompts_dir(), "Bytes.chatmode.md")
            .unwrap(),
        content
    );
}

#[test]
fn test_store_refuses_names_with_separators() {
    let fixture = TestPrompts::new();
    let store = SafeStore::new();
    let outside = fixture.root().join("victim.chatmode.md");
    fs::write(&outside, "keep").unwrap();

    for name in ["../victim.chatmode.md", "sub/x.chatmode.md", "..\\victim.chatmode.md"] {
        assert!(store.write_file(&fixture.prompts_dir(), name, b"x").is_err());
        assert!(store.delete_file(&fixture.prompts_dir(), name).is_err());
    }

    assert_eq!(fs::read_to_string(&outside).unwrap(), "keep");
    assert_eq!(
        store
            .delete_file(&fixture.prompts_dir(), "Absent.chatmode.md")
            .unwrap(),
        DeleteOutcome::AlreadyAbsent
    );
}

#[test]
fn test_hostile_names_fail_locally_and_batch_continues() {
    let fixture = TestPrompts::new();
    let engine = ReconciliationEngine::new(
        Box::new(HostileSource {
            names: vec![
                "../escape.chatmode.md",
                "CON.chatmode.md",
                "Good.chatmode.md",
                "no-suffix.md",
            ],
        }),
        fixture.prompts_dir(),
    );

    let report = engine.install_all(false).unwrap();

    assert_eq!(report.failures().count(), 3);
    assert_eq!(
        report.outcome_of("Good.chatmode.md"),
        Some(&Outcome::Installed)
    );
    assert_eq!(fixture.destination_entries(), vec!["Good.chatmode.md"]);
    assert!(!fixture.root().join("escape.chatmode.md").exists());
}

#[test]
fn test_uninstall_requests_cannot_reach_outside() {
    let fixture = TestPrompts::new();
    fixture.add_available("Solve Issue");
    fixture.add_installed("Solve Issue", &chatmode_content("Solve Issue"));
    let outside = fixture.root().join("secret.chatmode.md");
    fs::write(&outside, "keep").unwrap();

    let engine = ReconciliationEngine::new(
        Box::new(chatmate_core::DirectorySource::new(fixture.source_dir())),
        fixture.prompts_dir(),
    );
    let report = engine
        .uninstall_subset(&["../secret", "/etc/passwd", "\0"])
        .unwrap();

    assert!(report.items.is_empty());
    assert_eq!(report.notes.len(), 3);
    assert!(outside.exists());
    fixture.assert_installed("Solve Issue");
}

#[test]
fn test_abort_is_fatal_but_validation_is_not() {
    let validation = Error::from(chatmate_fs::Error::from(ValidationError::EmptyName));
    assert!(!validation.is_fatal());

    let escape = Error::from(chatmate_fs::Error::SecurityViolation {
        path: "/etc/passwd".into(),
        base: "/prompts".into(),
    });
    assert!(escape.is_fatal());
}
