//! CLI end-to-end tests that invoke the compiled `chatmate` binary.
//!
//! Every test points the source and destination at temporary directories
//! through the environment, and the config directory at an empty one, so
//! nothing outside the fixture is read or written.

use assert_cmd::Command;
use chatmate_test_utils::{TestPrompts, chatmode_content, invalid_chatmode_content};
use predicates::prelude::*;

/// A `chatmate` command wired to the fixture's directories.
fn chatmate(fixture: &TestPrompts) -> Command {
    let mut cmd = Command::cargo_bin("chatmate").expect("Failed to find chatmate binary");
    cmd.env("CHATMATE_SOURCE_DIR", fixture.source_dir())
        .env("CHATMATE_PROMPTS_DIR", fixture.prompts_dir())
        .env("XDG_CONFIG_HOME", fixture.root().join("config"))
        .env("NO_COLOR", "1")
        .env_remove("RUST_LOG");
    cmd
}

fn fixture() -> TestPrompts {
    let fixture = TestPrompts::new();
    fixture.add_available("Solve Issue");
    fixture.add_available("Create PR");
    fixture
}

// ============================================================================
// Basic invocation
// ============================================================================

#[test]
fn test_help_lists_commands() {
    let fixture = fixture();
    chatmate(&fixture)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("install"))
        .stdout(predicate::str::contains("cleanup"));
}

#[test]
fn test_no_command_prints_hint() {
    let fixture = fixture();
    chatmate(&fixture)
        .assert()
        .success()
        .stdout(predicate::str::contains("chatmate --help"));
}

#[test]
fn test_paths_shows_resolved_directories() {
    let fixture = fixture();
    chatmate(&fixture)
        .arg("paths")
        .assert()
        .success()
        .stdout(predicate::str::contains(fixture.prompts_dir().display().to_string()))
        .stdout(predicate::str::contains(fixture.source_dir().display().to_string()));
}

// ============================================================================
// Install
// ============================================================================

#[test]
fn test_install_all_then_again_is_idempotent() {
    let fixture = fixture();

    chatmate(&fixture)
        .arg("install")
        .assert()
        .success()
        .stdout(predicate::str::contains("2 changed"));
    assert_eq!(fixture.installed_names(), vec!["Create PR", "Solve Issue"]);

    chatmate(&fixture)
        .arg("install")
        .assert()
        .success()
        .stdout(predicate::str::contains("already installed"))
        .stdout(predicate::str::contains("0 changed"));
}

#[test]
fn test_install_subset_by_name() {
    let fixture = fixture();

    chatmate(&fixture)
        .args(["install", "Solve Issue"])
        .assert()
        .success();

    assert_eq!(fixture.installed_names(), vec!["Solve Issue"]);
    fixture.assert_not_installed("Create PR");

    chatmate(&fixture)
        .args(["list", "--installed"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1 installed"));
}

#[test]
fn test_install_unknown_name_is_reported_not_fatal() {
    let fixture = fixture();

    chatmate(&fixture)
        .args(["install", "nothing-like-this", "pr"])
        .assert()
        .success()
        .stdout(predicate::str::contains("no available artifact matches 'nothing-like-this'"));

    assert_eq!(fixture.installed_names(), vec!["Create PR"]);
}

#[test]
fn test_force_restores_source_content() {
    let fixture = fixture();
    fixture.add_installed("Solve Issue", "---\ndescription: local edit\n---\n");

    chatmate(&fixture)
        .args(["install", "solve", "--force"])
        .assert()
        .success()
        .stdout(predicate::str::contains("reinstalled"));

    assert_eq!(
        fixture.read_installed("Solve Issue"),
        chatmode_content("Solve Issue")
    );
}

#[test]
fn test_invalid_artifact_fails_with_exit_code_one() {
    let fixture = fixture();
    fixture.add_available_with("Broken", &invalid_chatmode_content());

    chatmate(&fixture)
        .arg("install")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Broken.chatmode.md"))
        .stderr(predicate::str::contains("1 artifact(s) failed"));

    assert_eq!(fixture.installed_names(), vec!["Create PR", "Solve Issue"]);
}

#[test]
fn test_dry_run_install_leaves_destination_absent() {
    let fixture = fixture();

    chatmate(&fixture)
        .args(["install", "--dry-run"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Dry run"));

    assert!(!fixture.prompts_dir().exists());
}

#[test]
fn test_empty_source_falls_back_to_builtin_artifacts() {
    let fixture = TestPrompts::new();
    let missing = fixture.root().join("no-such-source");

    chatmate(&fixture)
        .env("CHATMATE_SOURCE_DIR", &missing)
        .arg("install")
        .assert()
        .success();

    assert!(!fixture.installed_names().is_empty());
}

// ============================================================================
// Uninstall and cleanup
// ============================================================================

#[test]
fn test_uninstall_all_keeps_user_files() {
    let fixture = fixture();
    chatmate(&fixture).arg("install").assert().success();
    fixture.add_installed("My Mode", &chatmode_content("mine"));

    chatmate(&fixture)
        .arg("uninstall")
        .assert()
        .success()
        .stdout(predicate::str::contains("My Mode.chatmode.md"))
        .stdout(predicate::str::contains("chatmate cleanup"));

    assert_eq!(fixture.installed_names(), vec!["My Mode"]);
}

#[test]
fn test_uninstall_unknown_name_is_reported() {
    let fixture = fixture();
    chatmate(&fixture).arg("install").assert().success();

    chatmate(&fixture)
        .args(["uninstall", "ghost"])
        .assert()
        .success()
        .stdout(predicate::str::contains("no installed artifact matches 'ghost'"));

    assert_eq!(fixture.installed_names(), vec!["Create PR", "Solve Issue"]);
}

#[test]
fn test_cleanup_removes_orphans_only() {
    let fixture = fixture();
    chatmate(&fixture).arg("install").assert().success();
    fixture.add_installed("My Mode", &chatmode_content("mine"));

    chatmate(&fixture)
        .args(["cleanup", "--dry-run"])
        .assert()
        .success();
    fixture.assert_installed("My Mode");

    chatmate(&fixture)
        .arg("cleanup")
        .assert()
        .success()
        .stdout(predicate::str::contains("orphan removed"));

    assert_eq!(fixture.installed_names(), vec!["Create PR", "Solve Issue"]);
}

// ============================================================================
// Queries
// ============================================================================

#[test]
fn test_list_shows_descriptions() {
    let fixture = TestPrompts::new();
    fixture.add_available_with("Solve Issue", &chatmode_content("Fix a reported bug"));

    chatmate(&fixture)
        .args(["list", "--available"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Solve Issue"))
        .stdout(predicate::str::contains("Fix a reported bug"))
        .stdout(predicate::str::contains("1 available"));
}

#[test]
fn test_list_json() {
    let fixture = fixture();
    chatmate(&fixture).args(["install", "create"]).assert().success();

    let output = chatmate(&fixture).args(["list", "--json"]).output().unwrap();
    assert!(output.status.success());

    let listing: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(listing["available"].as_array().unwrap().len(), 2);
    assert_eq!(listing["installed"][0]["name"], "Create PR");
    assert_eq!(listing["installed"][0]["orphan"], false);
}

#[test]
fn test_status_json_counts() {
    let fixture = fixture();
    chatmate(&fixture).args(["install", "solve"]).assert().success();
    fixture.add_installed("Mine", &chatmode_content("mine"));

    let output = chatmate(&fixture).args(["status", "--json"]).output().unwrap();
    assert!(output.status.success());

    let status: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(status["available"], 2);
    assert_eq!(status["installed"], 2);
    assert_eq!(status["managed"], 1);
    assert_eq!(status["orphaned"], 1);
    assert_eq!(status["pending"], 1);
}

#[test]
fn test_prompts_dir_flag_overrides_environment() {
    let fixture = fixture();
    let other = assert_fs::TempDir::new().unwrap();

    chatmate(&fixture)
        .args(["install", "solve", "--prompts-dir"])
        .arg(other.path())
        .assert()
        .success();

    assert!(other.path().join("Solve Issue.chatmode.md").is_file());
    assert!(!fixture.prompts_dir().exists());
}
