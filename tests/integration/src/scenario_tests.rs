//! End-to-end scenarios across chatmate-fs and chatmate-core
//!
//! Each test drives the engine the way the CLI does: resolve configuration,
//! build an engine from it, run one operation, then inspect the destination
//! directly on disk.

use chatmate_core::{
    ConfigResolver, EngineOptions, Error, Outcome, Platform, PlatformEnv, ReconciliationEngine,
    Settings,
};
use chatmate_test_utils::{TestPrompts, chatmode_content};
use pretty_assertions::assert_eq;
use std::fs;

/// Engine built through the full configuration path, with flags pointing at
/// the fixture.
fn engine_for(fixture: &TestPrompts) -> ReconciliationEngine {
    let config = ConfigResolver::new()
        .without_env()
        .with_config_dir(fixture.root().join("config"))
        .with_platform(
            Platform::Linux,
            PlatformEnv {
                home: Some(fixture.root().join("home")),
                appdata: None,
            },
        )
        .with_overrides(Settings {
            source_dir: Some(fixture.source_dir()),
            prompts_dir: Some(fixture.prompts_dir()),
        })
        .resolve()
        .unwrap();
    ReconciliationEngine::from_config(&config)
}

#[test]
fn test_install_subset_then_list_counts_one() {
    let fixture = TestPrompts::new();
    fixture.add_available("Solve Issue");
    fixture.add_available("Create PR");
    let engine = engine_for(&fixture);

    let report = engine.install_subset(&["Solve Issue"], false).unwrap();

    assert_eq!(report.count_of(&Outcome::Installed), 1);
    fixture.assert_installed("Solve Issue");
    fixture.assert_not_installed("Create PR");

    let listing = engine.list(false, true).unwrap();
    assert_eq!(listing.installed.len(), 1);
    assert_eq!(listing.installed[0].filename, "Solve Issue.chatmode.md");
}

#[test]
fn test_install_all_twice_leaves_identical_destination() {
    let fixture = TestPrompts::new();
    fixture.add_available("Solve Issue");
    fixture.add_available("Create PR");
    fixture.add_available("Code Review");
    let engine = engine_for(&fixture);

    engine.install_all(false).unwrap();
    let first = fixture.destination_entries();
    let second = engine.install_all(false).unwrap();

    assert_eq!(fixture.destination_entries(), first);
    assert_eq!(second.count_of(&Outcome::AlreadyInstalled), 3);
    assert_eq!(second.changes(), 0);
}

#[test]
fn test_uninstall_all_leaves_exactly_the_orphan() {
    let fixture = TestPrompts::new();
    fixture.add_available("A");
    fixture.add_available("B");
    fixture.add_installed("A", &chatmode_content("A"));
    fixture.add_installed("B", &chatmode_content("B"));
    fixture.add_installed("ORPHAN", &chatmode_content("user authored"));

    let report = engine_for(&fixture).uninstall_all().unwrap();

    assert_eq!(fixture.destination_entries(), vec!["ORPHAN.chatmode.md"]);
    assert_eq!(report.preserved_orphans, vec!["ORPHAN.chatmode.md"]);
}

#[test]
fn test_force_replaces_bytes_exactly() {
    let fixture = TestPrompts::new();
    let new_content = "---\ndescription: 'v2'\n---\nbody with trailing spaces   \n\n";
    fixture.add_available_with("Solve Issue", new_content);
    fixture.add_installed("Solve Issue", "---\ndescription: 'v1'\n---\n");
    let engine = engine_for(&fixture);

    let kept = engine.install_all(false).unwrap();
    assert_eq!(
        kept.outcome_of("Solve Issue.chatmode.md"),
        Some(&Outcome::AlreadyInstalled)
    );
    assert_eq!(
        fixture.read_installed("Solve Issue"),
        "---\ndescription: 'v1'\n---\n"
    );

    engine.install_all(true).unwrap();
    assert_eq!(
        fs::read(fixture.installed_path("Solve Issue")).unwrap(),
        new_content.as_bytes()
    );
}

#[test]
fn test_full_lifecycle_with_cleanup() {
    let fixture = TestPrompts::new();
    fixture.add_available("Solve Issue");
    fixture.add_available("Create PR");
    let engine = engine_for(&fixture);

    engine.install_all(false).unwrap();
    fixture.remove_available("Create PR");

    let status = engine.status().unwrap();
    assert_eq!((status.managed, status.orphaned, status.pending), (1, 1, 0));

    let uninstall = engine.uninstall_all().unwrap();
    assert_eq!(uninstall.preserved_orphans, vec!["Create PR.chatmode.md"]);
    fixture.assert_installed("Create PR");

    let cleanup = engine.cleanup_orphans().unwrap();
    assert_eq!(cleanup.count_of(&Outcome::OrphanRemoved), 1);
    assert!(fixture.installed_names().is_empty());
}

#[test]
fn test_dry_run_reports_match_real_run() {
    let fixture = TestPrompts::new();
    fixture.add_available("Solve Issue");
    fixture.add_available("Create PR");
    fixture.add_installed("Create PR", &chatmode_content("Create PR"));
    let engine = engine_for(&fixture);

    let preview = engine_for(&fixture)
        .with_options(EngineOptions { dry_run: true })
        .install_all(false)
        .unwrap();
    assert_eq!(fixture.installed_names(), vec!["Create PR"]);

    let applied = engine.install_all(false).unwrap();
    assert_eq!(preview.items, applied.items);
    assert!(preview.dry_run);
    assert!(!applied.dry_run);
}

#[test]
fn test_config_file_selects_source_and_destination() {
    let fixture = TestPrompts::new();
    fixture.add_available("From File");
    let config_dir = fixture.root().join("config");
    fs::create_dir_all(&config_dir).unwrap();
    fs::write(
        config_dir.join("config.json"),
        serde_json::json!({
            "source_dir": fixture.source_dir(),
            "prompts_dir": fixture.prompts_dir(),
        })
        .to_string(),
    )
    .unwrap();

    let config = ConfigResolver::new()
        .without_env()
        .with_config_dir(&config_dir)
        .resolve()
        .unwrap();
    assert_eq!(config.config_file, Some(config_dir.join("config.json")));

    ReconciliationEngine::from_config(&config)
        .install_all(false)
        .unwrap();
    fixture.assert_installed("From File");
}

#[test]
fn test_default_destination_follows_platform_layout() {
    let fixture = TestPrompts::new();
    let home = fixture.root().join("home");

    let config = ConfigResolver::new()
        .without_env()
        .with_config_dir(fixture.root().join("config"))
        .with_platform(
            Platform::MacOs,
            PlatformEnv {
                home: Some(home.clone()),
                appdata: None,
            },
        )
        .resolve()
        .unwrap();

    assert_eq!(
        config.prompts_dir,
        home.join("Library/Application Support/Code/User/prompts")
    );
}

#[test]
fn test_missing_home_is_an_error() {
    let fixture = TestPrompts::new();
    let result = ConfigResolver::new()
        .without_env()
        .with_config_dir(fixture.root().join("config"))
        .with_platform(
            Platform::Linux,
            PlatformEnv {
                home: None,
                appdata: None,
            },
        )
        .resolve();

    assert!(matches!(result, Err(Error::HomeDirNotFound)));
}

#[test]
fn test_report_json_shape() {
    let fixture = TestPrompts::new();
    fixture.add_available("Solve Issue");

    let report = engine_for(&fixture)
        .install_subset(&["solve", "missing"], false)
        .unwrap();
    let json = serde_json::to_value(&report).unwrap();

    assert_eq!(json["operation"], "install-subset");
    assert_eq!(json["items"][0]["filename"], "Solve Issue.chatmode.md");
    assert_eq!(json["items"][0]["status"], "installed");
    assert_eq!(json["notes"][0]["kind"], "no-match");
    assert_eq!(json["notes"][0]["request"], "missing");
}
