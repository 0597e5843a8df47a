//! Per-item outcomes and operation reports

use std::fmt;
use std::path::PathBuf;

use serde::Serialize;

use crate::artifact::display_name;

/// Engine operation that produced a report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Operation {
    InstallAll,
    InstallSubset,
    UninstallAll,
    UninstallSubset,
    CleanupOrphans,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::InstallAll => "install all",
            Self::InstallSubset => "install",
            Self::UninstallAll => "uninstall all",
            Self::UninstallSubset => "uninstall",
            Self::CleanupOrphans => "cleanup orphans",
        };
        f.write_str(label)
    }
}

/// What happened to one artifact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "kebab-case")]
pub enum Outcome {
    Installed,
    /// Overwritten because `force` was set
    Reinstalled,
    /// Left untouched because it was present and `force` was not set
    AlreadyInstalled,
    Uninstalled,
    /// Nothing to delete
    NotInstalled,
    /// Deleted by orphan cleanup
    OrphanRemoved,
    /// Rejected locally; the batch carried on
    Failed { reason: String },
}

impl Outcome {
    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }

    /// Whether the destination changed (or would have, in a dry run).
    pub fn is_change(&self) -> bool {
        matches!(
            self,
            Self::Installed | Self::Reinstalled | Self::Uninstalled | Self::OrphanRemoved
        )
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Installed => f.write_str("installed"),
            Self::Reinstalled => f.write_str("reinstalled"),
            Self::AlreadyInstalled => f.write_str("already installed"),
            Self::Uninstalled => f.write_str("uninstalled"),
            Self::NotInstalled => f.write_str("not installed"),
            Self::OrphanRemoved => f.write_str("orphan removed"),
            Self::Failed { reason } => write!(f, "failed: {reason}"),
        }
    }
}

/// Outcome for one artifact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ItemReport {
    pub name: String,
    pub filename: String,
    #[serde(flatten)]
    pub outcome: Outcome,
}

/// Notes about how a requested name resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum RequestNote {
    /// Install request matched no available artifact
    NoMatch { request: String },
    /// Request matched several artifacts; all of them were processed
    MultipleMatches {
        request: String,
        matches: Vec<String>,
    },
    /// Uninstall request matched no installed artifact
    NotFound { request: String },
}

/// Everything one engine operation did, in order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OperationReport {
    pub operation: Operation,
    pub dry_run: bool,
    pub items: Vec<ItemReport>,
    pub notes: Vec<RequestNote>,
    /// Installed artifacts with no available counterpart, left in place.
    pub preserved_orphans: Vec<String>,
}

impl OperationReport {
    pub fn new(operation: Operation, dry_run: bool) -> Self {
        Self {
            operation,
            dry_run,
            items: Vec::new(),
            notes: Vec::new(),
            preserved_orphans: Vec::new(),
        }
    }

    pub fn push(&mut self, filename: &str, outcome: Outcome) {
        self.items.push(ItemReport {
            name: display_name(filename).to_string(),
            filename: filename.to_string(),
            outcome,
        });
    }

    pub fn note(&mut self, note: RequestNote) {
        self.notes.push(note);
    }

    /// Outcome recorded for `filename`, the last one if there are several.
    pub fn outcome_of(&self, filename: &str) -> Option<&Outcome> {
        self.items
            .iter()
            .rev()
            .find(|item| item.filename == filename)
            .map(|item| &item.outcome)
    }

    pub fn count(&self, predicate: impl Fn(&Outcome) -> bool) -> usize {
        self.items.iter().filter(|item| predicate(&item.outcome)).count()
    }

    pub fn count_of(&self, outcome: &Outcome) -> usize {
        self.count(|o| o == outcome)
    }

    pub fn failures(&self) -> impl Iterator<Item = &ItemReport> {
        self.items.iter().filter(|item| item.outcome.is_failure())
    }

    pub fn has_failures(&self) -> bool {
        self.failures().next().is_some()
    }

    pub fn changes(&self) -> usize {
        self.count(Outcome::is_change)
    }
}

/// One available artifact in a listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AvailableEntry {
    pub name: String,
    pub filename: String,
    pub description: Option<String>,
    pub installed: bool,
}

/// One installed artifact in a listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InstalledEntry {
    pub name: String,
    pub filename: String,
    /// No available artifact has this filename
    pub orphan: bool,
}

/// Result of a list query. Sections not requested are empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Listing {
    pub available: Vec<AvailableEntry>,
    pub installed: Vec<InstalledEntry>,
}

/// Counts describing the destination relative to the source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Status {
    pub destination: PathBuf,
    pub source: String,
    pub available: usize,
    pub installed: usize,
    /// Installed and still available
    pub managed: usize,
    /// Installed but no longer available
    pub orphaned: usize,
    /// Available but not installed
    pub pending: usize,
}
