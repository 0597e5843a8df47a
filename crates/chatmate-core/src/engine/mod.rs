//! ReconciliationEngine implementation
//!
//! The engine reconciles the available set (from an [`ArtifactSource`]) with
//! the installed set (the destination directory). Sets are read fresh at the
//! start of every operation and artifacts are processed one at a time, in
//! sorted order, each one fully before the next.
//!
//! Bulk uninstall only ever removes installed artifacts that are also
//! available. Installed files with no available counterpart (orphans, often
//! user-authored) are reported and kept; only [`ReconciliationEngine::cleanup_orphans`]
//! deletes them.
//!
//! Per-item validation and content failures are recorded and the batch goes
//! on. I/O and confinement failures abort the batch with
//! [`Error::BatchAborted`], which carries the partial report; nothing that
//! was already applied is rolled back.
//!
//! There is no coordination between concurrent invocations on the same
//! destination. Each artifact is an independent file written atomically, so
//! the worst case is one lost update per file: last writer wins.

mod matching;
mod report;

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use chatmate_fs::{DeleteOutcome, SafeStore};

pub use matching::resolve;
pub use report::{
    AvailableEntry, InstalledEntry, ItemReport, Listing, Operation, OperationReport, Outcome,
    RequestNote, Status,
};

use crate::artifact::{display_name, parse_description};
use crate::config::ResolvedConfig;
use crate::installed::InstalledSet;
use crate::source::{ArtifactSource, select_source};
use crate::{ArtifactSet, Error, Result};

/// Options for mutating operations
#[derive(Debug, Clone, Copy, Default)]
pub struct EngineOptions {
    /// Compute and report transitions without writing or deleting anything.
    pub dry_run: bool,
}

/// Orchestrates install, uninstall, cleanup and list operations.
pub struct ReconciliationEngine {
    source: Box<dyn ArtifactSource>,
    installed: InstalledSet,
    store: SafeStore,
    destination: PathBuf,
    options: EngineOptions,
}

impl ReconciliationEngine {
    /// Create an engine over `source` writing into `destination`.
    pub fn new(source: Box<dyn ArtifactSource>, destination: impl Into<PathBuf>) -> Self {
        let destination = destination.into();
        let store = SafeStore::new();
        Self {
            source,
            installed: InstalledSet::new(destination.clone(), store.clone()),
            store,
            destination,
            options: EngineOptions::default(),
        }
    }

    /// Create an engine from resolved configuration.
    ///
    /// The external source directory is used when it exists, otherwise the
    /// embedded table. The choice is made here, once.
    pub fn from_config(config: &ResolvedConfig) -> Self {
        if config.source_dir_explicit
            && let Some(dir) = &config.source_dir
            && !dir.is_dir()
        {
            tracing::warn!(
                dir = %dir.display(),
                "configured source directory does not exist, using embedded artifacts"
            );
        }
        let source = select_source(config.source_dir.as_deref());
        Self::new(source, config.prompts_dir.clone())
    }

    pub fn with_options(mut self, options: EngineOptions) -> Self {
        self.options = options;
        self
    }

    /// Replace the store, e.g. to tune lock timeouts.
    pub fn with_store(mut self, store: SafeStore) -> Self {
        self.installed = InstalledSet::new(self.destination.clone(), store.clone());
        self.store = store;
        self
    }

    pub fn destination(&self) -> &Path {
        &self.destination
    }

    pub fn source_description(&self) -> String {
        self.source.describe()
    }

    pub fn options(&self) -> EngineOptions {
        self.options
    }

    /// Current available set.
    pub fn available(&self) -> Result<ArtifactSet> {
        self.source.list()
    }

    /// Current installed set.
    pub fn installed(&self) -> Result<ArtifactSet> {
        self.installed.list()
    }

    /// Install every available artifact.
    ///
    /// # Errors
    ///
    /// [`Error::NoArtifactsAvailable`] when the source is empty, and
    /// [`Error::BatchAborted`] on the first fatal per-item failure.
    pub fn install_all(&self, force: bool) -> Result<OperationReport> {
        if !self.options.dry_run {
            self.store.ensure_directory(&self.destination)?;
        }

        let available = self.available()?;
        if available.is_empty() {
            return Err(Error::NoArtifactsAvailable {
                origin: self.source.describe(),
            });
        }

        let mut installed = self.installed_names()?;
        let mut report = OperationReport::new(Operation::InstallAll, self.options.dry_run);
        for filename in available.sorted() {
            self.install_one(&filename, force, &mut installed, &mut report)?;
        }

        tracing::info!(
            changed = report.changes(),
            total = report.items.len(),
            dry_run = self.options.dry_run,
            "install all finished"
        );
        Ok(report)
    }

    /// Install the artifacts matched by `requests`.
    ///
    /// Each request is resolved with [`resolve`]. No match is noted and
    /// skipped; several matches are all installed and noted.
    pub fn install_subset<S: AsRef<str>>(
        &self,
        requests: &[S],
        force: bool,
    ) -> Result<OperationReport> {
        let candidates = self.available()?.sorted();
        let mut installed = self.installed_names()?;
        let mut report = OperationReport::new(Operation::InstallSubset, self.options.dry_run);

        for request in requests {
            let request = request.as_ref();
            let matches = resolve(request, &candidates);
            match matches.len() {
                0 => {
                    tracing::warn!(%request, "no available artifact matches");
                    report.note(RequestNote::NoMatch {
                        request: request.to_string(),
                    });
                }
                1 => {}
                _ => {
                    tracing::debug!(%request, ?matches, "request matched several artifacts");
                    report.note(RequestNote::MultipleMatches {
                        request: request.to_string(),
                        matches: matches.clone(),
                    });
                }
            }
            for filename in &matches {
                self.install_one(filename, force, &mut installed, &mut report)?;
            }
        }
        Ok(report)
    }

    /// Uninstall every installed artifact that is also available.
    ///
    /// Installed artifacts with no available counterpart are listed in
    /// [`OperationReport::preserved_orphans`] and left on disk.
    pub fn uninstall_all(&self) -> Result<OperationReport> {
        let available = self.available()?;
        let installed = self.installed()?;
        let mut report = OperationReport::new(Operation::UninstallAll, self.options.dry_run);

        let removal = installed.intersection(&available);
        report.preserved_orphans = installed.difference(&available);
        for orphan in &report.preserved_orphans {
            tracing::info!(filename = %orphan, "preserving artifact with no available counterpart");
        }

        let mut removed = HashSet::new();
        for filename in removal {
            self.uninstall_one(&filename, Outcome::Uninstalled, &mut removed, &mut report)?;
        }
        Ok(report)
    }

    /// Uninstall the installed artifacts matched by `requests`.
    pub fn uninstall_subset<S: AsRef<str>>(&self, requests: &[S]) -> Result<OperationReport> {
        let candidates = self.installed()?.sorted();
        let mut report = OperationReport::new(Operation::UninstallSubset, self.options.dry_run);
        let mut removed = HashSet::new();

        for request in requests {
            let request = request.as_ref();
            let matches = resolve(request, &candidates);
            match matches.len() {
                0 => {
                    tracing::warn!(%request, "no installed artifact matches");
                    report.note(RequestNote::NotFound {
                        request: request.to_string(),
                    });
                }
                1 => {}
                _ => report.note(RequestNote::MultipleMatches {
                    request: request.to_string(),
                    matches: matches.clone(),
                }),
            }
            for filename in &matches {
                self.uninstall_one(filename, Outcome::Uninstalled, &mut removed, &mut report)?;
            }
        }
        Ok(report)
    }

    /// Delete installed artifacts that have no available counterpart.
    ///
    /// This is the only operation that removes orphans.
    pub fn cleanup_orphans(&self) -> Result<OperationReport> {
        let available = self.available()?;
        let installed = self.installed()?;
        let mut report = OperationReport::new(Operation::CleanupOrphans, self.options.dry_run);

        let mut removed = HashSet::new();
        for filename in installed.difference(&available) {
            self.uninstall_one(&filename, Outcome::OrphanRemoved, &mut removed, &mut report)?;
        }
        Ok(report)
    }

    /// Read-only listing of available and/or installed artifacts.
    pub fn list(&self, show_available: bool, show_installed: bool) -> Result<Listing> {
        let available = self.available()?;
        let installed = self.installed()?;
        let mut listing = Listing::default();

        if show_available {
            listing.available = available
                .sorted()
                .into_iter()
                .map(|filename| {
                    let description = self
                        .source
                        .read(&filename)
                        .ok()
                        .and_then(|content| parse_description(&content));
                    AvailableEntry {
                        name: display_name(&filename).to_string(),
                        installed: installed.contains(&filename),
                        description,
                        filename,
                    }
                })
                .collect();
        }

        if show_installed {
            listing.installed = installed
                .sorted()
                .into_iter()
                .map(|filename| InstalledEntry {
                    name: display_name(&filename).to_string(),
                    orphan: !available.contains(&filename),
                    filename,
                })
                .collect();
        }
        Ok(listing)
    }

    /// Summary counts of the two sets.
    pub fn status(&self) -> Result<Status> {
        let available = self.available()?;
        let installed = self.installed()?;
        Ok(Status {
            destination: self.destination.clone(),
            source: self.source.describe(),
            available: available.len(),
            installed: installed.len(),
            managed: installed.intersection(&available).len(),
            orphaned: installed.difference(&available).len(),
            pending: available.difference(&installed).len(),
        })
    }

    fn installed_names(&self) -> Result<HashSet<String>> {
        Ok(self.installed()?.filenames().iter().cloned().collect())
    }

    fn install_one(
        &self,
        filename: &str,
        force: bool,
        installed: &mut HashSet<String>,
        report: &mut OperationReport,
    ) -> Result<()> {
        let present = installed.contains(filename);
        if present && !force {
            tracing::debug!(%filename, "already installed, skipping");
            report.push(filename, Outcome::AlreadyInstalled);
            return Ok(());
        }

        let written = self.source.load(filename).and_then(|artifact| {
            if !self.options.dry_run {
                self.store
                    .write_file(&self.destination, artifact.filename(), artifact.content())?;
            }
            Ok(())
        });

        match written {
            Ok(()) => {
                installed.insert(filename.to_string());
                let outcome = if present {
                    Outcome::Reinstalled
                } else {
                    Outcome::Installed
                };
                tracing::info!(%filename, %outcome, dry_run = self.options.dry_run);
                report.push(filename, outcome);
                Ok(())
            }
            Err(error) => self.record_failure(filename, error, report),
        }
    }

    fn uninstall_one(
        &self,
        filename: &str,
        removed_outcome: Outcome,
        removed: &mut HashSet<String>,
        report: &mut OperationReport,
    ) -> Result<()> {
        if removed.contains(filename) {
            report.push(filename, Outcome::NotInstalled);
            return Ok(());
        }

        let deleted = if self.options.dry_run {
            Ok(DeleteOutcome::Deleted)
        } else {
            self.store
                .delete_file(&self.destination, filename)
                .map_err(Error::from)
        };

        match deleted {
            Ok(DeleteOutcome::Deleted) => {
                removed.insert(filename.to_string());
                tracing::info!(%filename, outcome = %removed_outcome, dry_run = self.options.dry_run);
                report.push(filename, removed_outcome);
                Ok(())
            }
            Ok(DeleteOutcome::AlreadyAbsent) => {
                removed.insert(filename.to_string());
                report.push(filename, Outcome::NotInstalled);
                Ok(())
            }
            Err(error) => self.record_failure(filename, error, report),
        }
    }

    /// Record a local failure, or abort the batch for a fatal one.
    fn record_failure(
        &self,
        filename: &str,
        error: Error,
        report: &mut OperationReport,
    ) -> Result<()> {
        if error.is_fatal() {
            tracing::error!(%filename, %error, operation = %report.operation, "aborting batch");
            return Err(Error::BatchAborted {
                operation: report.operation,
                filename: filename.to_string(),
                report: Box::new(report.clone()),
                source: Box::new(error),
            });
        }

        tracing::warn!(%filename, %error, "artifact skipped");
        report.push(
            filename,
            Outcome::Failed {
                reason: error.to_string(),
            },
        );
        Ok(())
    }
}
