//! Shared rendering of operation reports

use chatmate_core::{Error, OperationReport, Outcome, RequestNote};
use colored::{ColoredString, Colorize};

use crate::error::{CliError, Result};

fn marker(outcome: &Outcome) -> ColoredString {
    match outcome {
        Outcome::Installed | Outcome::Reinstalled => "+".green(),
        Outcome::Uninstalled | Outcome::OrphanRemoved => "-".red(),
        Outcome::AlreadyInstalled | Outcome::NotInstalled => "=".dimmed(),
        Outcome::Failed { .. } => "x".red().bold(),
    }
}

fn label(outcome: &Outcome) -> ColoredString {
    let text = outcome.to_string();
    match outcome {
        Outcome::Installed | Outcome::Reinstalled => text.green(),
        Outcome::Uninstalled | Outcome::OrphanRemoved => text.yellow(),
        Outcome::AlreadyInstalled | Outcome::NotInstalled => text.dimmed(),
        Outcome::Failed { .. } => text.red(),
    }
}

/// Print every item, note and preserved orphan, then a summary line.
pub fn print_report(report: &OperationReport) {
    if report.dry_run {
        println!("{}", "Dry run: no files were changed".yellow().bold());
    }

    for note in &report.notes {
        match note {
            RequestNote::NoMatch { request } => {
                println!("  {} no available artifact matches '{}'", "?".yellow(), request);
            }
            RequestNote::NotFound { request } => {
                println!("  {} no installed artifact matches '{}'", "?".yellow(), request);
            }
            RequestNote::MultipleMatches { request, matches } => {
                println!(
                    "  {} '{}' matched {} artifacts",
                    "!".yellow(),
                    request,
                    matches.len()
                );
            }
        }
    }

    for item in &report.items {
        println!(
            "  {} {} ({})",
            marker(&item.outcome),
            item.name.cyan(),
            label(&item.outcome)
        );
    }

    if !report.preserved_orphans.is_empty() {
        println!();
        println!(
            "{} installed artifact(s) have no available counterpart and were kept:",
            report.preserved_orphans.len()
        );
        for orphan in &report.preserved_orphans {
            println!("  {} {}", "=".dimmed(), orphan);
        }
        println!("Run {} to remove them.", "chatmate cleanup".cyan());
    }

    let failed = report.failures().count();
    println!();
    println!(
        "{} {} changed, {} failed, {} total",
        report.operation.to_string().bold(),
        report.changes(),
        failed,
        report.items.len()
    );
}

/// Render the result of a mutating operation and map it to the exit status.
///
/// A batch that aborted still prints the transitions it applied before the
/// error is returned.
pub fn finish(result: chatmate_core::Result<OperationReport>) -> Result<()> {
    if let Err(Error::BatchAborted { report, .. }) = &result {
        print_report(report);
    }
    let report = result?;
    print_report(&report);

    let failed = report.failures().count();
    if failed > 0 {
        for item in report.failures() {
            eprintln!("{} {}: {}", "x".red().bold(), item.filename, item.outcome);
        }
        return Err(CliError::ItemsFailed { count: failed });
    }
    Ok(())
}
