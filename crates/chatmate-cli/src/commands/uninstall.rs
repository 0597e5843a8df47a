//! Uninstall command implementation

use super::{Context, render};
use crate::error::Result;

/// Uninstall every managed artifact, or only the ones matching `names`.
pub fn run_uninstall(context: &Context, names: &[String], dry_run: bool) -> Result<()> {
    let engine = context.engine(dry_run);
    let result = if names.is_empty() {
        engine.uninstall_all()
    } else {
        engine.uninstall_subset(names)
    };
    render::finish(result)
}
