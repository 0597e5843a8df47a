//! Cleanup command implementation

use super::{Context, render};
use crate::error::Result;

/// Delete installed artifacts that are no longer available.
pub fn run_cleanup(context: &Context, dry_run: bool) -> Result<()> {
    render::finish(context.engine(dry_run).cleanup_orphans())
}
