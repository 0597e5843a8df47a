//! Install command implementation

use super::{Context, render};
use crate::error::Result;

/// Install everything, or only the artifacts matching `names`.
pub fn run_install(context: &Context, names: &[String], force: bool, dry_run: bool) -> Result<()> {
    let engine = context.engine(dry_run);
    let result = if names.is_empty() {
        engine.install_all(force)
    } else {
        engine.install_subset(names, force)
    };
    render::finish(result)
}
