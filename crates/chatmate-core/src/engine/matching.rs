//! Resolution of user-supplied names against a set of filenames
//!
//! A request matches a filename when the request, lowercased, is a
//! substring of the lowercased display name, or when `request` or
//! `request + ".chatmode.md"` equals the filename exactly. Every match is
//! returned; ambiguous requests are never narrowed to one pick.

use chatmate_fs::sanitize_input;

use crate::artifact::{display_name, filename_for};

/// Filenames in `candidates` matched by `request`, in candidate order.
pub fn resolve(request: &str, candidates: &[String]) -> Vec<String> {
    let request = sanitize_input(request);
    // An empty needle would substring-match everything
    if request.is_empty() {
        return Vec::new();
    }

    let needle = request.to_lowercase();
    let exact = filename_for(&request);
    candidates
        .iter()
        .filter(|filename| {
            **filename == exact
                || **filename == request
                || display_name(filename).to_lowercase().contains(&needle)
        })
        .cloned()
        .collect()
}
