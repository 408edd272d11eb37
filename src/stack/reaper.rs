use crate::domain::TagNamespace;
use crate::error::{PrStackError, Result};
use crate::git::Repository;
use crate::ui;
use std::collections::BTreeSet;

/// Outcome of a stale tag sweep
#[derive(Debug, Default)]
pub struct ReapReport {
    pub deleted: Vec<String>,
    pub kept: Vec<String>,
    pub failures: Vec<(String, PrStackError)>,
}

/// Delete every namespaced tag that the last dry run did not re-create.
///
/// `active` must hold the full set of tags produced by the run; any other
/// tag in the namespace belongs to a segment that no longer exists. Tags
/// outside the namespace are never touched.
///
/// # Returns
/// * `Ok(report)` - Deleted, kept and failed tags; deletion failures are
///   logged and do not stop the sweep
/// * `Err` - If the tag list cannot be read
pub fn reap_stale_tags<R: Repository>(
    repo: &R,
    namespace: &TagNamespace,
    active: &BTreeSet<String>,
) -> Result<ReapReport> {
    let mut report = ReapReport::default();

    let tags = repo.list_tags(&namespace.tag_prefix())?;

    for tag in tags.into_iter().filter(|tag| namespace.contains(tag)) {
        if active.contains(&tag) {
            report.kept.push(tag);
            continue;
        }

        ui::display_status(&format!("git tag --delete {}", tag));
        match repo.delete_tag(&tag) {
            Ok(()) => report.deleted.push(tag),
            Err(error) => {
                ui::display_error(&format!("Failed to delete tag '{}': {}", tag, error));
                report.failures.push((tag, error));
            }
        }
    }

    Ok(report)
}
