use crate::domain::{Head, StackCommit};

/// Derive the PR heads of one path.
///
/// Stoppers (marker commits and merges) cut the path into windows. Each
/// window runs from just after the previous stopper up to and including the
/// next one. A window closed by a non-merge marker commit becomes a head named
/// after the marker, pointing at the window's first (nearest-source) commit.
/// Windows closed by a merge produce nothing, even when the merge carries a
/// marker. Commits after the last stopper belong to no head.
pub fn extract_tips(path: &[StackCommit]) -> Vec<Head> {
    let mut tips = Vec::new();
    let mut window_start = 0;

    for (i, commit) in path.iter().enumerate() {
        if !commit.is_stopper() {
            continue;
        }

        if !commit.is_merge {
            if let Some(branch) = &commit.branch_tag {
                tips.push(Head::new(path[window_start].id, branch.clone()));
            }
        }

        window_start = i + 1;
    }

    tips
}

/// Merge commits on the path whose marker is ignored
pub fn suppressed_markers(path: &[StackCommit]) -> impl Iterator<Item = &StackCommit> {
    path.iter()
        .filter(|commit| commit.is_merge && commit.branch_tag.is_some())
}
