use crate::ui::formatter::short_hash;
use std::fmt;

/// Warnings about the shape of the history being published.
/// These are non-fatal issues that should be reported to the user.
#[derive(Debug, Clone, PartialEq)]
pub enum BoundaryWarning {
    /// HEAD does not descend from the target branch
    NoPathToTarget { target_branch: String },
    /// Paths exist but no commit on them carries a marker
    NoMarkers { prefix: String, path_count: usize },
    /// A head was skipped because its name is a placeholder
    IgnoredRef { reference: String, tip_hash: String },
    /// A merge commit carries a marker that does not produce a head
    MarkerOnMerge {
        commit_hash: String,
        reference: String,
    },
}

impl fmt::Display for BoundaryWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoundaryWarning::NoPathToTarget { target_branch } => {
                write!(
                    f,
                    "HEAD is not a descendant of '{}'; nothing to publish",
                    target_branch
                )
            }
            BoundaryWarning::NoMarkers {
                prefix,
                path_count,
            } => {
                write!(
                    f,
                    "No '{}=<branch>' markers found on {} path(s)",
                    prefix, path_count
                )
            }
            BoundaryWarning::IgnoredRef {
                reference,
                tip_hash,
            } => {
                write!(
                    f,
                    "Skipping placeholder branch name '{}' (tip {})",
                    reference,
                    short_hash(tip_hash)
                )
            }
            BoundaryWarning::MarkerOnMerge {
                commit_hash,
                reference,
            } => {
                write!(
                    f,
                    "Merge commit {} declares '{}'; markers on merge commits are ignored",
                    short_hash(commit_hash),
                    reference
                )
            }
        }
    }
}
