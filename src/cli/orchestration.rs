//! Main workflow orchestration logic
//!
//! Runs the full pipeline against any [Repository]: enumerate paths from HEAD
//! to the target branch, derive heads per path, publish them, and after a dry
//! run sweep stale tags. Kept apart from `main.rs` so it can run against the
//! mock repository without clap or a real checkout.

use std::collections::{BTreeSet, HashSet};

use crate::boundary::BoundaryWarning;
use crate::config::Config;
use crate::domain::{Head, MarkerPattern};
use crate::error::Result;
use crate::git::Repository;
use crate::stack::{
    enumerate_paths, extract_tips, reap_stale_tags, suppressed_markers, PublishMode,
    PublishReport, Publisher, ReapReport,
};
use crate::ui;

/// Revision the stack is read from
pub const SOURCE_REVISION: &str = "HEAD";

/// Arguments for the stack workflow
///
/// Mirrors the CLI flags in a form that does not depend on clap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StackWorkflowArgs {
    /// Tag heads locally instead of pushing them
    pub dry_run: bool,
}

impl StackWorkflowArgs {
    pub fn mode(&self) -> PublishMode {
        if self.dry_run {
            PublishMode::Tag
        } else {
            PublishMode::Push
        }
    }
}

/// Result of a completed run
#[derive(Debug)]
pub struct WorkflowResult {
    pub mode: PublishMode,
    /// Number of paths between HEAD and the target branch
    pub path_count: usize,
    /// Every head derived, per path, in path order
    pub heads: Vec<Vec<Head>>,
    pub publish: PublishReport,
    /// Tags created this run; empty for live runs
    pub active_tags: BTreeSet<String>,
    /// Present after a dry run only
    pub reap: Option<ReapReport>,
    pub warnings: Vec<BoundaryWarning>,
}

impl WorkflowResult {
    /// Whether any best-effort mutation failed
    pub fn has_failures(&self) -> bool {
        !self.publish.failures.is_empty()
            || self
                .reap
                .as_ref()
                .is_some_and(|reap| !reap.failures.is_empty())
    }
}

/// Run the stack workflow.
///
/// # Returns
/// * `Ok(WorkflowResult)` - The run completed; individual tag, push or
///   delete failures are recorded in the result
/// * `Err` - A history read failed or the configuration is unusable
pub fn run_stack_workflow<R: Repository>(
    repo: &R,
    args: &StackWorkflowArgs,
    config: &Config,
) -> Result<WorkflowResult> {
    config.validate()?;
    let marker = MarkerPattern::new(config.prefix.clone())?;
    let namespace = config.tag_namespace();
    let mode = args.mode();

    let source = repo.resolve_commit(SOURCE_REVISION)?;
    let target = repo.resolve_commit(&config.target_branch)?;

    ui::display_status(&format!(
        "Reading commits from {} down to '{}'",
        SOURCE_REVISION, config.target_branch
    ));
    let paths = enumerate_paths(repo, &marker, source, target)?;

    let mut warnings = Vec::new();
    if paths.is_empty() {
        warnings.push(BoundaryWarning::NoPathToTarget {
            target_branch: config.target_branch.clone(),
        });
    }

    let mut publisher = Publisher::new(mode, config.remote.clone(), namespace.clone());
    let mut publish = PublishReport::default();
    let mut heads = Vec::with_capacity(paths.len());
    let mut seen_merges = HashSet::new();

    for (index, path) in paths.iter().enumerate() {
        for merge in suppressed_markers(path) {
            if seen_merges.insert(merge.id) {
                warnings.push(BoundaryWarning::MarkerOnMerge {
                    commit_hash: merge.id.to_string(),
                    reference: merge.branch_tag.clone().unwrap_or_default(),
                });
            }
        }

        let path_heads = extract_tips(path);
        ui::display_heads(index + 1, &path_heads);

        publish.absorb(publisher.publish(repo, &path_heads));
        heads.push(path_heads);
    }

    if !paths.is_empty() && heads.iter().all(Vec::is_empty) {
        warnings.push(BoundaryWarning::NoMarkers {
            prefix: config.prefix.clone(),
            path_count: paths.len(),
        });
    }
    for head in &publish.skipped_ignorable {
        warnings.push(BoundaryWarning::IgnoredRef {
            reference: head.reference.clone(),
            tip_hash: head.tip.to_string(),
        });
    }
    for warning in &warnings {
        ui::display_boundary_warning(warning);
    }
    ui::display_publish_report(mode, &publish);

    let active_tags = publisher.into_active_tags();
    let reap = match mode {
        PublishMode::Tag => {
            let report = reap_stale_tags(repo, &namespace, &active_tags)?;
            ui::display_reap_report(&report);
            Some(report)
        }
        PublishMode::Push => None,
    };

    Ok(WorkflowResult {
        mode,
        path_count: paths.len(),
        heads,
        publish,
        active_tags,
        reap,
        warnings,
    })
}
