//! Pure formatting functions for UI output.
//!
//! Functions here build strings and have no I/O side effects, so they can be
//! tested directly. Printing lives in the parent module.

use crate::domain::Head;
use crate::stack::{PublishMode, PublishReport, ReapReport};
use console::style;

/// Short form of a commit hash for display
pub fn short_hash(hash: &str) -> &str {
    if hash.len() > 7 {
        &hash[..7]
    } else {
        hash
    }
}

/// One line per derived head, e.g. `login-form  abc1234`
pub fn format_head_line(head: &Head) -> String {
    let hash = head.tip.to_string();
    format!(
        "{}  {}",
        style(&head.reference).cyan(),
        style(short_hash(&hash)).dim()
    )
}

/// Summary line for the publish phase
pub fn format_publish_summary(mode: PublishMode, report: &PublishReport) -> String {
    let verb = match mode {
        PublishMode::Tag => "Tagged",
        PublishMode::Push => "Pushed",
    };
    let mut parts = vec![format!("{} {}", verb, report.published.len())];
    if !report.skipped_duplicate.is_empty() {
        parts.push(format!("{} duplicate", report.skipped_duplicate.len()));
    }
    if !report.skipped_ignorable.is_empty() {
        parts.push(format!("{} ignored", report.skipped_ignorable.len()));
    }
    if !report.failures.is_empty() {
        parts.push(format!("{} failed", report.failures.len()));
    }
    parts.join(", ")
}

/// Summary line for the reap phase
pub fn format_reap_summary(report: &ReapReport) -> String {
    let mut summary = format!(
        "Removed {} stale tag(s), kept {}",
        report.deleted.len(),
        report.kept.len()
    );
    if !report.failures.is_empty() {
        summary.push_str(&format!(", {} failed", report.failures.len()));
    }
    summary
}
