//! User interface module - console output for a run.
//!
//! Separates concerns:
//! - `formatter` - Pure formatting functions
//! - This module - Printing to stdout/stderr

use console::style;

use crate::boundary::BoundaryWarning;
use crate::domain::Head;
use crate::stack::{PublishMode, PublishReport, ReapReport};

pub mod formatter;

/// Print an error message in red to stderr.
pub fn display_error(message: &str) {
    eprintln!("{} {}", style("ERROR:").red(), message);
}

/// Print a success message with a green checkmark.
pub fn display_success(message: &str) {
    println!("{} {}", style("✓").green(), message);
}

/// Print a status message with a yellow arrow.
pub fn display_status(message: &str) {
    println!("{} {}", style("→").yellow(), message);
}

/// Print a boundary warning to stderr.
pub fn display_boundary_warning(warning: &BoundaryWarning) {
    eprintln!("{} {}", style("⚠ WARNING:").yellow(), warning);
}

/// Print the heads derived from one path.
///
/// # Arguments
/// * `index` - 1-based position of the path
/// * `heads` - Heads in publication order
pub fn display_heads(index: usize, heads: &[Head]) {
    if heads.is_empty() {
        println!("  path {}: no segments", index);
        return;
    }
    println!("  {}", style(format!("path {}:", index)).bold());
    for head in heads {
        println!("    {}", formatter::format_head_line(head));
    }
}

/// Print the outcome of the publish phase.
pub fn display_publish_report(mode: PublishMode, report: &PublishReport) {
    let summary = formatter::format_publish_summary(mode, report);
    if report.failures.is_empty() {
        display_success(&summary);
    } else {
        display_error(&summary);
        for failure in &report.failures {
            eprintln!("  - {}: {}", failure.head, failure.error);
        }
    }
}

/// Print the outcome of the stale tag sweep.
pub fn display_reap_report(report: &ReapReport) {
    let summary = formatter::format_reap_summary(report);
    if report.failures.is_empty() {
        display_success(&summary);
    } else {
        display_error(&summary);
        for (tag, error) in &report.failures {
            eprintln!("  - {}: {}", tag, error);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_error() {
        // Visual verification test - output is printed to stderr
        display_error("test error");
    }

    #[test]
    fn test_display_status() {
        // Visual verification test - output is printed to stdout
        display_status("test status");
    }

    #[test]
    fn test_display_reports() {
        display_publish_report(PublishMode::Tag, &PublishReport::default());
        display_reap_report(&ReapReport::default());
        display_heads(1, &[]);
    }
}
