use crate::error::{PrStackError, Result};
use git2::Oid;
use regex::Regex;

/// Matches marker lines of the form `<prefix>=<branch>` in commit messages
#[derive(Debug, Clone)]
pub struct MarkerPattern {
    prefix: String,
    regex: Regex,
}

impl MarkerPattern {
    /// Create a marker pattern for the given prefix.
    ///
    /// The prefix is matched literally at the start of a line; everything
    /// after the `=` up to the end of the line is the branch name.
    pub fn new(prefix: impl Into<String>) -> Result<Self> {
        let prefix = prefix.into();
        let regex = Regex::new(&format!(r"(?m)^{}=(.*?)\r?$", regex::escape(&prefix)))
            .map_err(|e| PrStackError::config(format!("Invalid marker prefix: {}", e)))?;
        Ok(MarkerPattern { prefix, regex })
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Find the branch declared by a commit message.
    ///
    /// Only the first marker line counts. An empty value declares nothing.
    pub fn branch_tag(&self, message: &str) -> Option<String> {
        let captures = self.regex.captures(message.trim())?;
        let value = captures.get(1)?.as_str();
        if value.is_empty() {
            None
        } else {
            Some(value.to_string())
        }
    }
}

/// A commit on a path between HEAD and the target branch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StackCommit {
    pub id: Oid,
    pub message: String,
    pub branch_tag: Option<String>,
    pub is_merge: bool,
}

impl StackCommit {
    /// Build a commit record from its raw message and parent count
    pub fn new(
        id: Oid,
        message: impl Into<String>,
        parent_count: usize,
        marker: &MarkerPattern,
    ) -> Self {
        let message = message.into();
        let branch_tag = marker.branch_tag(&message);
        StackCommit {
            id,
            message,
            branch_tag,
            is_merge: parent_count > 1,
        }
    }

    /// Stoppers close the current segment window
    pub fn is_stopper(&self) -> bool {
        self.branch_tag.is_some() || self.is_merge
    }

    /// First line of the message, for display
    pub fn summary(&self) -> &str {
        self.message.lines().next().unwrap_or("").trim()
    }
}

/// Commits strictly between source and target, nearest-source first
pub type CommitPath = Vec<StackCommit>;
