use thiserror::Error;

/// Unified error type for git-pr-stack operations
#[derive(Error, Debug)]
pub enum PrStackError {
    #[error("Git operation failed: {0}")]
    Git(#[from] git2::Error),

    #[error("History read failed: {0}")]
    History(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Tag error: {0}")]
    Tag(String),

    #[error("Remote operation failed: {0}")]
    Remote(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for Results in git-pr-stack
pub type Result<T> = std::result::Result<T, PrStackError>;

/// How the workflow reacts to an error.
///
/// Reads of commit history are foundational: without them no path can be
/// enumerated, so they end the run. Mutations are attempted once per head or
/// tag and a failure only affects that one ref.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    AbortRun,
    Continue,
}

impl PrStackError {
    /// Create a history read error with context
    pub fn history(msg: impl Into<String>) -> Self {
        PrStackError::History(msg.into())
    }

    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        PrStackError::Config(msg.into())
    }

    /// Create a tag error with context
    pub fn tag(msg: impl Into<String>) -> Self {
        PrStackError::Tag(msg.into())
    }

    /// Create a remote error with context
    pub fn remote(msg: impl Into<String>) -> Self {
        PrStackError::Remote(msg.into())
    }

    pub fn severity(&self) -> Severity {
        match self {
            PrStackError::Tag(_) | PrStackError::Remote(_) => Severity::Continue,
            PrStackError::Git(_)
            | PrStackError::History(_)
            | PrStackError::Config(_)
            | PrStackError::Io(_) => Severity::AbortRun,
        }
    }

    pub fn is_fatal(&self) -> bool {
        self.severity() == Severity::AbortRun
    }
}

impl From<toml::de::Error> for PrStackError {
    fn from(err: toml::de::Error) -> Self {
        PrStackError::Config(err.to_string())
    }
}
