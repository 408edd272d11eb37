use git2::Oid;
use std::fmt;

/// Ref names that never get published
const IGNORED_REFS: [&str; 3] = ["", "null", "nil"];

/// A derived PR branch: its name and the commit it should point at
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Head {
    pub tip: Oid,
    pub reference: String,
}

impl Head {
    pub fn new(tip: Oid, reference: impl Into<String>) -> Self {
        Head {
            tip,
            reference: reference.into(),
        }
    }

    /// Whether the ref name is a placeholder such as `null` or `nil`.
    ///
    /// Comparison is case-insensitive.
    pub fn is_ignorable(&self) -> bool {
        is_ignorable_ref(&self.reference)
    }
}

pub fn is_ignorable_ref(reference: &str) -> bool {
    let lowered = reference.to_lowercase();
    IGNORED_REFS.contains(&lowered.as_str())
}

impl fmt::Display for Head {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let hash = self.tip.to_string();
        write!(f, "{} -> {}", self.reference, &hash[..7])
    }
}
