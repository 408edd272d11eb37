//! Domain logic - pure rules for markers, heads and tag names, independent of git operations

pub mod commit;
pub mod head;
pub mod tag;

pub use commit::{CommitPath, MarkerPattern, StackCommit};
pub use head::{is_ignorable_ref, Head};
pub use tag::TagNamespace;
