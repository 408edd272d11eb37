//! The PR stack algorithm
//!
//! - `paths` - enumerate ancestry paths from HEAD to the target branch
//! - `segments` - cut a path into marker-delimited windows and derive heads
//! - `publisher` - tag or push each distinct head once per run
//! - `reaper` - delete namespaced tags a dry run no longer produces

pub mod paths;
pub mod publisher;
pub mod reaper;
pub mod segments;

pub use paths::enumerate_paths;
pub use publisher::{PublishFailure, PublishMode, PublishReport, Publisher};
pub use reaper::{reap_stale_tags, ReapReport};
pub use segments::{extract_tips, suppressed_markers};
