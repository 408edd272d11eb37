//! Git operations abstraction layer
//!
//! This module provides a trait-based abstraction over the Git operations
//! git-pr-stack needs, allowing the stack algorithm to run against a real
//! repository or an in-memory mock.
//!
//! # Overview
//!
//! The [Repository] trait has a read half (resolving refs, reading parents
//! and messages, listing tags) and a mutating half (creating and deleting
//! tags, force-pushing branches). The concrete implementations are:
//!
//! - [repository::Git2Repository]: A real implementation using the `git2` crate
//! - [mock::MockRepository]: A mock implementation for testing
//!
//! # Usage
//!
//! Code in [crate::stack] depends on the [Repository] trait only.
//!
//! ```rust
//! # use git_pr_stack::git::Repository;
//! # fn example<R: Repository>(repo: &R) -> Result<(), Box<dyn std::error::Error>> {
//! let head = repo.resolve_commit("HEAD")?;
//! for parent in repo.parents_of(head)? {
//!     println!("{}: {}", parent, repo.message_of(parent)?);
//! }
//! # Ok(())
//! # }
//! ```

pub mod mock;
pub mod repository;

pub use mock::MockRepository;
pub use repository::Git2Repository;

use crate::error::Result;
use git2::Oid;

/// Common git operation trait for abstraction
///
/// ## Error Handling
///
/// Read methods report failures as [crate::error::PrStackError::History] or
/// [crate::error::PrStackError::Git]; both abort the run. Mutating methods
/// report [crate::error::PrStackError::Tag] or
/// [crate::error::PrStackError::Remote], which callers log and move past.
///
/// ## Implementations
///
/// - [Git2Repository](repository::Git2Repository): Real Git implementation using the `git2` crate
/// - [MockRepository](mock::MockRepository): Test implementation for mocking Git operations
pub trait Repository {
    /// Resolve a revision (e.g. `HEAD`, `main`, a hash) to a commit id
    ///
    /// # Returns
    /// * `Ok(Oid)` - Object ID of the commit the revision points at
    /// * `Err` - If the revision does not resolve to a commit
    fn resolve_commit(&self, spec: &str) -> Result<Oid>;

    /// Get the parents of a commit, in parent order
    ///
    /// Root commits have no parents and return an empty vector.
    fn parents_of(&self, oid: Oid) -> Result<Vec<Oid>>;

    /// Get the full, multi-line message of a commit
    fn message_of(&self, oid: Oid) -> Result<String>;

    /// List the tags whose name starts with `prefix`, sorted by name
    ///
    /// # Example
    /// ```rust
    /// # use git_pr_stack::git::Repository;
    /// # fn example<R: Repository>(repo: &R) -> Result<(), Box<dyn std::error::Error>> {
    /// for tag in repo.list_tags("PR_BRANCH/")? {
    ///     println!("Tag: {}", tag);
    /// }
    /// # Ok(())
    /// # }
    /// ```
    fn list_tags(&self, prefix: &str) -> Result<Vec<String>>;

    /// Create a lightweight tag at `oid`, replacing any tag of the same name
    fn create_or_replace_tag(&self, name: &str, oid: Oid) -> Result<()>;

    /// Delete a tag
    fn delete_tag(&self, name: &str) -> Result<()>;

    /// Force-update `refs/heads/<branch>` on `remote` to point at `oid`
    ///
    /// # Arguments
    /// * `remote` - Name of the remote (e.g., "origin")
    /// * `oid` - Commit the remote branch should point at
    /// * `branch` - Branch name on the remote, without `refs/heads/`
    fn force_push_branch(&self, remote: &str, oid: Oid, branch: &str) -> Result<()>;
}
