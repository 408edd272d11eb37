use crate::error::{PrStackError, Result};
use crate::git::Repository;
use git2::Oid;
use std::cell::{Cell, RefCell};
use std::collections::{BTreeMap, HashMap, HashSet};

/// A mutating call issued against the mock, in call order
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MockCall {
    CreateTag { name: String, oid: Oid },
    DeleteTag { name: String },
    Push { remote: String, oid: Oid, branch: String },
}

#[derive(Debug, Clone)]
struct MockCommit {
    parents: Vec<Oid>,
    message: String,
}

/// Mock repository for testing without actual git operations
///
/// Holds an in-memory commit graph, named refs and tags. Mutations are
/// applied to the tag map and recorded in [MockRepository::calls]; failures
/// can be injected per tag, branch or commit.
#[derive(Default)]
pub struct MockRepository {
    commits: HashMap<Oid, MockCommit>,
    refs: HashMap<String, Oid>,
    tags: RefCell<BTreeMap<String, Oid>>,
    remote_branches: RefCell<BTreeMap<String, Oid>>,
    calls: RefCell<Vec<MockCall>>,
    reads: Cell<usize>,
    failing_tags: HashSet<String>,
    failing_pushes: HashSet<String>,
    unreadable: HashSet<Oid>,
}

impl MockRepository {
    /// Create a new empty mock repository
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a commit with its parents (in parent order) and message
    pub fn add_commit(&mut self, oid: Oid, parents: &[Oid], message: impl Into<String>) {
        self.commits.insert(
            oid,
            MockCommit {
                parents: parents.to_vec(),
                message: message.into(),
            },
        );
    }

    /// Point a named ref (e.g. `HEAD`, `main`) at a commit
    pub fn set_ref(&mut self, name: impl Into<String>, oid: Oid) {
        self.refs.insert(name.into(), oid);
    }

    /// Add a tag pointing to an OID
    pub fn add_tag(&mut self, name: impl Into<String>, oid: Oid) {
        self.tags.get_mut().insert(name.into(), oid);
    }

    /// Make every create/delete of this tag fail
    pub fn fail_tag(&mut self, name: impl Into<String>) {
        self.failing_tags.insert(name.into());
    }

    /// Make every push of this branch fail
    pub fn fail_push(&mut self, branch: impl Into<String>) {
        self.failing_pushes.insert(branch.into());
    }

    /// Make parent and message reads of this commit fail
    pub fn fail_read(&mut self, oid: Oid) {
        self.unreadable.insert(oid);
    }

    /// Current tags and their targets
    pub fn tags(&self) -> BTreeMap<String, Oid> {
        self.tags.borrow().clone()
    }

    /// Branches as they would look on the remote after the recorded pushes
    pub fn remote_branches(&self) -> BTreeMap<String, Oid> {
        self.remote_branches.borrow().clone()
    }

    /// Mutating calls issued so far, including failed ones
    pub fn calls(&self) -> Vec<MockCall> {
        self.calls.borrow().clone()
    }

    pub fn clear_calls(&self) {
        self.calls.borrow_mut().clear();
    }

    /// Number of parent and message reads served
    pub fn reads(&self) -> usize {
        self.reads.get()
    }

    fn commit(&self, oid: Oid) -> Result<&MockCommit> {
        self.reads.set(self.reads.get() + 1);
        if self.unreadable.contains(&oid) {
            return Err(PrStackError::history(format!("Cannot read commit {}", oid)));
        }
        self.commits
            .get(&oid)
            .ok_or_else(|| PrStackError::history(format!("Commit not found: {}", oid)))
    }
}

impl Repository for MockRepository {
    fn resolve_commit(&self, spec: &str) -> Result<Oid> {
        if let Some(oid) = self.refs.get(spec) {
            return Ok(*oid);
        }
        Oid::from_str(spec)
            .ok()
            .filter(|oid| self.commits.contains_key(oid))
            .ok_or_else(|| PrStackError::history(format!("Cannot resolve '{}'", spec)))
    }

    fn parents_of(&self, oid: Oid) -> Result<Vec<Oid>> {
        Ok(self.commit(oid)?.parents.clone())
    }

    fn message_of(&self, oid: Oid) -> Result<String> {
        Ok(self.commit(oid)?.message.clone())
    }

    fn list_tags(&self, prefix: &str) -> Result<Vec<String>> {
        Ok(self
            .tags
            .borrow()
            .keys()
            .filter(|name| name.starts_with(prefix))
            .cloned()
            .collect())
    }

    fn create_or_replace_tag(&self, name: &str, oid: Oid) -> Result<()> {
        self.calls.borrow_mut().push(MockCall::CreateTag {
            name: name.to_string(),
            oid,
        });
        if self.failing_tags.contains(name) {
            return Err(PrStackError::tag(format!("Cannot create tag '{}'", name)));
        }
        self.tags.borrow_mut().insert(name.to_string(), oid);
        Ok(())
    }

    fn delete_tag(&self, name: &str) -> Result<()> {
        self.calls.borrow_mut().push(MockCall::DeleteTag {
            name: name.to_string(),
        });
        if self.failing_tags.contains(name) {
            return Err(PrStackError::tag(format!("Cannot delete tag '{}'", name)));
        }
        match self.tags.borrow_mut().remove(name) {
            Some(_) => Ok(()),
            None => Err(PrStackError::tag(format!("Tag not found: {}", name))),
        }
    }

    fn force_push_branch(&self, remote: &str, oid: Oid, branch: &str) -> Result<()> {
        self.calls.borrow_mut().push(MockCall::Push {
            remote: remote.to_string(),
            oid,
            branch: branch.to_string(),
        });
        if self.failing_pushes.contains(branch) {
            return Err(PrStackError::remote(format!("Push of '{}' rejected", branch)));
        }
        self.remote_branches
            .borrow_mut()
            .insert(branch.to_string(), oid);
        Ok(())
    }
}
