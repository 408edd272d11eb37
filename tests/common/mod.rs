#![allow(dead_code)]

use git2::{Oid, Repository, Signature};
use git_pr_stack::git::MockRepository;
use std::path::Path;

pub fn oid(n: u8) -> Oid {
    Oid::from_bytes(&[n; 20]).unwrap()
}

/// Mock history with `main` at commit 1 and HEAD at the last commit added
/// through [StackBuilder::commit] or [StackBuilder::merge].
pub struct StackBuilder {
    pub repo: MockRepository,
    next: u8,
}

impl StackBuilder {
    pub fn new() -> Self {
        let mut repo = MockRepository::new();
        repo.add_commit(oid(1), &[], "initial commit");
        repo.set_ref("main", oid(1));
        repo.set_ref("HEAD", oid(1));
        StackBuilder { repo, next: 2 }
    }

    pub fn base(&self) -> Oid {
        oid(1)
    }

    pub fn commit(&mut self, parent: Oid, message: &str) -> Oid {
        self.merge(&[parent], message)
    }

    pub fn merge(&mut self, parents: &[Oid], message: &str) -> Oid {
        let id = oid(self.next);
        self.next += 1;
        self.repo.add_commit(id, parents, message);
        self.repo.set_ref("HEAD", id);
        id
    }

    pub fn marked(&mut self, parent: Oid, subject: &str, branch: &str) -> Oid {
        self.commit(parent, &format!("{}\n\nPR_BRANCH={}\n", subject, branch))
    }
}

/// Create a commit with an empty tree in a real repository
pub fn git_commit(repo: &Repository, message: &str, parents: &[Oid]) -> Oid {
    let sig = Signature::now("Test Author", "test@example.com").unwrap();
    let tree_id = repo.index().unwrap().write_tree().unwrap();
    let tree = repo.find_tree(tree_id).unwrap();
    let parent_commits: Vec<git2::Commit> = parents
        .iter()
        .map(|p| repo.find_commit(*p).unwrap())
        .collect();
    let parent_refs: Vec<&git2::Commit> = parent_commits.iter().collect();
    repo.commit(None, &sig, &sig, message, &tree, &parent_refs)
        .unwrap()
}

/// Point a local branch at `oid` and check it out as HEAD
pub fn git_checkout(repo: &Repository, branch: &str, oid: Oid) {
    let refname = format!("refs/heads/{}", branch);
    repo.reference(&refname, oid, true, "test setup").unwrap();
    repo.set_head(&refname).unwrap();
}

pub fn init_repo(path: &Path) -> Repository {
    Repository::init(path).unwrap()
}
