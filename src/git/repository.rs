use crate::error::{PrStackError, Result};
use git2::{Oid, Repository as Git2Repo};
use std::cell::RefCell;
use std::path::Path;

/// Namespace for the local refs a push is staged through
const STAGING_REF_PREFIX: &str = "refs/pr-stack";

/// Wrapper around git2::Repository with our trait interface
pub struct Git2Repository {
    repo: Git2Repo,
}

impl Git2Repository {
    /// Open or discover a git repository
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let repo = Git2Repo::discover(path)?;

        Ok(Git2Repository { repo })
    }

    /// Create from existing git2::Repository
    pub fn from_git2(repo: Git2Repo) -> Self {
        Git2Repository { repo }
    }

    fn find_commit(&self, oid: Oid) -> Result<git2::Commit<'_>> {
        self.repo
            .find_commit(oid)
            .map_err(|e| PrStackError::history(format!("Cannot read commit {}: {}", oid, e)))
    }

    /// Push a single refspec, surfacing per-ref rejections as errors.
    fn push_refspec(&self, remote_name: &str, refspec: &str) -> Result<()> {
        let mut remote = self
            .repo
            .find_remote(remote_name)
            .map_err(|e| PrStackError::remote(format!("Cannot find remote '{}': {}", remote_name, e)))?;

        let rejection: RefCell<Option<String>> = RefCell::new(None);

        {
            let config = self.repo.config().ok();
            let mut callbacks = git2::RemoteCallbacks::new();
            callbacks.credentials(move |url, username_from_url, allowed_types| {
                if allowed_types.contains(git2::CredentialType::SSH_KEY) {
                    if let Ok(cred) =
                        git2::Cred::ssh_key_from_agent(username_from_url.unwrap_or("git"))
                    {
                        return Ok(cred);
                    }
                }
                if allowed_types.contains(git2::CredentialType::USER_PASS_PLAINTEXT) {
                    if let Some(ref config) = config {
                        if let Ok(cred) =
                            git2::Cred::credential_helper(config, url, username_from_url)
                        {
                            return Ok(cred);
                        }
                    }
                }
                git2::Cred::default()
            });
            callbacks.push_update_reference(|refname, status| {
                if let Some(status) = status {
                    *rejection.borrow_mut() = Some(format!("{} rejected: {}", refname, status));
                }
                Ok(())
            });

            let mut push_options = git2::PushOptions::new();
            push_options.remote_callbacks(callbacks);

            remote
                .push(&[refspec], Some(&mut push_options))
                .map_err(|e| {
                    if e.class() == git2::ErrorClass::Net {
                        PrStackError::remote(format!("Network error during push: {}", e))
                    } else {
                        PrStackError::remote(format!("Push of '{}' failed: {}", refspec, e))
                    }
                })?;
        }

        match rejection.into_inner() {
            Some(message) => Err(PrStackError::remote(message)),
            None => Ok(()),
        }
    }
}

impl super::Repository for Git2Repository {
    fn resolve_commit(&self, spec: &str) -> Result<Oid> {
        let object = self
            .repo
            .revparse_single(spec)
            .map_err(|e| PrStackError::history(format!("Cannot resolve '{}': {}", spec, e)))?;

        let commit = object.peel_to_commit().map_err(|e| {
            PrStackError::history(format!("'{}' does not point at a commit: {}", spec, e))
        })?;

        Ok(commit.id())
    }

    fn parents_of(&self, oid: Oid) -> Result<Vec<Oid>> {
        let commit = self.find_commit(oid)?;

        Ok(commit.parent_ids().collect())
    }

    fn message_of(&self, oid: Oid) -> Result<String> {
        let commit = self.find_commit(oid)?;

        Ok(String::from_utf8_lossy(commit.message_bytes()).into_owned())
    }

    fn list_tags(&self, prefix: &str) -> Result<Vec<String>> {
        let tags = self
            .repo
            .tag_names(None)
            .map_err(|e| PrStackError::history(format!("Cannot list tags: {}", e)))?;

        let mut names: Vec<String> = tags
            .iter()
            .flatten()
            .filter(|name| name.starts_with(prefix))
            .map(|name| name.to_string())
            .collect();
        names.sort();

        Ok(names)
    }

    fn create_or_replace_tag(&self, name: &str, oid: Oid) -> Result<()> {
        let object = self
            .repo
            .find_object(oid, None)
            .map_err(|e| PrStackError::tag(format!("Cannot find object {}: {}", oid, e)))?;

        self.repo
            .tag_lightweight(name, &object, true)
            .map_err(|e| PrStackError::tag(format!("Cannot create tag '{}': {}", name, e)))?;

        Ok(())
    }

    fn delete_tag(&self, name: &str) -> Result<()> {
        self.repo
            .tag_delete(name)
            .map_err(|e| PrStackError::tag(format!("Cannot delete tag '{}': {}", name, e)))
    }

    fn force_push_branch(&self, remote: &str, oid: Oid, branch: &str) -> Result<()> {
        // libgit2 pushes references, not bare object ids
        let staging = format!("{}/{}", STAGING_REF_PREFIX, branch);
        self.repo
            .reference(&staging, oid, true, "git-pr-stack: stage push")
            .map_err(|e| {
                PrStackError::remote(format!("Cannot stage push of '{}': {}", branch, e))
            })?;

        let result = self.push_refspec(remote, &format!("+{}:refs/heads/{}", staging, branch));

        // A leftover staging ref is overwritten by the next push of the same branch.
        if let Ok(mut reference) = self.repo.find_reference(&staging) {
            let _ = reference.delete();
        }

        result
    }
}
