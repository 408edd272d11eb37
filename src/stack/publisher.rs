use crate::domain::{Head, TagNamespace};
use crate::error::PrStackError;
use crate::git::Repository;
use crate::ui;
use git2::Oid;
use std::collections::{BTreeSet, HashSet};

/// How derived heads are published
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PublishMode {
    /// Dry run: force-create a namespaced local tag per head
    Tag,
    /// Live run: force-push each head to the remote as a branch
    Push,
}

/// A head whose backend call failed
#[derive(Debug)]
pub struct PublishFailure {
    pub head: Head,
    pub error: PrStackError,
}

/// What happened to the heads passed to [Publisher::publish]
#[derive(Debug, Default)]
pub struct PublishReport {
    pub published: Vec<Head>,
    pub skipped_ignorable: Vec<Head>,
    pub skipped_duplicate: Vec<Head>,
    pub failures: Vec<PublishFailure>,
}

impl PublishReport {
    /// Fold another report into this one, keeping order
    pub fn absorb(&mut self, other: PublishReport) {
        self.published.extend(other.published);
        self.skipped_ignorable.extend(other.skipped_ignorable);
        self.skipped_duplicate.extend(other.skipped_duplicate);
        self.failures.extend(other.failures);
    }

    /// Heads for which a backend call was issued
    pub fn attempted(&self) -> usize {
        self.published.len() + self.failures.len()
    }
}

/// Publishes heads with at most one backend call per distinct head per run
///
/// A head is identified by its tip commit together with its ref name, so the
/// same segment reached through several paths is published once, while two
/// names on one commit are both published. Failed heads count as attempted
/// and are not retried.
pub struct Publisher {
    mode: PublishMode,
    remote: String,
    namespace: TagNamespace,
    published: HashSet<(Oid, String)>,
    active_tags: BTreeSet<String>,
}

impl Publisher {
    pub fn new(mode: PublishMode, remote: impl Into<String>, namespace: TagNamespace) -> Self {
        Publisher {
            mode,
            remote: remote.into(),
            namespace,
            published: HashSet::new(),
            active_tags: BTreeSet::new(),
        }
    }

    pub fn mode(&self) -> PublishMode {
        self.mode
    }

    /// Tags successfully created so far in this run
    pub fn active_tags(&self) -> &BTreeSet<String> {
        &self.active_tags
    }

    pub fn into_active_tags(self) -> BTreeSet<String> {
        self.active_tags
    }

    /// Publish heads in order.
    ///
    /// Ignorable refs are skipped without touching the dedup set. Backend
    /// failures are logged and collected in the report; they never stop the
    /// remaining heads from being published.
    pub fn publish<R: Repository>(&mut self, repo: &R, heads: &[Head]) -> PublishReport {
        let mut report = PublishReport::default();

        for head in heads {
            if head.is_ignorable() {
                report.skipped_ignorable.push(head.clone());
                continue;
            }

            let key = (head.tip, head.reference.clone());
            if self.published.contains(&key) {
                report.skipped_duplicate.push(head.clone());
                continue;
            }

            let outcome = match self.mode {
                PublishMode::Tag => {
                    let tag = self.namespace.tag_name(&head.reference);
                    ui::display_status(&format!("git tag --force {} {}", tag, head.tip));
                    repo.create_or_replace_tag(&tag, head.tip).map(|()| {
                        self.active_tags.insert(tag);
                    })
                }
                PublishMode::Push => {
                    ui::display_status(&format!(
                        "git push --force {} {}:refs/heads/{}",
                        self.remote, head.tip, head.reference
                    ));
                    repo.force_push_branch(&self.remote, head.tip, &head.reference)
                }
            };
            self.published.insert(key);

            match outcome {
                Ok(()) => report.published.push(head.clone()),
                Err(error) => {
                    ui::display_error(&format!("Failed to publish {}: {}", head, error));
                    report.failures.push(PublishFailure {
                        head: head.clone(),
                        error,
                    });
                }
            }
        }

        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::git::mock::{MockCall, MockRepository};

    fn oid(n: u8) -> Oid {
        Oid::from_bytes(&[n; 20]).unwrap()
    }

    fn tagger() -> Publisher {
        Publisher::new(PublishMode::Tag, "origin", TagNamespace::new("PR_BRANCH"))
    }

    #[test]
    fn test_tag_mode_creates_namespaced_tags() {
        let repo = MockRepository::new();
        let mut publisher = tagger();

        let report = publisher.publish(
            &repo,
            &[Head::new(oid(1), "login"), Head::new(oid(2), "signup")],
        );

        assert_eq!(report.published.len(), 2);
        assert_eq!(repo.tags().get("PR_BRANCH/login"), Some(&oid(1)));
        assert_eq!(repo.tags().get("PR_BRANCH/signup"), Some(&oid(2)));
        assert_eq!(
            publisher.active_tags().iter().collect::<Vec<_>>(),
            vec!["PR_BRANCH/login", "PR_BRANCH/signup"]
        );
    }

    #[test]
    fn test_push_mode_pushes_to_remote() {
        let repo = MockRepository::new();
        let mut publisher =
            Publisher::new(PublishMode::Push, "origin", TagNamespace::new("PR_BRANCH"));

        publisher.publish(&repo, &[Head::new(oid(1), "login")]);

        assert_eq!(
            repo.calls(),
            vec![MockCall::Push {
                remote: "origin".to_string(),
                oid: oid(1),
                branch: "login".to_string(),
            }]
        );
        assert!(repo.tags().is_empty());
        assert!(publisher.active_tags().is_empty());
    }

    #[test]
    fn test_same_head_from_two_paths_is_published_once() {
        let repo = MockRepository::new();
        let mut publisher = tagger();

        let first = publisher.publish(&repo, &[Head::new(oid(1), "A"), Head::new(oid(2), "B")]);
        let second = publisher.publish(&repo, &[Head::new(oid(1), "A"), Head::new(oid(3), "C")]);

        assert_eq!(first.published.len(), 2);
        assert_eq!(second.published, vec![Head::new(oid(3), "C")]);
        assert_eq!(second.skipped_duplicate, vec![Head::new(oid(1), "A")]);
        assert_eq!(repo.calls().len(), 3);
    }

    #[test]
    fn test_same_tip_different_refs_are_both_published() {
        let repo = MockRepository::new();
        let mut publisher = tagger();

        let report = publisher.publish(&repo, &[Head::new(oid(1), "A"), Head::new(oid(1), "B")]);

        assert_eq!(report.published.len(), 2);
        assert!(report.skipped_duplicate.is_empty());
    }

    #[test]
    fn test_same_ref_different_tips_are_both_issued() {
        let repo = MockRepository::new();
        let mut publisher = tagger();

        publisher.publish(&repo, &[Head::new(oid(1), "A"), Head::new(oid(2), "A")]);

        assert_eq!(repo.calls().len(), 2);
        // Last write wins, as with the backend's force semantics
        assert_eq!(repo.tags().get("PR_BRANCH/A"), Some(&oid(2)));
        assert_eq!(publisher.active_tags().len(), 1);
    }

    #[test]
    fn test_ignorable_refs_are_never_published() {
        let repo = MockRepository::new();
        let mut publisher = tagger();

        let report = publisher.publish(
            &repo,
            &[
                Head::new(oid(1), ""),
                Head::new(oid(2), "NULL"),
                Head::new(oid(3), "nil"),
                Head::new(oid(3), "real"),
            ],
        );

        assert_eq!(report.skipped_ignorable.len(), 3);
        assert_eq!(report.published, vec![Head::new(oid(3), "real")]);
        assert_eq!(
            publisher.active_tags().iter().collect::<Vec<_>>(),
            vec!["PR_BRANCH/real"]
        );
    }

    #[test]
    fn test_failures_do_not_stop_siblings() {
        let mut repo = MockRepository::new();
        repo.fail_tag("PR_BRANCH/broken");
        let mut publisher = tagger();

        let report = publisher.publish(
            &repo,
            &[
                Head::new(oid(1), "broken"),
                Head::new(oid(2), "fine"),
            ],
        );

        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].head.reference, "broken");
        assert!(!report.failures[0].error.is_fatal());
        assert_eq!(report.published, vec![Head::new(oid(2), "fine")]);
        assert_eq!(report.attempted(), 2);
        assert!(!publisher.active_tags().contains("PR_BRANCH/broken"));
    }

    #[test]
    fn test_failed_head_is_not_retried() {
        let mut repo = MockRepository::new();
        repo.fail_push("broken");
        let mut publisher =
            Publisher::new(PublishMode::Push, "origin", TagNamespace::new("PR_BRANCH"));

        publisher.publish(&repo, &[Head::new(oid(1), "broken")]);
        let again = publisher.publish(&repo, &[Head::new(oid(1), "broken")]);

        assert_eq!(repo.calls().len(), 1);
        assert_eq!(again.skipped_duplicate.len(), 1);
    }

    #[test]
    fn test_report_absorb() {
        let mut total = PublishReport::default();
        total.absorb(PublishReport {
            published: vec![Head::new(oid(1), "A")],
            ..PublishReport::default()
        });
        total.absorb(PublishReport {
            skipped_duplicate: vec![Head::new(oid(1), "A")],
            ..PublishReport::default()
        });
        assert_eq!(total.published.len(), 1);
        assert_eq!(total.skipped_duplicate.len(), 1);
    }
}
