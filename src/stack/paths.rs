use crate::domain::{CommitPath, MarkerPattern, StackCommit};
use crate::error::Result;
use crate::git::Repository;
use git2::Oid;

/// Traversal state for one commit on the current path
struct Frame {
    parents: Vec<Oid>,
    next: usize,
}

/// Enumerate every ancestry path from `source` down to `target`.
///
/// Each path lists the commits strictly between the two, nearest-source
/// first; `target` itself is never included. Parents are followed in parent
/// order, so the first path returned follows first parents. Root commits end
/// a branch of the search and merges fan out into one branch per parent.
///
/// Shared ancestors reachable through several parents appear once per path
/// that reaches them, so the number of paths grows with every diamond in the
/// history. No cycle detection is performed.
///
/// Every visited commit costs one parent read and one message read. Any read
/// failure aborts the enumeration.
///
/// # Returns
/// * `Ok(paths)` - One entry per path; `[[]]` when `source == target`,
///   `[]` when `target` is not an ancestor of `source`
/// * `Err` - If a commit's parents or message cannot be read
pub fn enumerate_paths<R: Repository>(
    repo: &R,
    marker: &MarkerPattern,
    source: Oid,
    target: Oid,
) -> Result<Vec<CommitPath>> {
    let mut paths = Vec::new();
    let mut path: CommitPath = Vec::new();
    let mut frames: Vec<Frame> = Vec::new();
    let mut pending = Some(source);

    // Depth-first with an explicit stack: `path` and `frames` grow and shrink
    // together, and a finished path is recorded as an owned snapshot.
    loop {
        if let Some(oid) = pending.take() {
            if oid == target {
                paths.push(path.clone());
            } else {
                let parents = repo.parents_of(oid)?;
                let message = repo.message_of(oid)?;
                path.push(StackCommit::new(oid, message, parents.len(), marker));
                frames.push(Frame { parents, next: 0 });
            }
        }

        let Some(frame) = frames.last_mut() else {
            break;
        };

        if frame.next < frame.parents.len() {
            pending = Some(frame.parents[frame.next]);
            frame.next += 1;
        } else {
            frames.pop();
            path.pop();
        }
    }

    Ok(paths)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::git::MockRepository;

    fn oid(n: u8) -> Oid {
        Oid::from_bytes(&[n; 20]).unwrap()
    }

    fn marker() -> MarkerPattern {
        MarkerPattern::new("PR_BRANCH").unwrap()
    }

    fn ids(path: &CommitPath) -> Vec<Oid> {
        path.iter().map(|c| c.id).collect()
    }

    #[test]
    fn test_source_equals_target() {
        let mut repo = MockRepository::new();
        repo.add_commit(oid(1), &[], "root");

        let paths = enumerate_paths(&repo, &marker(), oid(1), oid(1)).unwrap();
        assert_eq!(paths, vec![Vec::new()]);
        assert_eq!(repo.reads(), 0);
    }

    #[test]
    fn test_linear_chain() {
        // 1 <- 2 <- 3 <- 4, target 1, source 4
        let mut repo = MockRepository::new();
        repo.add_commit(oid(1), &[], "root");
        repo.add_commit(oid(2), &[oid(1)], "two");
        repo.add_commit(oid(3), &[oid(2)], "three");
        repo.add_commit(oid(4), &[oid(3)], "four");

        let paths = enumerate_paths(&repo, &marker(), oid(4), oid(1)).unwrap();
        assert_eq!(paths.len(), 1);
        assert_eq!(ids(&paths[0]), vec![oid(4), oid(3), oid(2)]);
        assert!(paths[0].iter().all(|c| !c.is_stopper()));
    }

    #[test]
    fn test_unreachable_target_yields_no_paths() {
        let mut repo = MockRepository::new();
        repo.add_commit(oid(1), &[], "root");
        repo.add_commit(oid(2), &[oid(1)], "two");
        repo.add_commit(oid(9), &[], "unrelated root");

        let paths = enumerate_paths(&repo, &marker(), oid(2), oid(9)).unwrap();
        assert!(paths.is_empty());
    }

    #[test]
    fn test_merge_fans_out_in_parent_order() {
        //        1
        //       / \
        //      2   3
        //       \ /
        //        4 (merge)
        //        |
        //        5
        let mut repo = MockRepository::new();
        repo.add_commit(oid(1), &[], "root");
        repo.add_commit(oid(2), &[oid(1)], "left");
        repo.add_commit(oid(3), &[oid(1)], "right\n\nPR_BRANCH=right");
        repo.add_commit(oid(4), &[oid(2), oid(3)], "Merge");
        repo.add_commit(oid(5), &[oid(4)], "top");

        let paths = enumerate_paths(&repo, &marker(), oid(5), oid(1)).unwrap();
        assert_eq!(paths.len(), 2);
        assert_eq!(ids(&paths[0]), vec![oid(5), oid(4), oid(2)]);
        assert_eq!(ids(&paths[1]), vec![oid(5), oid(4), oid(3)]);

        assert!(paths[0][1].is_merge);
        assert_eq!(paths[1][2].branch_tag.as_deref(), Some("right"));
    }

    #[test]
    fn test_recorded_paths_survive_backtracking() {
        let mut repo = MockRepository::new();
        repo.add_commit(oid(1), &[], "root");
        repo.add_commit(oid(2), &[oid(1)], "a");
        repo.add_commit(oid(3), &[oid(1)], "b");
        repo.add_commit(oid(4), &[oid(2), oid(3)], "Merge");

        let paths = enumerate_paths(&repo, &marker(), oid(4), oid(1)).unwrap();
        assert_eq!(paths[0].len(), 2);
        assert_eq!(paths[1].len(), 2);
        assert_ne!(paths[0][1].id, paths[1][1].id);
    }

    #[test]
    fn test_read_failure_aborts() {
        let mut repo = MockRepository::new();
        repo.add_commit(oid(1), &[], "root");
        repo.add_commit(oid(2), &[oid(1)], "two");
        repo.add_commit(oid(3), &[oid(2)], "three");
        repo.fail_read(oid(2));

        let err = enumerate_paths(&repo, &marker(), oid(3), oid(1)).unwrap_err();
        assert!(err.is_fatal());
    }
}
