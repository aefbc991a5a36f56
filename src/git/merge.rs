use anyhow::{Context, Result};
use tracing::{debug, info};

use crate::error::MergeError;

use super::{Repo, checkout, rev_parse, sync_branch};

/// Find the best common ancestor of two revisions
pub fn merge_base(repo: &Repo, a: &str, b: &str) -> Result<String> {
    repo.git()
        .args(&["merge-base", a, b])
        .run_and_capture_stdout(repo.runner())
        .with_context(|| format!("Failed to find merge-base of '{}' and '{}'", a, b))
}

/// Check that `branch` matches its upstream and, when `require_rebased` is
/// set, that it sits directly on top of the tip of `base`.
///
/// The repository is left on `base` on success and on a failed rebase check.
/// If `branch` is out of sync with its upstream the checkout stays on
/// `branch` so it can be fixed in place.
pub fn verify_rebased(repo: &Repo, branch: &str, base: &str, require_rebased: bool) -> Result<()> {
    checkout(repo, branch)?;
    sync_branch(repo, branch, false)?;

    if require_rebased {
        let fork_point = merge_base(repo, branch, base)?;
        let base_tip = rev_parse(repo, base)?;
        debug!(branch, base, fork_point = %fork_point, base_tip = %base_tip, "git:rebase check");

        if fork_point != base_tip {
            checkout(repo, base)?;
            return Err(MergeError::NotRebased {
                branch: branch.to_string(),
                base: base.to_string(),
            }
            .into());
        }
    }

    checkout(repo, base)?;
    Ok(())
}

/// Commit message for a PR merge
pub fn merge_message(pr_number: &str, branch: &str) -> String {
    format!("Merge #{} from branch `{}`", pr_number, branch)
}

/// Merge `branch` into the current branch with an explicit merge commit.
///
/// Output goes straight to the terminal so git can open the commit editor.
pub fn merge_no_ff(repo: &Repo, pr_number: &str, branch: &str, flags: &[String]) -> Result<()> {
    let message = merge_message(pr_number, branch);
    let mut cmd = repo
        .git()
        .args(&["merge", "--no-ff", "--edit", "-m", &message]);
    for flag in flags {
        cmd = cmd.arg(flag);
    }
    let cmd = cmd.arg(branch).streamed();

    info!(pr = pr_number, branch, flags = ?flags, "git:merge");
    cmd.run(repo.runner())
        .with_context(|| format!("Failed to merge branch '{}'", branch))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cmd::testing::FakeRunner;
    use crate::config::Config;

    const REV_LIST: &str = "git rev-list --left-right --count HEAD...@{upstream}";

    fn synced(runner: &FakeRunner) {
        runner.respond(REV_LIST, "0\t0");
    }

    #[test]
    fn rebased_when_merge_base_is_base_tip() {
        let runner = FakeRunner::new();
        synced(&runner);
        runner
            .respond("git merge-base feature-x main", "abc123")
            .respond("git rev-parse main", "abc123");
        let config = Config::default();
        let repo = Repo::new(&runner, &config);

        verify_rebased(&repo, "feature-x", "main", true).unwrap();
        assert_eq!(
            runner.calls(),
            vec![
                "git checkout feature-x",
                "git fetch --all --prune",
                REV_LIST,
                "git merge-base feature-x main",
                "git rev-parse main",
                "git checkout main",
            ]
        );
    }

    #[test]
    fn not_rebased_returns_to_base() {
        let runner = FakeRunner::new();
        synced(&runner);
        runner
            .respond("git merge-base bugfix-99 main", "old111")
            .respond("git rev-parse main", "new222");
        let config = Config::default();
        let repo = Repo::new(&runner, &config);

        let err = verify_rebased(&repo, "bugfix-99", "main", true).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<MergeError>(),
            Some(MergeError::NotRebased { .. })
        ));
        assert_eq!(runner.calls().last().unwrap(), "git checkout main");
    }

    #[test]
    fn ancestry_ignored_when_rebase_not_required() {
        let runner = FakeRunner::new();
        synced(&runner);
        runner
            .respond("git merge-base bugfix-99 main", "old111")
            .respond("git rev-parse main", "new222");
        let config = Config::default();
        let repo = Repo::new(&runner, &config);

        verify_rebased(&repo, "bugfix-99", "main", false).unwrap();
        assert!(!runner.was_called_starting_with("git merge-base"));
        assert!(!runner.was_called("git rev-parse main"));
    }

    #[test]
    fn out_of_sync_branch_stays_checked_out() {
        let runner = FakeRunner::new();
        runner.respond(REV_LIST, "0\t1");
        let config = Config::default();
        let repo = Repo::new(&runner, &config);

        let err = verify_rebased(&repo, "feature-x", "main", true).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<MergeError>(),
            Some(MergeError::UpstreamDiverged { .. })
        ));
        assert!(!runner.was_called("git checkout main"));
    }

    #[test]
    fn merge_message_names_pr_and_branch() {
        assert_eq!(
            merge_message("42", "feature-x"),
            "Merge #42 from branch `feature-x`"
        );
    }

    #[test]
    fn merge_forwards_flags_before_branch() {
        let runner = FakeRunner::new();
        let config = Config::default();
        let repo = Repo::new(&runner, &config);

        merge_no_ff(&repo, "7", "topic", &["--no-verify".to_string()]).unwrap();
        assert_eq!(
            runner.calls(),
            vec!["git merge --no-ff --edit -m Merge #7 from branch `topic` --no-verify topic"]
        );
    }

    #[test]
    fn failed_merge_keeps_git_exit_code() {
        let runner = FakeRunner::new();
        runner.fail(
            "git merge --no-ff --edit -m Merge #7 from branch `topic` topic",
            1,
            "",
        );
        let config = Config::default();
        let repo = Repo::new(&runner, &config);

        let err = merge_no_ff(&repo, "7", "topic", &[]).unwrap_err();
        assert_eq!(crate::error::exit_code_for(&err), 1);
    }
}
