use anyhow::{Context, Result};
use tracing::debug;

use crate::cmd::CommandResult;

use super::Repo;

/// Get the current branch name
pub fn get_current_branch(repo: &Repo) -> Result<String> {
    let branch = repo
        .git()
        .args(&["rev-parse", "--abbrev-ref", "HEAD"])
        .run_and_capture_stdout(repo.runner())
        .context("Failed to determine the current branch")?;
    debug!(branch = %branch, "git:current branch");
    Ok(branch)
}

/// Check out a local branch
pub fn checkout(repo: &Repo, branch: &str) -> Result<()> {
    debug!(branch, "git:checkout");
    repo.git()
        .args(&["checkout", branch])
        .run(repo.runner())
        .with_context(|| format!("Failed to check out branch '{}'", branch))?;
    Ok(())
}

/// Resolve a revision to its commit hash
pub fn rev_parse(repo: &Repo, rev: &str) -> Result<String> {
    repo.git()
        .args(&["rev-parse", rev])
        .run_and_capture_stdout(repo.runner())
        .with_context(|| format!("Failed to resolve '{}'", rev))
}

/// Delete a local branch with `git branch -d`.
///
/// The result is returned as-is: git refuses to delete branches that are not
/// fully merged, and the caller decides how to report that.
pub fn delete_branch(repo: &Repo, branch: &str) -> Result<CommandResult> {
    debug!(branch, "git:delete branch");
    repo.git()
        .args(&["branch", "-d", branch])
        .run_unchecked(repo.runner())
}
