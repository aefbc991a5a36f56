use anyhow::{Context, Result};
use tracing::{debug, info};

use crate::error::MergeError;

use super::Repo;

/// Fetch all remotes, pruning remote-tracking refs deleted upstream
pub fn fetch_prune(repo: &Repo) -> Result<()> {
    info!("git:fetch prune");
    repo.git()
        .args(&["fetch", "--all", "--prune"])
        .run(repo.runner())
        .context("Failed to fetch with prune")?;
    Ok(())
}

/// Fast-forward the checked-out `branch` to its upstream.
///
/// Anything other than a clean fast-forward (diverged history, no upstream)
/// fails with [`MergeError::BaseBranchDiverged`].
pub fn fast_forward_to_upstream(repo: &Repo, branch: &str) -> Result<()> {
    let result = repo
        .git()
        .args(&["merge", "--ff-only", "@{upstream}"])
        .run_unchecked(repo.runner())?;

    if !result.success() {
        debug!(branch, exit_code = result.exit_code, "git:fast-forward refused");
        return Err(MergeError::BaseBranchDiverged {
            branch: branch.to_string(),
            code: result.exit_code,
            stderr: result.stderr.trim().to_string(),
        }
        .into());
    }

    info!(branch, "git:fast-forwarded to upstream");
    Ok(())
}
