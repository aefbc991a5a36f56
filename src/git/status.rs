use anyhow::{Context, Result, anyhow};
use tracing::{debug, warn};

use crate::error::MergeError;

use super::{AheadBehind, Repo, fast_forward_to_upstream, fetch_prune};

/// Parse `git rev-list --left-right --count HEAD...@{upstream}` output.
/// The left count is commits only on HEAD, the right count commits only on upstream.
fn parse_ahead_behind(output: &str) -> Option<AheadBehind> {
    let mut parts = output.split_whitespace();
    let ahead = parts.next()?.parse().ok()?;
    let behind = parts.next()?.parse().ok()?;
    if parts.next().is_some() {
        return None;
    }
    Some(AheadBehind { ahead, behind })
}

/// Count commits the current branch is ahead of and behind its upstream
pub fn ahead_behind(repo: &Repo) -> Result<AheadBehind> {
    let output = repo
        .git()
        .args(&["rev-list", "--left-right", "--count", "HEAD...@{upstream}"])
        .run_and_capture_stdout(repo.runner())
        .context("Failed to compare branch with its upstream")?;

    parse_ahead_behind(&output)
        .ok_or_else(|| anyhow!("Unexpected output from git rev-list: '{}'", output))
}

/// Bring the checked-out `branch` in line with its upstream.
///
/// Remotes are always fetched and pruned first. With `automatic`, the branch
/// is fast-forwarded and anything else is fatal. Without it nothing is
/// changed: the branch must already match its upstream exactly.
pub fn sync_branch(repo: &Repo, branch: &str, automatic: bool) -> Result<()> {
    fetch_prune(repo)?;

    if automatic {
        return fast_forward_to_upstream(repo, branch);
    }

    let counts = ahead_behind(repo)?;
    debug!(
        branch,
        ahead = counts.ahead,
        behind = counts.behind,
        "git:upstream comparison"
    );

    if !counts.is_in_sync() {
        warn!(branch, ahead = counts.ahead, behind = counts.behind, "git:branch not up to date");
        return Err(MergeError::UpstreamDiverged {
            branch: branch.to_string(),
            ahead: counts.ahead,
            behind: counts.behind,
        }
        .into());
    }

    Ok(())
}
