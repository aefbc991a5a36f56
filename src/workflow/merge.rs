use anyhow::Result;
use regex::Regex;
use std::sync::LazyLock;
use tracing::{info, warn};

use crate::error::MergeError;
use crate::git::{self, Repo};
use crate::github;
use crate::prompt::Prompt;

use super::types::{AbortPoint, BranchDeletion, MergeContext, MergeOutcome, MergeRequest};

static PR_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]+$").expect("valid PR number pattern"));

/// Validate a PR identifier: digits only
pub fn parse_pr_number(raw: &str) -> Result<String, MergeError> {
    if PR_NUMBER.is_match(raw) {
        Ok(raw.to_string())
    } else {
        Err(MergeError::Usage(raw.to_string()))
    }
}

/// Split positional arguments into an optional branch name and merge flags.
///
/// The first argument is the branch unless it looks like a flag, in which
/// case every argument is a flag and the branch is resolved from the PR.
pub fn split_branch_args(args: &[String]) -> (Option<String>, Vec<String>) {
    match args.split_first() {
        Some((first, rest)) if !first.starts_with('-') => (Some(first.clone()), rest.to_vec()),
        _ => (None, args.to_vec()),
    }
}

/// Merge a pull request into the current branch.
///
/// Runs the gates in order: PR id validation, base branch readiness, target
/// branch resolution, PR metadata cross-check, upstream and rebase checks,
/// the merge itself, then optional deletion of the merged branch.
pub fn merge(repo: &Repo, prompt: &dyn Prompt, request: &MergeRequest) -> Result<MergeOutcome> {
    let config = repo.config();
    let pr_number = parse_pr_number(&request.pr_number)?;
    info!(pr = %pr_number, args = ?request.branch_args, "merge:start");

    // Base branch readiness
    let base_branch = git::get_current_branch(repo)?;
    if config.check_base_branch {
        if config.is_base_branch(&base_branch) {
            prompt.status(&format!("Syncing '{}' with its upstream", base_branch));
            git::sync_branch(repo, &base_branch, true)?;
        } else {
            warn!(branch = %base_branch, "merge:non-standard base branch");
            let question = format!(
                "Current branch '{}' is not a standard base branch ({}). Merge into it anyway?",
                base_branch,
                config.base_branches.join(", ")
            );
            if !prompt.confirm(&question, false)? {
                info!(branch = %base_branch, "merge:aborted at base branch check");
                return Ok(MergeOutcome::Aborted(AbortPoint::NonStandardBase));
            }
        }
    }

    // Target branch resolution
    let (branch_arg, merge_flags) = split_branch_args(&request.branch_args);
    let target_branch = match branch_arg {
        Some(branch) => branch,
        None => {
            prompt.status(&format!("Checking out PR #{}", pr_number));
            github::resolve_target_branch(repo, &pr_number, &base_branch)?
        }
    };

    let context = MergeContext {
        pr_number,
        base_branch,
        target_branch,
        merge_flags,
        require_rebased: config.require_rebased,
        check_base_branch: config.check_base_branch,
    };
    info!(
        pr = %context.pr_number,
        base = %context.base_branch,
        branch = %context.target_branch,
        "merge:context resolved"
    );

    // PR metadata cross-check
    let pr_info = github::fetch_pull_request_info(repo, &context.pr_number)?;
    prompt.status(&format!("PR #{} head: {}", context.pr_number, pr_info));
    if !pr_info.matches_branch(&context.target_branch) {
        warn!(head = %pr_info, branch = %context.target_branch, "merge:branch mismatch");
        let question = format!(
            "PR #{} comes from '{}', which does not match branch '{}'. Continue anyway?",
            context.pr_number, pr_info, context.target_branch
        );
        if !prompt.confirm(&question, false)? {
            info!(pr = %context.pr_number, "merge:aborted at branch cross-check");
            return Ok(MergeOutcome::Aborted(AbortPoint::BranchMismatch));
        }
    }

    prompt.status(&format!(
        "Checking '{}' against '{}'",
        context.target_branch, context.base_branch
    ));
    git::verify_rebased(
        repo,
        &context.target_branch,
        &context.base_branch,
        context.require_rebased,
    )?;

    prompt.status(&format!(
        "Merging '{}' into '{}'",
        context.target_branch, context.base_branch
    ));
    git::merge_no_ff(
        repo,
        &context.pr_number,
        &context.target_branch,
        &context.merge_flags,
    )?;
    info!(pr = %context.pr_number, branch = %context.target_branch, "merge:merged");

    let deletion = delete_merged_branch(repo, prompt, &context.target_branch)?;
    Ok(MergeOutcome::Merged { context, deletion })
}

/// Offer to delete the merged branch. A refusal from git is reported, not fatal.
fn delete_merged_branch(repo: &Repo, prompt: &dyn Prompt, branch: &str) -> Result<BranchDeletion> {
    if !prompt.confirm(&format!("Delete branch '{}'?", branch), true)? {
        return Ok(BranchDeletion::Kept);
    }

    let result = git::delete_branch(repo, branch)?;
    if result.success() {
        info!(branch, "merge:branch deleted");
        Ok(BranchDeletion::Deleted)
    } else {
        warn!(branch, exit_code = result.exit_code, "merge:branch deletion failed");
        Ok(BranchDeletion::Failed(result.stderr.trim().to_string()))
    }
}
