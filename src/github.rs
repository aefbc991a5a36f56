//! Pull request lookups through the GitHub CLI.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::fmt;
use tracing::{debug, info};

use crate::error::MergeError;
use crate::git::{self, Repo};

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
struct RepositoryRef {
    #[serde(default)]
    name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
struct OwnerRef {
    #[serde(default)]
    login: String,
}

/// Raw shape of `gh pr view --json headRefName,headRepository,headRepositoryOwner`.
/// Repository and owner are null when the fork behind the PR was deleted.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PrViewJson {
    head_ref_name: String,
    #[serde(default)]
    head_repository: Option<RepositoryRef>,
    #[serde(default)]
    head_repository_owner: Option<OwnerRef>,
}

/// Head branch details of a pull request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PullRequestInfo {
    pub head_ref_name: String,
    /// Repository name, empty if unknown
    pub head_repository: String,
    /// Owner login, empty if unknown
    pub head_repository_owner: String,
}

impl PrViewJson {
    fn into_info(self) -> PullRequestInfo {
        PullRequestInfo {
            head_ref_name: self.head_ref_name,
            head_repository: self.head_repository.unwrap_or_default().name,
            head_repository_owner: self.head_repository_owner.unwrap_or_default().login,
        }
    }
}

impl fmt::Display for PullRequestInfo {
    /// `owner/repo:branch`, dropping whatever parts are unknown
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (
            self.head_repository_owner.is_empty(),
            self.head_repository.is_empty(),
        ) {
            (false, false) => write!(
                f,
                "{}/{}:{}",
                self.head_repository_owner, self.head_repository, self.head_ref_name
            ),
            (false, true) => write!(f, "{}:{}", self.head_repository_owner, self.head_ref_name),
            _ => write!(f, "{}", self.head_ref_name),
        }
    }
}

impl PullRequestInfo {
    /// Whether a local branch name plausibly tracks this PR's head.
    /// A loose substring match: `gh pr checkout` may prefix fork branches.
    pub fn matches_branch(&self, branch: &str) -> bool {
        branch.contains(&self.head_ref_name)
    }
}

/// Parse the JSON printed by `gh pr view`
pub fn parse_pull_request_info(pr_number: &str, json: &str) -> Result<PullRequestInfo> {
    let raw: PrViewJson =
        serde_json::from_str(json).map_err(|source| MergeError::MetadataParse {
            pr: pr_number.to_string(),
            source,
        })?;
    Ok(raw.into_info())
}

/// Look up the head branch of a pull request
pub fn fetch_pull_request_info(repo: &Repo, pr_number: &str) -> Result<PullRequestInfo> {
    let json = repo
        .gh()
        .args(&[
            "pr",
            "view",
            pr_number,
            "--json",
            "headRefName,headRepository,headRepositoryOwner",
        ])
        .run_and_capture_stdout(repo.runner())
        .with_context(|| format!("Failed to fetch metadata for PR #{}", pr_number))?;

    let info = parse_pull_request_info(pr_number, &json)?;
    debug!(pr = pr_number, head = %info, "github:pr metadata");
    Ok(info)
}

/// Check out a pull request into a local tracking branch and return to `base`.
///
/// Returns the name of the local branch. The branch must exactly match its
/// upstream; otherwise this fails and leaves the PR branch checked out.
pub fn resolve_target_branch(repo: &Repo, pr_number: &str, base: &str) -> Result<String> {
    info!(pr = pr_number, "github:checking out pr");
    repo.gh()
        .args(&["pr", "checkout", pr_number])
        .streamed()
        .run(repo.runner())
        .with_context(|| format!("Failed to check out PR #{}", pr_number))?;

    let branch = git::get_current_branch(repo)?;
    git::sync_branch(repo, &branch, false)?;
    git::checkout(repo, base)?;

    info!(pr = pr_number, branch = %branch, "github:resolved pr branch");
    Ok(branch)
}
