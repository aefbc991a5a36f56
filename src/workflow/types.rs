/// What the user asked to merge, straight from the command line
#[derive(Debug, Clone, Default)]
pub struct MergeRequest {
    pub pr_number: String,
    /// Optional branch name followed by flags forwarded to `git merge`
    pub branch_args: Vec<String>,
}

/// Everything the merge step needs, resolved from the request and the repository
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeContext {
    pub pr_number: String,
    /// Branch the PR is merged into (checked out when the run started)
    pub base_branch: String,
    /// Local branch holding the PR commits
    pub target_branch: String,
    pub merge_flags: Vec<String>,
    pub require_rebased: bool,
    pub check_base_branch: bool,
}

/// Confirmation gate at which the user stopped the run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AbortPoint {
    /// Current branch is not one of the standard base branches
    NonStandardBase,
    /// PR head ref does not appear in the local branch name
    BranchMismatch,
}

/// What happened to the merged branch afterwards
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BranchDeletion {
    Deleted,
    /// User chose to keep it
    Kept,
    /// `git branch -d` refused; holds git's explanation
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MergeOutcome {
    Merged {
        context: MergeContext,
        deletion: BranchDeletion,
    },
    Aborted(AbortPoint),
}
