use clap::Parser;

#[derive(Debug, Parser)]
#[command(
    name = "git-merge-pr",
    version,
    about = "Merge a GitHub pull request locally with an explicit merge commit",
    long_about = "Merge a GitHub pull request locally.\n\n\
        Brings the base branch up to date, checks that the PR branch matches its \
        upstream and is rebased on the base branch, then creates a --no-ff merge \
        commit named after the PR. Arguments after the branch name, or after `--`, \
        are passed to `git merge`."
)]
pub struct Cli {
    /// Pull request number
    pub pr: String,

    /// Local branch holding the PR, then extra `git merge` flags.
    /// When omitted (or when the first value is a flag) the PR is checked out with `gh pr checkout`.
    #[arg(value_name = "BRANCH", trailing_var_arg = true, allow_hyphen_values = true)]
    pub branch: Vec<String>,

    /// Merge into the current branch without checking or syncing it first
    #[arg(long)]
    pub no_check_base_branch: bool,

    /// Skip checking that the PR branch is rebased on the base branch
    #[arg(long)]
    pub no_require_rebased: bool,

    /// Show debug logs on stderr
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Parse the process arguments, honouring our own switches even when
    /// they were typed after the branch name.
    pub fn parse_args() -> Result<Self, clap::Error> {
        Self::try_parse().map(Self::lift_trailing_options)
    }

    /// Move `--no-check-base-branch` and `--no-require-rebased` out of the
    /// forwarded arguments. `git merge` has neither flag.
    pub fn lift_trailing_options(mut self) -> Self {
        self.branch.retain(|arg| match arg.as_str() {
            "--no-check-base-branch" => {
                self.no_check_base_branch = true;
                false
            }
            "--no-require-rebased" => {
                self.no_require_rebased = true;
                false
            }
            _ => true,
        });
        self
    }
}
