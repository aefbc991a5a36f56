use tracing::debug;

pub const GIT_ENV: &str = "GIT_MERGE_PR_GIT";
pub const GH_ENV: &str = "GIT_MERGE_PR_GH";
pub const BASE_BRANCHES_ENV: &str = "GIT_MERGE_PR_BASE_BRANCHES";

const DEFAULT_BASE_BRANCHES: &[&str] = &["master", "main"];

/// Runtime settings for a single merge run.
///
/// Nothing is read from or written to disk: values come from the command
/// line and the environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Program used for git commands
    pub git: String,
    /// Program used for GitHub CLI commands
    pub gh: String,
    /// Branch names that are synced automatically when merging into them
    pub base_branches: Vec<String>,
    /// Verify the current branch before merging into it
    pub check_base_branch: bool,
    /// Require the PR branch to sit on top of the base branch tip
    pub require_rebased: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            git: "git".to_string(),
            gh: "gh".to_string(),
            base_branches: DEFAULT_BASE_BRANCHES.iter().map(|s| s.to_string()).collect(),
            check_base_branch: true,
            require_rebased: true,
        }
    }
}

impl Config {
    /// Build a config from the process environment
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from an arbitrary variable lookup
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(git) = lookup(GIT_ENV).filter(|v| !v.trim().is_empty()) {
            config.git = git.trim().to_string();
        }
        if let Some(gh) = lookup(GH_ENV).filter(|v| !v.trim().is_empty()) {
            config.gh = gh.trim().to_string();
        }
        if let Some(raw) = lookup(BASE_BRANCHES_ENV) {
            let branches: Vec<String> = raw
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(String::from)
                .collect();
            if !branches.is_empty() {
                config.base_branches = branches;
            }
        }

        debug!(
            git = %config.git,
            gh = %config.gh,
            base_branches = ?config.base_branches,
            "config:loaded"
        );
        config
    }

    pub fn is_base_branch(&self, branch: &str) -> bool {
        self.base_branches.iter().any(|b| b == branch)
    }
}
