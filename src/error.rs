/// Failures that end a merge run with a specific exit code.
///
/// Everything else bubbles up as a plain `anyhow::Error` and exits with 1.
#[derive(Debug, thiserror::Error)]
pub enum MergeError {
    #[error("Invalid PR number '{0}': expected digits only (e.g. 42)")]
    Usage(String),

    #[error("Failed to parse metadata for PR #{pr}: {source}")]
    MetadataParse {
        pr: String,
        #[source]
        source: serde_json::Error,
    },

    #[error(
        "Branch '{branch}' is not up to date with its upstream ({ahead} ahead, {behind} behind). \
        Please resolve this manually and try again."
    )]
    UpstreamDiverged {
        branch: String,
        ahead: u64,
        behind: u64,
    },

    #[error("Base branch '{branch}' cannot be fast-forwarded to its upstream:\n{stderr}")]
    BaseBranchDiverged {
        branch: String,
        code: i32,
        stderr: String,
    },

    #[error("Branch '{branch}' is not rebased on '{base}'. To fix it, run:\n  git rebase {base} {branch}")]
    NotRebased { branch: String, base: String },

    #[error("Command failed with exit code {code}: {command}\n{stderr}")]
    ExternalCommand {
        command: String,
        code: i32,
        stderr: String,
    },
}

impl MergeError {
    /// Exit code the process should terminate with for this failure.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ExternalCommand { code, .. } | Self::BaseBranchDiverged { code, .. } => *code,
            _ => 1,
        }
    }
}

/// Map any error coming out of the workflow to a process exit code.
pub fn exit_code_for(err: &anyhow::Error) -> i32 {
    err.chain()
        .find_map(|cause| cause.downcast_ref::<MergeError>())
        .map(MergeError::exit_code)
        .unwrap_or(1)
}
