use crate::cmd::SystemRunner;
use crate::config::Config;
use crate::git::Repo;
use crate::prompt::TerminalPrompt;
use crate::workflow::{self, AbortPoint, BranchDeletion, MergeOutcome, MergeRequest};
use anyhow::{Context, Result};
use console::style;

pub fn run(
    pr: &str,
    branch_args: &[String],
    check_base_branch: bool,
    require_rebased: bool,
) -> Result<()> {
    // Reject a bad PR id before touching anything else
    let pr_number = workflow::parse_pr_number(pr)?;

    let config = Config {
        check_base_branch,
        require_rebased,
        ..Config::from_env()
    };
    preflight(&config)?;

    let runner = SystemRunner::new();
    let repo = Repo::new(&runner, &config);
    let request = MergeRequest {
        pr_number,
        branch_args: branch_args.to_vec(),
    };

    match workflow::merge(&repo, &TerminalPrompt, &request)? {
        MergeOutcome::Merged { context, deletion } => {
            println!(
                "{} Merged PR #{} from '{}' into '{}'",
                style("✓").green(),
                context.pr_number,
                context.target_branch,
                context.base_branch
            );
            match deletion {
                BranchDeletion::Deleted => println!(
                    "{} Deleted branch '{}'",
                    style("✓").green(),
                    context.target_branch
                ),
                BranchDeletion::Kept => {}
                BranchDeletion::Failed(reason) => eprintln!(
                    "{} Could not delete branch '{}': {}",
                    style("!").yellow().bold(),
                    context.target_branch,
                    reason
                ),
            }
        }
        MergeOutcome::Aborted(point) => {
            let reason = match point {
                AbortPoint::NonStandardBase => "base branch not confirmed",
                AbortPoint::BranchMismatch => "PR branch not confirmed",
            };
            println!("{}", style(format!("Aborted: {}", reason)).dim());
        }
    }

    Ok(())
}

/// Make sure the external tools can be found before running anything
fn preflight(config: &Config) -> Result<()> {
    for program in [&config.git, &config.gh] {
        which::which(program)
            .with_context(|| format!("'{}' was not found in PATH", program))?;
    }
    Ok(())
}
