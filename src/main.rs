mod cli;
mod cmd;
mod command;
mod config;
mod error;
mod git;
mod github;
mod logger;
mod prompt;
mod workflow;

use clap::Parser;
use console::style;

use crate::cli::Cli;

fn main() {
    let cli = match Cli::parse_args() {
        Ok(cli) => cli,
        Err(err) => {
            // --help and --version are not failures; anything else is a usage error
            let code = if err.use_stderr() { 1 } else { 0 };
            let _ = err.print();
            std::process::exit(code);
        }
    };

    let guard = match logger::init(cli.verbose) {
        Ok(guard) => Some(guard),
        Err(err) => {
            eprintln!("{} {:#}", style("warning:").yellow().bold(), err);
            None
        }
    };

    let result = command::merge::run(
        &cli.pr,
        &cli.branch,
        !cli.no_check_base_branch,
        !cli.no_require_rebased,
    );

    if let Err(err) = result {
        eprintln!("{} {:#}", style("error:").red().bold(), err);
        let code = error::exit_code_for(&err);
        // process::exit skips destructors; flush logs first
        drop(guard);
        std::process::exit(code);
    }
}
