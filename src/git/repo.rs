use crate::cmd::{Cmd, Runner};
use crate::config::Config;

/// The repository a merge runs against.
///
/// Every git and gh invocation goes through the runner held here, so the
/// whole flow can be driven by a fake runner in tests.
#[derive(Clone, Copy)]
pub struct Repo<'a> {
    runner: &'a dyn Runner,
    config: &'a Config,
}

impl<'a> Repo<'a> {
    pub fn new(runner: &'a dyn Runner, config: &'a Config) -> Self {
        Self { runner, config }
    }

    pub fn runner(&self) -> &'a dyn Runner {
        self.runner
    }

    pub fn config(&self) -> &'a Config {
        self.config
    }

    /// Start a git command
    pub fn git(&self) -> Cmd<'a> {
        Cmd::new(&self.config.git)
    }

    /// Start a GitHub CLI command
    pub fn gh(&self) -> Cmd<'a> {
        Cmd::new(&self.config.gh)
    }
}
