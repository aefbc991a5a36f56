use anyhow::{Context, Result};
use std::path::PathBuf;
use std::process::{Command, Stdio};
use tracing::debug;

use crate::error::MergeError;

/// Outcome of a single external process invocation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandResult {
    /// Exit code; a process killed by a signal is reported as 1
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
}

impl CommandResult {
    pub fn success(&self) -> bool {
        self.exit_code == 0
    }
}

/// Executes commands built with [`Cmd`].
///
/// Only fails when the process cannot be started at all; a non-zero exit is
/// reported through [`CommandResult::exit_code`].
pub trait Runner {
    fn execute(&self, cmd: &Cmd<'_>) -> Result<CommandResult>;
}

/// A builder for executing external commands with unified error handling
#[derive(Debug, Clone)]
pub struct Cmd<'a> {
    program: &'a str,
    args: Vec<&'a str>,
    streamed: bool,
}

impl<'a> Cmd<'a> {
    /// Create a new command builder
    pub fn new(program: &'a str) -> Self {
        Self {
            program,
            args: Vec::new(),
            streamed: false,
        }
    }

    /// Add a single argument
    pub fn arg(mut self, arg: &'a str) -> Self {
        self.args.push(arg);
        self
    }

    /// Add multiple arguments
    pub fn args(mut self, args: &[&'a str]) -> Self {
        self.args.extend_from_slice(args);
        self
    }

    /// Connect the command to the terminal instead of capturing its output.
    /// Needed for anything that may open an editor or ask questions.
    pub fn streamed(mut self) -> Self {
        self.streamed = true;
        self
    }

    pub fn program(&self) -> &str {
        self.program
    }

    pub fn arguments(&self) -> &[&'a str] {
        &self.args
    }

    pub fn is_streamed(&self) -> bool {
        self.streamed
    }

    /// The command as a single line, for messages and logs
    pub fn command_line(&self) -> String {
        if self.args.is_empty() {
            self.program.to_string()
        } else {
            format!("{} {}", self.program, self.args.join(" "))
        }
    }

    /// Execute the command and return the result without checking the exit code
    pub fn run_unchecked(self, runner: &dyn Runner) -> Result<CommandResult> {
        let result = runner.execute(&self)?;
        debug!(
            command = %self.command_line(),
            exit_code = result.exit_code,
            "cmd:executed"
        );
        Ok(result)
    }

    /// Execute the command and return the result.
    /// Returns [`MergeError::ExternalCommand`] if the command exits non-zero.
    pub fn run(self, runner: &dyn Runner) -> Result<CommandResult> {
        let command = self.command_line();
        let result = self.run_unchecked(runner)?;

        if !result.success() {
            return Err(MergeError::ExternalCommand {
                command,
                code: result.exit_code,
                stderr: result.stderr.trim().to_string(),
            }
            .into());
        }
        Ok(result)
    }

    /// Execute the command and return stdout as a trimmed string
    pub fn run_and_capture_stdout(self, runner: &dyn Runner) -> Result<String> {
        let result = self.run(runner)?;
        Ok(result.stdout.trim().to_string())
    }
}

/// Runs commands as real child processes, optionally from a fixed directory
#[derive(Debug, Clone, Default)]
pub struct SystemRunner {
    workdir: Option<PathBuf>,
}

impl SystemRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run every command from `path` instead of the process working directory (for testing).
    #[cfg(test)]
    pub fn in_dir(path: impl Into<PathBuf>) -> Self {
        Self {
            workdir: Some(path.into()),
        }
    }
}

impl Runner for SystemRunner {
    fn execute(&self, cmd: &Cmd<'_>) -> Result<CommandResult> {
        let mut command = Command::new(cmd.program());
        command.args(cmd.arguments());
        if let Some(dir) = &self.workdir {
            command.current_dir(dir);
        }

        if cmd.is_streamed() {
            let status = command
                .stdin(Stdio::inherit())
                .stdout(Stdio::inherit())
                .stderr(Stdio::inherit())
                .status()
                .with_context(|| format!("Failed to execute command: {}", cmd.command_line()))?;

            return Ok(CommandResult {
                exit_code: status.code().unwrap_or(1),
                stdout: String::new(),
                stderr: String::new(),
            });
        }

        let output = command
            .stdin(Stdio::null())
            .output()
            .with_context(|| format!("Failed to execute command: {}", cmd.command_line()))?;

        Ok(CommandResult {
            exit_code: output.status.code().unwrap_or(1),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}
