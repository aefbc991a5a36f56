//! User interaction: confirmation gates and progress lines.

use anyhow::Result;
use console::style;
use std::io::{self, BufRead, Write};

/// Talks to the user: yes/no questions with a stated default, and progress lines.
pub trait Prompt {
    fn confirm(&self, question: &str, default: bool) -> Result<bool>;

    /// Tell the user what is happening
    fn status(&self, message: &str);
}

/// Parse an answer. Empty input takes the default, unknown input is `None`.
pub fn parse_answer(input: &str, default: bool) -> Option<bool> {
    match input.trim().to_lowercase().as_str() {
        "" => Some(default),
        "y" | "yes" => Some(true),
        "n" | "no" => Some(false),
        _ => None,
    }
}

/// Ask `question` on `output` until `input` yields a usable answer.
/// EOF behaves like pressing enter.
pub fn confirm_from(
    input: &mut impl BufRead,
    output: &mut impl Write,
    question: &str,
    default: bool,
) -> Result<bool> {
    let choices = if default { "[Y/n]" } else { "[y/N]" };

    loop {
        write!(output, "{} {} ", style(question).bold(), style(choices).cyan())?;
        output.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            writeln!(output)?;
            return Ok(default);
        }

        match parse_answer(&line, default) {
            Some(answer) => return Ok(answer),
            None => writeln!(output, "{}", style("  Please enter y or n").dim())?,
        }
    }
}

/// Prompt on stdin/stdout
pub struct TerminalPrompt;

impl Prompt for TerminalPrompt {
    fn confirm(&self, question: &str, default: bool) -> Result<bool> {
        confirm_from(&mut io::stdin().lock(), &mut io::stdout(), question, default)
    }

    fn status(&self, message: &str) {
        println!("{} {}", style("→").cyan(), message);
    }
}
