//! Command-line configuration.

use std::fmt;
use std::io::{self, Read};
use std::path::PathBuf;

pub const USAGE: &str = "\
Usage: bach [options] [<file> | -e <program>]

Runs a Bach program and prints its value. Without a file or -e, the
program is read from standard input.

Options:
  -e <program>   Run the given program text
  --type         Also print the program's output type
  --check        Typecheck only; print the output type
  --no-color     Disable colored diagnostics (also: NO_COLOR)
  -h, --help     Show this message";

/// Where the program text comes from.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum Input {
    File(PathBuf),
    Inline(String),
    Stdin,
}

impl fmt::Display for Input {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Input::File(path) => write!(f, "{}", path.display()),
            Input::Inline(_) => f.write_str("<inline>"),
            Input::Stdin => f.write_str("<stdin>"),
        }
    }
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Config {
    pub input: Input,
    /// Print the output type alongside the value.
    pub show_type: bool,
    /// Stop after typechecking.
    pub check_only: bool,
    /// Whether diagnostics may use color. The terminal check happens at
    /// emission time.
    pub colors: bool,
}

/// What the command line asks for.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum Invocation {
    Run(Config),
    Help,
}

/// A malformed command line.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct UsageError(pub String);

impl fmt::Display for UsageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for UsageError {}

impl Config {
    /// Parse arguments (without the program name). `no_color_env` reports
    /// whether `NO_COLOR` is set.
    pub fn parse(
        args: impl IntoIterator<Item = String>,
        no_color_env: bool,
    ) -> Result<Invocation, UsageError> {
        let mut config = Config {
            input: Input::Stdin,
            show_type: false,
            check_only: false,
            colors: !no_color_env,
        };
        let mut args = args.into_iter();

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "-h" | "--help" => return Ok(Invocation::Help),
                "--type" => config.show_type = true,
                "--check" => config.check_only = true,
                "--no-color" => config.colors = false,
                "-e" => {
                    let Some(program) = args.next() else {
                        return Err(UsageError("-e needs a program".to_string()));
                    };
                    config.set_input(Input::Inline(program))?;
                }
                "-" => config.set_input(Input::Stdin)?,
                flag if flag.starts_with('-') => {
                    return Err(UsageError(format!("unknown option `{flag}`")));
                }
                path => config.set_input(Input::File(PathBuf::from(path)))?,
            }
        }
        Ok(Invocation::Run(config))
    }

    fn set_input(&mut self, input: Input) -> Result<(), UsageError> {
        if self.input != Input::Stdin {
            return Err(UsageError("more than one program given".to_string()));
        }
        self.input = input;
        Ok(())
    }

    /// The program's display name and text.
    pub fn read_source(&self) -> io::Result<(String, String)> {
        let text = match &self.input {
            Input::File(path) => std::fs::read_to_string(path)?,
            Input::Inline(program) => program.clone(),
            Input::Stdin => {
                let mut text = String::new();
                io::stdin().read_to_string(&mut text)?;
                text
            }
        };
        Ok((self.input.to_string(), text))
    }
}

#[cfg(test)]
mod tests;
