//! Bach interpreter CLI.

use std::io::{self, IsTerminal};
use std::process::ExitCode;

use bach_diagnostic::emitter::{DiagnosticEmitter, TerminalEmitter};
use bach_diagnostic::Diagnostic;
use bachc::{check_program, interpret_program, Config, Invocation, USAGE};

fn main() -> ExitCode {
    bachc::init_tracing();

    let no_color_env = std::env::var_os("NO_COLOR").is_some();
    let config = match Config::parse(std::env::args().skip(1), no_color_env) {
        Ok(Invocation::Run(config)) => config,
        Ok(Invocation::Help) => {
            println!("{USAGE}");
            return ExitCode::SUCCESS;
        }
        Err(err) => {
            eprintln!("error: {err}");
            eprintln!();
            eprintln!("{USAGE}");
            return ExitCode::from(2);
        }
    };

    let (name, source) = match config.read_source() {
        Ok(source) => source,
        Err(err) => {
            eprintln!("error: cannot read {}: {err}", config.input);
            return ExitCode::from(1);
        }
    };

    match run(&config, &source) {
        Ok(output) => {
            println!("{output}");
            ExitCode::SUCCESS
        }
        Err(diagnostic) => {
            let colors = config.colors && io::stderr().is_terminal();
            let mut emitter = TerminalEmitter::new(io::stderr(), colors).with_source(name, source);
            emitter.emit(&diagnostic);
            emitter.flush();
            ExitCode::from(1)
        }
    }
}

/// Everything to print on success. Nothing is printed until the value is
/// fully rendered.
fn run(config: &Config, source: &str) -> Result<String, Diagnostic> {
    if config.check_only {
        return Ok(check_program(source)?.to_string());
    }
    let (ty, value) = interpret_program(source)?;
    let repr = value.repr()?;
    Ok(if config.show_type {
        format!("{ty}\n{repr}")
    } else {
        repr
    })
}
