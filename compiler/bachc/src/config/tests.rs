#![allow(clippy::unwrap_used, clippy::expect_used)]

use super::*;
use pretty_assertions::assert_eq;

fn parse(args: &[&str]) -> Result<Invocation, UsageError> {
    Config::parse(args.iter().map(ToString::to_string), false)
}

fn config(args: &[&str]) -> Config {
    match parse(args).unwrap() {
        Invocation::Run(config) => config,
        Invocation::Help => panic!("unexpected help for {args:?}"),
    }
}

#[test]
fn test_defaults_read_stdin() {
    assert_eq!(
        config(&[]),
        Config {
            input: Input::Stdin,
            show_type: false,
            check_only: false,
            colors: true,
        }
    );
}

#[test]
fn test_flags_and_inputs() {
    let inline = config(&["--type", "-e", "1 +2"]);
    assert_eq!(inline.input, Input::Inline("1 +2".to_string()));
    assert!(inline.show_type);

    let file = config(&["prog.bach", "--check", "--no-color"]);
    assert_eq!(file.input, Input::File(PathBuf::from("prog.bach")));
    assert!(file.check_only);
    assert!(!file.colors);
}

#[test]
fn test_no_color_environment() {
    let Invocation::Run(config) = Config::parse(Vec::new(), true).unwrap() else {
        panic!("expected a run");
    };
    assert!(!config.colors);
}

#[test]
fn test_help() {
    assert_eq!(parse(&["a.bach", "--help"]).unwrap(), Invocation::Help);
}

#[test]
fn test_usage_errors() {
    assert!(parse(&["-e"]).is_err());
    assert!(parse(&["--verbose"]).is_err());
    assert!(parse(&["a.bach", "b.bach"]).is_err());
    assert!(parse(&["-e", "1", "a.bach"]).is_err());
}

#[test]
fn test_inline_source() {
    let (name, text) = config(&["-e", "null"]).read_source().unwrap();
    assert_eq!(name, "<inline>");
    assert_eq!(text, "null");
}
