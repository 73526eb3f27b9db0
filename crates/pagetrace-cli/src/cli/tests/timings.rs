use super::parse;
use super::{Cli, CliCommand};
use clap::Parser;
use std::path::PathBuf;

#[test]
fn cli_parse_timings() {
    match parse(&["pagetrace", "timings", "/path/to/page.har"]) {
        CliCommand::Timings {
            har,
            buffered,
            realtime,
        } => {
            assert_eq!(har, PathBuf::from("/path/to/page.har"));
            assert_eq!(buffered, 0);
            assert!(!realtime);
        }
        _ => panic!("expected Timings"),
    }
}

#[test]
fn cli_parse_timings_buffered_realtime() {
    match parse(&[
        "pagetrace",
        "timings",
        "page.har",
        "--buffered",
        "12",
        "--realtime",
    ]) {
        CliCommand::Timings {
            buffered, realtime, ..
        } => {
            assert_eq!(buffered, 12);
            assert!(realtime);
        }
        _ => panic!("expected Timings with --buffered --realtime"),
    }
}

#[test]
fn cli_parse_timings_rejects_negative_buffered() {
    assert!(Cli::try_parse_from(["pagetrace", "timings", "page.har", "--buffered", "-1"]).is_err());
}

#[test]
fn cli_parse_unknown_subcommand_fails() {
    assert!(Cli::try_parse_from(["pagetrace", "download", "x"]).is_err());
}

#[test]
fn cli_parse_completions() {
    match parse(&["pagetrace", "completions", "bash"]) {
        CliCommand::Completions { shell } => assert_eq!(shell, clap_complete::Shell::Bash),
        _ => panic!("expected Completions"),
    }
}

#[test]
fn cli_definition_is_consistent() {
    use clap::CommandFactory;
    Cli::command().debug_assert();
}
