use super::parse;
use super::{Cli, CliCommand};
use crate::cli::commands::SheetArg;
use clap::Parser;
use std::path::PathBuf;

#[test]
fn cli_parse_scan() {
    match parse(&["pagetrace", "scan", "page.html", "--url", "https://example.com/"]) {
        CliCommand::Scan { page } => {
            assert_eq!(page.html, PathBuf::from("page.html"));
            assert_eq!(page.url, "https://example.com/");
            assert!(page.sheets.is_empty());
            assert!(page.cors_sheets.is_empty());
        }
        _ => panic!("expected Scan"),
    }
}

#[test]
fn cli_parse_scan_with_sheets() {
    match parse(&[
        "pagetrace",
        "scan",
        "page.html",
        "--url",
        "https://example.com/",
        "--sheet",
        "https://example.com/a.css=a.css",
        "--sheet",
        "https://example.com/b.css?v=3=b.css",
        "--cors-sheet",
        "https://fonts.example.net/f.css=f.css",
    ]) {
        CliCommand::Scan { page } => {
            assert_eq!(
                page.sheets,
                vec![
                    SheetArg {
                        href: "https://example.com/a.css".into(),
                        path: PathBuf::from("a.css"),
                    },
                    SheetArg {
                        href: "https://example.com/b.css?v=3".into(),
                        path: PathBuf::from("b.css"),
                    },
                ]
            );
            assert_eq!(page.cors_sheets.len(), 1);
            assert_eq!(page.cors_sheets[0].href, "https://fonts.example.net/f.css");
        }
        _ => panic!("expected Scan with sheets"),
    }
}

#[test]
fn cli_parse_scan_requires_url() {
    assert!(Cli::try_parse_from(["pagetrace", "scan", "page.html"]).is_err());
}

#[test]
fn cli_parse_scan_rejects_malformed_sheet() {
    let res = Cli::try_parse_from([
        "pagetrace",
        "scan",
        "page.html",
        "--url",
        "https://example.com/",
        "--sheet",
        "a.css",
    ]);
    assert!(res.is_err());
}

#[test]
fn cli_parse_manifest_defaults() {
    match parse(&[
        "pagetrace",
        "manifest",
        "page.html",
        "--url",
        "https://example.com/",
    ]) {
        CliCommand::Manifest { page, har, unique } => {
            assert_eq!(page.url, "https://example.com/");
            assert!(har.is_none());
            assert!(!unique);
        }
        _ => panic!("expected Manifest"),
    }
}

#[test]
fn cli_parse_manifest_with_har_unique() {
    match parse(&[
        "pagetrace",
        "manifest",
        "page.html",
        "--url",
        "https://example.com/",
        "--har",
        "/tmp/page.har",
        "--unique",
    ]) {
        CliCommand::Manifest { har, unique, .. } => {
            assert_eq!(har.as_deref(), Some(std::path::Path::new("/tmp/page.har")));
            assert!(unique);
        }
        _ => panic!("expected Manifest with --har --unique"),
    }
}
