//! Parsing of fetch, cat, ls and put.

use super::parse;
use crate::cli::{Cli, CliCommand};
use clap::Parser;

#[test]
fn cli_parse_fetch() {
    match parse(&["resfetch", "fetch", "https://repo.example.com/lib-1.0.jar"]) {
        CliCommand::Fetch {
            url,
            output,
            if_present,
        } => {
            assert_eq!(url, "https://repo.example.com/lib-1.0.jar");
            assert!(output.is_none());
            assert!(!if_present);
        }
        _ => panic!("expected Fetch"),
    }
}

#[test]
fn cli_parse_fetch_output_and_if_present() {
    match parse(&[
        "resfetch",
        "fetch",
        "file:///srv/repo/lib.pom",
        "-o",
        "/tmp/lib.pom",
        "--if-present",
    ]) {
        CliCommand::Fetch {
            output, if_present, ..
        } => {
            assert_eq!(output.as_deref(), Some(std::path::Path::new("/tmp/lib.pom")));
            assert!(if_present);
        }
        _ => panic!("expected Fetch with -o and --if-present"),
    }
}

#[test]
fn cli_parse_cat_and_ls() {
    match parse(&["resfetch", "cat", "https://example.com/a.txt"]) {
        CliCommand::Cat { url } => assert_eq!(url, "https://example.com/a.txt"),
        _ => panic!("expected Cat"),
    }
    match parse(&["resfetch", "ls", "file:///srv/repo/"]) {
        CliCommand::Ls { url } => assert_eq!(url, "file:///srv/repo/"),
        _ => panic!("expected Ls"),
    }
}

#[test]
fn cli_parse_put() {
    match parse(&["resfetch", "put", "build/lib.jar", "https://repo.example.com/lib.jar"]) {
        CliCommand::Put { file, url } => {
            assert_eq!(file, std::path::PathBuf::from("build/lib.jar"));
            assert_eq!(url, "https://repo.example.com/lib.jar");
        }
        _ => panic!("expected Put"),
    }
}

#[test]
fn cli_parse_fetch_requires_url() {
    assert!(Cli::try_parse_from(["resfetch", "fetch"]).is_err());
}
