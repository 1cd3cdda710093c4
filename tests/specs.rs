// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Black-box behavior of the rexcall probe.
//!
//! These tests are black-box: they invoke the CLI binary and verify
//! stdout, stderr, and exit codes.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

#[path = "specs/prelude.rs"]
mod prelude;

#[path = "specs/matching.rs"]
mod matching;

#[path = "specs/introspection.rs"]
mod introspection;

#[path = "specs/config.rs"]
mod config;

use prelude::*;

/// Exit code 0 when invoked with --help
#[test]
fn help_exits_successfully() {
    rexcall_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicates::str::contains("rexcall"));
}

/// Exit code 0 when invoked with --version
#[test]
fn version_exits_successfully() {
    rexcall_cmd().arg("--version").assert().success();
}

/// `rexcall version` names the engine
#[test]
fn version_command_names_engine() {
    rexcall_cmd()
        .arg("version")
        .assert()
        .success()
        .stdout(predicates::str::starts_with("rexcall ").and(predicates::str::contains("fancy-regex")));
}

/// A subcommand is required
#[test]
fn missing_command_is_usage_error() {
    rexcall_cmd().assert().failure().code(2);
}
