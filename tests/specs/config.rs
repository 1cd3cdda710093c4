// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Black-box tests for `rexcall.toml` handling.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use crate::prelude::*;

/// The configured backtrack limit is the engine's match limit
#[test]
fn backtrack_limit_from_file() {
    let file = config_file("[limits]\nbacktrack = 5000\n");
    rexcall_cmd()
        .arg("-C")
        .arg(file.path())
        .args(["config", "MATCH_LIMIT"])
        .assert()
        .success()
        .stdout("MATCH_LIMIT=5000\n");
}

/// The config file may also come from the environment
#[test]
fn config_path_from_environment() {
    let file = config_file("[limits]\nbacktrack = 7\n");
    rexcall_cmd()
        .env("REXCALL_CONFIG", file.path())
        .args(["config", "MATCH_LIMIT_RECURSION"])
        .assert()
        .success()
        .stdout("MATCH_LIMIT_RECURSION=7\n");
}

/// Unknown keys are rejected
#[test]
fn unknown_key_fails() {
    let file = config_file("[limits]\nthreads = 4\n");
    rexcall_cmd()
        .arg("-C")
        .arg(file.path())
        .arg("version")
        .assert()
        .failure()
        .stderr(predicates::str::contains("failed to parse"));
}

/// Zero limits are rejected
#[test]
fn zero_limit_fails() {
    let file = config_file("[limits]\nobjects = 0\n");
    rexcall_cmd()
        .arg("-C")
        .arg(file.path())
        .arg("version")
        .assert()
        .failure()
        .stderr(predicates::str::contains("limits.objects"));
}

/// A missing config file is an error
#[test]
fn missing_file_fails() {
    rexcall_cmd()
        .args(["-C", "/nonexistent/rexcall.toml", "version"])
        .assert()
        .failure()
        .stderr(predicates::str::contains("failed to read"));
}
