// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Test helpers for the black-box CLI tests.
//!
//! Provides a small DSL for running the rexcall probe.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

pub use assert_cmd::prelude::*;
pub use predicates;
pub use predicates::prelude::PredicateBooleanExt;
use std::io::Write;
use std::process::Command;

use tempfile::NamedTempFile;

/// Returns a Command configured to run the rexcall binary, isolated from
/// the caller's configuration and log environment.
pub fn rexcall_cmd() -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("rexcall"));
    cmd.env_remove("REXCALL_CONFIG").env_remove("REXCALL_LOG");
    cmd
}

/// Write `text` to a temporary `rexcall.toml`.
pub fn config_file(text: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new()
        .prefix("rexcall")
        .suffix(".toml")
        .tempfile()
        .expect("temp config should be created");
    file.write_all(text.as_bytes())
        .expect("temp config should be written");
    file
}

/// Run `rexcall match` with `args` and return stdout, asserting success.
pub fn match_stdout(args: &[&str]) -> String {
    let output = rexcall_cmd()
        .arg("match")
        .args(args)
        .output()
        .expect("command should run");
    assert!(
        output.status.success(),
        "rexcall match {:?} failed: {}",
        args,
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8(output.stdout).expect("stdout should be UTF-8")
}
