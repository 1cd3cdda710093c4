// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Black-box tests for `rexcall info`, `rexcall names` and `rexcall config`.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use crate::prelude::*;

/// Each selector is printed as NAME=value, in the order given
#[test]
fn info_reports_selectors() {
    rexcall_cmd()
        .args(["info", "(a)(b)\\2", "capturecount", "BACKREFMAX"])
        .assert()
        .success()
        .stdout("CAPTURECOUNT=2\nBACKREFMAX=2\n");
}

/// Option bits are rendered as names
#[test]
fn info_renders_options() {
    rexcall_cmd()
        .args(["info", "-o", "DOTALL|caseless", "a.b", "OPTIONS"])
        .assert()
        .success()
        .stdout("OPTIONS=CASELESS|DOTALL\n");
}

/// Unknown selectors fail and name the selector
#[test]
fn info_unknown_selector() {
    rexcall_cmd()
        .args(["info", "a", "NAMETABLE"])
        .assert()
        .failure()
        .stderr(predicates::str::contains("NAMETABLE"));
}

/// Named groups are listed sorted by name
#[test]
fn names_lists_groups_by_name() {
    rexcall_cmd()
        .args(["names", "(?<year>\\d{4})-(?<mo>\\d\\d)"])
        .assert()
        .success()
        .stdout("1\t2\tmo\n2\t1\tyear\n");
}

/// A pattern without named groups lists nothing
#[test]
fn names_empty() {
    rexcall_cmd()
        .args(["names", "(a)"])
        .assert()
        .success()
        .stdout("");
}

/// Engine configuration by selector
#[test]
fn config_selected_values() {
    rexcall_cmd()
        .args(["config", "NEWLINE", "utf8"])
        .assert()
        .success()
        .stdout("NEWLINE=NL_LF\nUTF8=1\n");
}

/// With no selectors every configuration value is printed
#[test]
fn config_lists_everything() {
    rexcall_cmd()
        .arg("config")
        .assert()
        .success()
        .stdout(
            predicates::str::contains("UTF8=1\n")
                .and(predicates::str::contains("MATCH_LIMIT=1000000\n"))
                .and(predicates::str::contains("JITTARGET=\n")),
        );
}

/// Unknown configuration selectors fail with the layer status
#[test]
fn config_unknown_selector() {
    rexcall_cmd()
        .args(["config", "STACKUSAGE"])
        .assert()
        .failure()
        .stderr(predicates::str::contains("STACKUSAGE").and(predicates::str::contains("-16385")));
}
