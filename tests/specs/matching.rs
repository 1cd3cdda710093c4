// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Black-box tests for `rexcall match`.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use crate::prelude::*;

// =============================================================================
// MATCHING
// =============================================================================

/// Prints the match count then one line per group
#[test]
fn prints_match_vector() {
    let stdout = match_stdout(&["(\\d+)-(\\d+)", "tel 555-0100"]);
    assert_eq!(
        stdout,
        "3\n0\t4\t12\t555-0100\n1\t4\t7\t555\n2\t8\t12\t0100\n"
    );
}

/// No match prints a zero count and nothing else
#[test]
fn no_match_prints_zero() {
    assert_eq!(match_stdout(&["xyz", "abc"]), "0\n");
}

/// Compile options are applied
#[test]
fn caseless_option() {
    let stdout = match_stdout(&["-o", "CASELESS", "hello", "Say HELLO"]);
    assert_eq!(stdout, "1\n0\t4\t9\tHELLO\n");
}

/// Matching starts at the given offset
#[test]
fn start_offset() {
    let stdout = match_stdout(&["--start", "2", "a", "aaa"]);
    assert_eq!(stdout, "1\n0\t2\t3\ta\n");
}

/// Only the first `length` bytes of the subject are considered
#[test]
fn length_limits_subject() {
    assert_eq!(match_stdout(&["--length", "3", "def", "abcdef"]), "0\n");
}

/// Unset groups are reported as -1
#[test]
fn unset_group() {
    let stdout = match_stdout(&["(a)|(b)", "b"]);
    assert_eq!(stdout, "3\n0\t0\t1\tb\n1\t-1\t-1\t\n2\t0\t1\tb\n");
}

// =============================================================================
// FAILURES
// =============================================================================

/// Unknown compile options fail with the option named and the layer status
#[test]
fn unknown_compile_option() {
    rexcall_cmd()
        .args(["match", "-o", "CASELESS|BOGUS", "a", "a"])
        .assert()
        .failure()
        .stderr(predicates::str::contains("BOGUS").and(predicates::str::contains("-16385")));
}

/// Invalid patterns report the compile status
#[test]
fn invalid_pattern() {
    rexcall_cmd()
        .args(["match", "ab)cd", "abcd"])
        .assert()
        .failure()
        .stderr(predicates::str::contains("-16392"));
}

/// A length beyond the subject is rejected
#[test]
fn length_beyond_subject() {
    rexcall_cmd()
        .args(["match", "--length", "10", "a", "abc"])
        .assert()
        .failure()
        .stderr(predicates::str::contains("-16393"));
}

/// Unknown exec options fail
#[test]
fn unknown_exec_option() {
    rexcall_cmd()
        .args(["match", "-e", "CASELESS", "a", "a"])
        .assert()
        .failure()
        .stderr(predicates::str::contains("CASELESS"));
}
