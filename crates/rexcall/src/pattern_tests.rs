// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use super::*;
use crate::engine::{CompileFailure, StudyOrigin};
use crate::test_utils::MockEngine;

fn build(engine: &MockEngine, request: &CompileRequest<'_>) -> Result<PatternObject<MockEngine>> {
    PatternObject::build(engine, request, 0)
}

// =============================================================================
// NameTable
// =============================================================================

#[test]
fn entries_are_one_based() {
    let table = NameTable {
        count: 2,
        entry_size: 6,
        bytes: b"\x00\x02ab\0\0\x01\x04xyz\0".to_vec(),
    };
    assert_eq!(table.entry(0), None);
    assert_eq!(table.entry(1), Some((2, &b"ab"[..])));
    assert_eq!(table.entry(2), Some((260, &b"xyz"[..])));
    assert_eq!(table.entry(3), None);
}

#[test]
fn empty_table_has_no_entries() {
    let table = NameTable::default();
    assert!(table.is_empty());
    assert_eq!(table.entry(1), None);
}

// =============================================================================
// Build
// =============================================================================

#[test]
fn plain_pattern_has_no_extra_or_tables() {
    let engine = MockEngine::new();
    let object = build(&engine, &CompileRequest::new(b"abc")).unwrap();
    assert!(object.extra().is_none());
    assert!(object.tables().is_none());
    assert!(object.ovector().is_none());
    assert!(!object.compiled().had_tables);
    assert_eq!(object.compiled().source, b"abc");
}

#[test]
fn study_data_is_kept() {
    let engine = MockEngine {
        studies: true,
        ..MockEngine::new()
    };
    let object = build(&engine, &CompileRequest::new(b"abc")).unwrap();
    assert!(matches!(object.extra().unwrap().origin, StudyOrigin::Engine(())));
}

#[test]
fn limits_without_study_create_local_extra() {
    let engine = MockEngine::new();
    let request = CompileRequest::new(b"abc").limits(500, 0);
    let object = build(&engine, &request).unwrap();
    let extra = object.extra().unwrap();
    assert!(matches!(extra.origin, StudyOrigin::Local));
    assert_eq!(extra.match_limit, NonZeroU64::new(500));
    assert_eq!(extra.recursion_limit, None);
}

#[test]
fn limits_augment_engine_study() {
    let engine = MockEngine {
        studies: true,
        ..MockEngine::new()
    };
    let request = CompileRequest::new(b"abc").limits(0, 70);
    let object = build(&engine, &request).unwrap();
    let extra = object.extra().unwrap();
    assert!(extra.study().is_some());
    assert_eq!(extra.effective_limit(), NonZeroU64::new(70));
}

#[test]
fn study_error_fails_build() {
    let engine = MockEngine {
        study_error: Some("study exploded".to_string()),
        ..MockEngine::new()
    };
    let err = build(&engine, &CompileRequest::new(b"abc")).err().unwrap();
    assert_eq!(err, Error::Study("study exploded".to_string()));
    assert_eq!(err.diagnostic(), Some("study exploded"));
}

#[test]
fn compile_failure_keeps_message_and_offset() {
    let engine = MockEngine {
        compile_error: Some(CompileFailure {
            message: "missing )".to_string(),
            offset: 3,
        }),
        ..MockEngine::new()
    };
    let err = build(&engine, &CompileRequest::new(b"(abc")).err().unwrap();
    assert_eq!(
        err,
        Error::Compile {
            message: "missing )".to_string(),
            offset: 3
        }
    );
}

#[test]
fn c_locale_builds_tables() {
    let engine = MockEngine::new();
    let object = build(&engine, &CompileRequest::new(b"abc").locale("C")).unwrap();
    assert!(object.tables().is_some());
    assert!(object.compiled().had_tables);
}

#[test]
fn bad_locale_stops_before_compile() {
    let engine = MockEngine {
        compile_error: Some(CompileFailure {
            message: "unreachable".to_string(),
            offset: 0,
        }),
        ..MockEngine::new()
    };
    let err = build(&engine, &CompileRequest::new(b"abc").locale("xx_NOWHERE.bogus-charset"))
        .err()
        .unwrap();
    assert!(matches!(err, Error::Locale(_)));
}

#[test]
fn names_are_copied_at_build() {
    let engine = MockEngine {
        names: vec![(1, "first"), (3, "third")],
        ..MockEngine::new()
    };
    let object = build(&engine, &CompileRequest::new(b"abc")).unwrap();
    let names = object.names();
    assert_eq!(names.len(), 2);
    assert_eq!(names.entry_size(), 8);
    assert_eq!(names.entry(2), Some((3, &b"third"[..])));
}

#[test]
fn name_introspection_failure_is_passed_through() {
    let engine = MockEngine {
        names: vec![(1, "x")],
        info_failure: Some((InfoSelector::NameEntrySize, -3)),
        ..MockEngine::new()
    };
    let err = build(&engine, &CompileRequest::new(b"abc")).err().unwrap();
    assert_eq!(err, Error::Engine(-3));
    assert_eq!(err.code(), -16403);
}

#[test]
fn capture_count_comes_from_engine() {
    let engine = MockEngine {
        capture_count: 4,
        ..MockEngine::new()
    };
    let object = build(&engine, &CompileRequest::new(b"abc")).unwrap();
    assert_eq!(object.capture_count(&engine).unwrap(), 4);
}
