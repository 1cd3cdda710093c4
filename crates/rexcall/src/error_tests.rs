// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use yare::parameterized;

use super::*;

#[parameterized(
    argument_count = { Error::ArgumentCount { expected: 6, actual: 5 }, -16384 },
    unknown_option = { Error::UnknownOption("BOGUS".into()), -16385 },
    object_limit = { Error::ObjectLimit { limit: 256 }, -16386 },
    invalid_reference = { Error::InvalidReference, -16387 },
    internal_buffer = { Error::InternalBuffer, -16388 },
    out_of_memory = { Error::OutOfMemory, -16389 },
    study = { Error::Study("bad".into()), -16390 },
    locale = { Error::Locale("xx".into()), -16391 },
    compile = { Error::Compile { message: "oops".into(), offset: 3 }, -16392 },
    length = { Error::Length, -16393 },
)]
fn layer_errors_use_reserved_block(error: Error, code: i32) {
    assert_eq!(error.code(), code);
}

#[test]
fn engine_codes_are_shifted_below_layer_block() {
    assert_eq!(Error::Engine(-8).code(), -16408);
    assert_eq!(Error::Engine(-1).code(), -16401);
    // The shifted block never overlaps the layer block.
    assert!(Error::Engine(-1).code() < Error::Length.code());
}

#[test]
fn diagnostic_only_for_engine_text() {
    let compile = Error::Compile {
        message: "missing )".into(),
        offset: 4,
    };
    assert_eq!(compile.diagnostic(), Some("missing )"));
    assert_eq!(Error::Study("no memory".into()).diagnostic(), Some("no memory"));
    assert_eq!(Error::InvalidReference.diagnostic(), None);
}

#[test]
fn display_includes_offending_token() {
    let err = Error::UnknownOption("CASELES".into());
    assert_eq!(err.to_string(), "unknown option name: CASELES");
}
