// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use super::*;

#[test]
fn c_locale_classifies_ascii() {
    let tables = CharTables::for_locale("C").unwrap();
    assert_eq!(tables.lower[usize::from(b'A')], b'a');
    assert_eq!(tables.flip[usize::from(b'a')], b'A');
    assert_eq!(tables.flip[usize::from(b'Z')], b'z');
    assert_eq!(tables.flip[usize::from(b'5')], b'5');

    let digit = tables.ctypes[usize::from(b'7')];
    assert_ne!(digit & CTYPE_DIGIT, 0);
    assert_ne!(digit & CTYPE_XDIGIT, 0);
    assert_ne!(digit & CTYPE_WORD, 0);
    assert_eq!(digit & CTYPE_LETTER, 0);

    assert_ne!(tables.ctypes[usize::from(b' ')] & CTYPE_SPACE, 0);
    assert_ne!(tables.ctypes[usize::from(b'_')] & CTYPE_WORD, 0);
    assert_eq!(tables.ctypes[usize::from(b'-')], 0);
}

#[test]
fn posix_is_an_alias_for_c() {
    let c = CharTables::for_locale("C").unwrap();
    let posix = CharTables::for_locale("POSIX").unwrap();
    assert!(c == posix);
}

#[test]
fn unknown_locale_is_rejected() {
    let err = CharTables::for_locale("xx_NOWHERE.bogus-charset").unwrap_err();
    assert_eq!(err, Error::Locale("xx_NOWHERE.bogus-charset".into()));
}

#[test]
fn interior_nul_is_rejected() {
    assert!(matches!(CharTables::for_locale("C\0UTF-8"), Err(Error::Locale(_))));
}

#[test]
fn previous_locale_is_restored() {
    let before = current_ctype();
    CharTables::for_locale("C").unwrap();
    let _ = CharTables::for_locale("xx_NOWHERE.bogus-charset");
    assert_eq!(current_ctype(), before);
}
