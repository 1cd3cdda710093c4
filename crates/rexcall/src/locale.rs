// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Locale-specific character classification tables.
//!
// Allow unsafe_code for setlocale(3) and the <ctype.h> classifiers.
// Safety justification:
// 1. Every locale name passed to setlocale is an owned, NUL-terminated CString
// 2. The string returned by setlocale is copied before the next call
// 3. All switches are serialized by LOCALE_LOCK
#![allow(unsafe_code)]
//!
//! `LC_CTYPE` is process-wide state. Tables are built by installing the
//! requested locale, sampling the C library classifiers for every byte
//! value, and restoring the previous locale before returning. A single
//! process-wide lock serializes the whole sequence so no other caller ever
//! observes the temporary locale.

use std::ffi::{CStr, CString};
use std::sync::{Mutex, PoisonError};

use crate::error::{Error, Result};

/// Locale name meaning "whatever the process environment selects".
pub const ENV_LOCALE: &str = "ENV";

static LOCALE_LOCK: Mutex<()> = Mutex::new(());

/// `ctypes` bit: white space.
pub const CTYPE_SPACE: u8 = 0x01;
/// `ctypes` bit: letter.
pub const CTYPE_LETTER: u8 = 0x02;
/// `ctypes` bit: decimal digit.
pub const CTYPE_DIGIT: u8 = 0x04;
/// `ctypes` bit: hexadecimal digit.
pub const CTYPE_XDIGIT: u8 = 0x08;
/// `ctypes` bit: word character (alphanumeric or underscore).
pub const CTYPE_WORD: u8 = 0x10;

/// Per-byte classification captured under one locale.
#[derive(Clone, PartialEq, Eq)]
pub struct CharTables {
    /// Lower-case mapping.
    pub lower: [u8; 256],
    /// Case-flip mapping (lower to upper and upper to lower).
    pub flip: [u8; 256],
    /// `CTYPE_*` bits.
    pub ctypes: [u8; 256],
}

impl std::fmt::Debug for CharTables {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CharTables").finish_non_exhaustive()
    }
}

impl CharTables {
    /// Build tables for `name`: `ENV` (any case) selects the environment's
    /// locale, anything else is passed to the C library as-is.
    pub fn for_locale(name: &str) -> Result<Self> {
        let requested = if name.eq_ignore_ascii_case(ENV_LOCALE) {
            ""
        } else {
            name
        };
        let c_name = CString::new(requested).map_err(|_| Error::Locale(name.to_string()))?;

        let _lock = LOCALE_LOCK.lock().unwrap_or_else(PoisonError::into_inner);
        let _restore = CtypeGuard::switch(&c_name).ok_or_else(|| Error::Locale(name.to_string()))?;
        tracing::debug!("building character tables for locale {:?}", name);
        Ok(Self::sample())
    }

    fn sample() -> Self {
        let mut tables = Self {
            lower: [0; 256],
            flip: [0; 256],
            ctypes: [0; 256],
        };
        for byte in 0..=255u8 {
            let c = libc::c_int::from(byte);
            let i = usize::from(byte);
            // SAFETY: every value in 0..=255 is a valid argument to the ctype functions.
            unsafe {
                let lower = libc::tolower(c);
                let upper = libc::toupper(c);
                tables.lower[i] = lower as u8;
                tables.flip[i] = if lower == c { upper as u8 } else { lower as u8 };

                let mut bits = 0;
                if libc::isspace(c) != 0 {
                    bits |= CTYPE_SPACE;
                }
                if libc::isalpha(c) != 0 {
                    bits |= CTYPE_LETTER;
                }
                if libc::isdigit(c) != 0 {
                    bits |= CTYPE_DIGIT;
                }
                if libc::isxdigit(c) != 0 {
                    bits |= CTYPE_XDIGIT;
                }
                if libc::isalnum(c) != 0 || byte == b'_' {
                    bits |= CTYPE_WORD;
                }
                tables.ctypes[i] = bits;
            }
        }
        tables
    }
}

/// Name of the current `LC_CTYPE` locale.
pub fn current_ctype() -> Option<String> {
    let _lock = LOCALE_LOCK.lock().unwrap_or_else(PoisonError::into_inner);
    query_ctype().map(|name| name.to_string_lossy().into_owned())
}

fn query_ctype() -> Option<CString> {
    // SAFETY: a null locale only queries; the result is copied immediately.
    let current = unsafe { libc::setlocale(libc::LC_CTYPE, std::ptr::null()) };
    if current.is_null() {
        return None;
    }
    // SAFETY: setlocale returned a valid NUL-terminated string.
    Some(unsafe { CStr::from_ptr(current) }.to_owned())
}

/// Restores the saved `LC_CTYPE` when dropped. Callers hold `LOCALE_LOCK`.
struct CtypeGuard {
    saved: Option<CString>,
}

impl CtypeGuard {
    fn switch(name: &CStr) -> Option<Self> {
        let saved = query_ctype();
        // SAFETY: `name` is NUL-terminated and outlives the call.
        let installed = unsafe { libc::setlocale(libc::LC_CTYPE, name.as_ptr()) };
        if installed.is_null() {
            return None;
        }
        Some(Self { saved })
    }
}

impl Drop for CtypeGuard {
    fn drop(&mut self) {
        if let Some(saved) = &self.saved {
            // SAFETY: `saved` is an owned copy of a name setlocale accepted before.
            unsafe { libc::setlocale(libc::LC_CTYPE, saved.as_ptr()) };
        }
    }
}

#[cfg(test)]
#[path = "locale_tests.rs"]
mod tests;
