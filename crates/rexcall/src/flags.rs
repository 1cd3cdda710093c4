// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Named-flag codec.
//!
//! Each namespace of option names (compile options, exec options,
//! introspection selectors, configuration selectors, newline encodings) is
//! its own [`FlagTable`]. Names are matched case-insensitively; lists are
//! `|`-delimited.

use std::sync::LazyLock;

use crate::engine::{ConfigSelector, InfoSelector, options as opt};
use crate::error::{Error, Result};

/// Separator between names in an option list.
pub const LIST_DELIMITER: char = '|';

/// An ordered association of canonical names to flag or selector values.
#[derive(Debug)]
pub struct FlagTable {
    entries: Vec<(&'static str, i32)>,
    /// Entry indices in formatting priority: more bits first, ties in table order.
    priority: Vec<usize>,
}

impl FlagTable {
    pub fn new(entries: &[(&'static str, i32)]) -> Self {
        let mut priority: Vec<usize> = (0..entries.len()).collect();
        priority.sort_by_key(|&i| std::cmp::Reverse(entries[i].1.count_ones()));
        Self {
            entries: entries.to_vec(),
            priority,
        }
    }

    /// Value of a single name.
    pub fn lookup(&self, name: &str) -> Result<i32> {
        self.entries
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|&(_, v)| v)
            .ok_or_else(|| Error::UnknownOption(name.to_string()))
    }

    /// OR together every name in a `|`-delimited list.
    ///
    /// Empty tokens are skipped, so `""` parses to `0`. The first unknown
    /// token is reported on its own, not the whole list.
    pub fn parse_list(&self, text: &str) -> Result<i32> {
        text.split(LIST_DELIMITER)
            .filter(|token| !token.is_empty())
            .try_fold(0, |bits, token| Ok(bits | self.lookup(token)?))
    }

    /// Render a bitmask as a `|`-delimited list of names.
    ///
    /// Composite entries are tried before the simple bits they cover, and
    /// every reported entry removes its bits from the remaining mask, so a
    /// combined value such as `NL_CRLF` is never also reported as
    /// `NL_CR|NL_LF`.
    pub fn format(&self, bits: i32) -> String {
        let mut remaining = bits;
        let mut names = Vec::new();
        for &i in &self.priority {
            let (name, value) = self.entries[i];
            if value != 0 && remaining & value == value {
                remaining &= !value;
                names.push(name);
            }
        }
        names.join("|")
    }

    /// Name whose value is exactly `value`.
    pub fn name_of(&self, value: i32) -> Option<&'static str> {
        self.entries
            .iter()
            .find(|&&(_, v)| v == value)
            .map(|&(n, _)| n)
    }

    /// Canonical names in table order.
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.iter().map(|&(n, _)| n)
    }
}

/// Options accepted when compiling a pattern.
pub static COMPILE_OPTIONS: LazyLock<FlagTable> = LazyLock::new(|| {
    FlagTable::new(&[
        ("ANCHORED", opt::ANCHORED),
        ("CASELESS", opt::CASELESS),
        ("DOLLAR_ENDONLY", opt::DOLLAR_ENDONLY),
        ("DOTALL", opt::DOTALL),
        ("EXTENDED", opt::EXTENDED),
        ("FIRSTLINE", opt::FIRSTLINE),
        ("MULTILINE", opt::MULTILINE),
        ("NO_AUTO_CAPTURE", opt::NO_AUTO_CAPTURE),
        ("DUPNAMES", opt::DUPNAMES),
        ("UNGREEDY", opt::UNGREEDY),
        ("BSR_ANYCRLF", opt::BSR_ANYCRLF),
        ("BSR_UNICODE", opt::BSR_UNICODE),
        ("JAVASCRIPT_COMPAT", opt::JAVASCRIPT_COMPAT),
        ("NL_ANY", opt::NEWLINE_ANY),
        ("NL_ANYCRLF", opt::NEWLINE_ANYCRLF),
        ("NL_CR", opt::NEWLINE_CR),
        ("NL_CRLF", opt::NEWLINE_CRLF),
        ("NL_LF", opt::NEWLINE_LF),
        ("UTF8", opt::UTF8),
        ("UCP", opt::UCP),
        ("NO_UTF8_CHECK", opt::NO_UTF8_CHECK),
    ])
});

/// Options accepted when executing a match.
pub static EXEC_OPTIONS: LazyLock<FlagTable> = LazyLock::new(|| {
    FlagTable::new(&[
        ("ANCHORED", opt::ANCHORED),
        ("BSR_ANYCRLF", opt::BSR_ANYCRLF),
        ("BSR_UNICODE", opt::BSR_UNICODE),
        ("NL_ANY", opt::NEWLINE_ANY),
        ("NL_ANYCRLF", opt::NEWLINE_ANYCRLF),
        ("NL_CR", opt::NEWLINE_CR),
        ("NL_CRLF", opt::NEWLINE_CRLF),
        ("NL_LF", opt::NEWLINE_LF),
        ("NOTBOL", opt::NOTBOL),
        ("NOTEOL", opt::NOTEOL),
        ("NOTEMPTY", opt::NOTEMPTY),
        ("NOTEMPTY_ATSTART", opt::NOTEMPTY_ATSTART),
        ("NO_START_OPTIMIZE", opt::NO_START_OPTIMIZE),
        ("NO_UTF8_CHECK", opt::NO_UTF8_CHECK),
        ("PARTIAL_SOFT", opt::PARTIAL_SOFT),
        ("PARTIAL_HARD", opt::PARTIAL_HARD),
    ])
});

/// Names used when reporting a compiled pattern's option mask.
///
/// Covers every bit the engine may report, including exec-only bits.
pub static PATTERN_OPTIONS: LazyLock<FlagTable> = LazyLock::new(|| {
    FlagTable::new(&[
        ("NL_CRLF", opt::NEWLINE_CRLF),
        ("NL_ANYCRLF", opt::NEWLINE_ANYCRLF),
        ("CASELESS", opt::CASELESS),
        ("MULTILINE", opt::MULTILINE),
        ("DOTALL", opt::DOTALL),
        ("EXTENDED", opt::EXTENDED),
        ("ANCHORED", opt::ANCHORED),
        ("DOLLAR_ENDONLY", opt::DOLLAR_ENDONLY),
        ("EXTRA", opt::EXTRA),
        ("NOTBOL", opt::NOTBOL),
        ("NOTEOL", opt::NOTEOL),
        ("UNGREEDY", opt::UNGREEDY),
        ("NOTEMPTY", opt::NOTEMPTY),
        ("UTF8", opt::UTF8),
        ("NO_AUTO_CAPTURE", opt::NO_AUTO_CAPTURE),
        ("NO_UTF8_CHECK", opt::NO_UTF8_CHECK),
        ("AUTO_CALLOUT", opt::AUTO_CALLOUT),
        ("PARTIAL_SOFT", opt::PARTIAL_SOFT),
        ("DFA_SHORTEST", opt::DFA_SHORTEST),
        ("DFA_RESTART", opt::DFA_RESTART),
        ("FIRSTLINE", opt::FIRSTLINE),
        ("DUPNAMES", opt::DUPNAMES),
        ("NL_CR", opt::NEWLINE_CR),
        ("NL_LF", opt::NEWLINE_LF),
        ("NL_ANY", opt::NEWLINE_ANY),
        ("BSR_ANYCRLF", opt::BSR_ANYCRLF),
        ("BSR_UNICODE", opt::BSR_UNICODE),
        ("JAVASCRIPT_COMPAT", opt::JAVASCRIPT_COMPAT),
        ("NO_START_OPTIMIZE", opt::NO_START_OPTIMIZE),
        ("PARTIAL_HARD", opt::PARTIAL_HARD),
        ("NOTEMPTY_ATSTART", opt::NOTEMPTY_ATSTART),
        ("UCP", opt::UCP),
    ])
});

/// Pattern introspection selectors offered to the host.
///
/// `NAMETABLE` is reachable only through the named-capture lookup and
/// `DEFAULT_TABLES` is engine-internal, so neither is listed.
pub static INFO_SELECTORS: LazyLock<FlagTable> = LazyLock::new(|| {
    use InfoSelector as I;
    FlagTable::new(&[
        ("OPTIONS", I::Options as i32),
        ("SIZE", I::Size as i32),
        ("CAPTURECOUNT", I::CaptureCount as i32),
        ("BACKREFMAX", I::BackrefMax as i32),
        ("FIRSTBYTE", I::FirstByte as i32),
        ("FIRSTTABLE", I::FirstTable as i32),
        ("LASTLITERAL", I::LastLiteral as i32),
        ("NAMEENTRYSIZE", I::NameEntrySize as i32),
        ("NAMECOUNT", I::NameCount as i32),
        ("STUDYSIZE", I::StudySize as i32),
        ("OKPARTIAL", I::OkPartial as i32),
        ("JCHANGED", I::JChanged as i32),
        ("HASCRORLF", I::HasCrOrLf as i32),
        ("MINLENGTH", I::MinLength as i32),
        ("JIT", I::Jit as i32),
        ("JITSIZE", I::JitSize as i32),
    ])
});

/// Engine configuration selectors offered to the host.
pub static CONFIG_SELECTORS: LazyLock<FlagTable> = LazyLock::new(|| {
    use ConfigSelector as C;
    FlagTable::new(&[
        ("UTF8", C::Utf8 as i32),
        ("NEWLINE", C::Newline as i32),
        ("LINK_SIZE", C::LinkSize as i32),
        ("POSIX_MALLOC_THRESHOLD", C::PosixMallocThreshold as i32),
        ("MATCH_LIMIT", C::MatchLimit as i32),
        ("STACKRECURSE", C::StackRecurse as i32),
        ("UNICODE_PROPERTIES", C::UnicodeProperties as i32),
        ("MATCH_LIMIT_RECURSION", C::MatchLimitRecursion as i32),
        ("BSR", C::Bsr as i32),
        ("JIT", C::Jit as i32),
        ("JITTARGET", C::JitTarget as i32),
    ])
});

/// Names for the engine's default newline convention.
pub static NEWLINE_NAMES: LazyLock<FlagTable> = LazyLock::new(|| {
    FlagTable::new(&[
        ("NL_LF", 10),
        ("NL_CR", 13),
        ("NL_CRLF", 3338),
        ("NL_ANY", -1),
        ("NL_ANYCRLF", -2),
    ])
});

#[cfg(test)]
#[path = "flags_tests.rs"]
mod tests;
