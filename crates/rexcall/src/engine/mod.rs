// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! The matching engine seam.
//!
//! The adapter treats the engine as a black box with five operations
//! (compile, study, exec, fullinfo, config) that report failures as
//! negative integer codes. Option bits, selector numbers and return codes
//! follow the classic PCRE layout so that masks handed across the host
//! boundary stay stable whichever engine sits behind the trait.

pub mod fancy;

use std::num::NonZeroU64;

use crate::locale::CharTables;

pub use fancy::FancyEngine;

/// Compile and exec option bits.
pub mod options {
    pub const CASELESS: i32 = 0x0000_0001;
    pub const MULTILINE: i32 = 0x0000_0002;
    pub const DOTALL: i32 = 0x0000_0004;
    pub const EXTENDED: i32 = 0x0000_0008;
    pub const ANCHORED: i32 = 0x0000_0010;
    pub const DOLLAR_ENDONLY: i32 = 0x0000_0020;
    pub const EXTRA: i32 = 0x0000_0040;
    pub const NOTBOL: i32 = 0x0000_0080;
    pub const NOTEOL: i32 = 0x0000_0100;
    pub const UNGREEDY: i32 = 0x0000_0200;
    pub const NOTEMPTY: i32 = 0x0000_0400;
    pub const UTF8: i32 = 0x0000_0800;
    pub const NO_AUTO_CAPTURE: i32 = 0x0000_1000;
    pub const NO_UTF8_CHECK: i32 = 0x0000_2000;
    pub const AUTO_CALLOUT: i32 = 0x0000_4000;
    pub const PARTIAL_SOFT: i32 = 0x0000_8000;
    pub const DFA_SHORTEST: i32 = 0x0001_0000;
    pub const DFA_RESTART: i32 = 0x0002_0000;
    pub const FIRSTLINE: i32 = 0x0004_0000;
    pub const DUPNAMES: i32 = 0x0008_0000;
    pub const NEWLINE_CR: i32 = 0x0010_0000;
    pub const NEWLINE_LF: i32 = 0x0020_0000;
    pub const NEWLINE_CRLF: i32 = 0x0030_0000;
    pub const NEWLINE_ANY: i32 = 0x0040_0000;
    pub const NEWLINE_ANYCRLF: i32 = 0x0050_0000;
    pub const BSR_ANYCRLF: i32 = 0x0080_0000;
    pub const BSR_UNICODE: i32 = 0x0100_0000;
    pub const JAVASCRIPT_COMPAT: i32 = 0x0200_0000;
    pub const NO_START_OPTIMIZE: i32 = 0x0400_0000;
    pub const PARTIAL_HARD: i32 = 0x0800_0000;
    pub const NOTEMPTY_ATSTART: i32 = 0x1000_0000;
    pub const UCP: i32 = 0x2000_0000;

    /// All newline-convention bits.
    pub const NEWLINE_BITS: i32 = NEWLINE_CR | NEWLINE_LF | NEWLINE_ANY;
}

/// Raw engine return codes.
pub mod code {
    pub const NOMATCH: i32 = -1;
    pub const NULL: i32 = -2;
    pub const BADOPTION: i32 = -3;
    pub const NOMEMORY: i32 = -6;
    pub const MATCHLIMIT: i32 = -8;
    pub const BADUTF8: i32 = -10;
    pub const BADUTF8_OFFSET: i32 = -11;
    pub const INTERNAL: i32 = -14;
    pub const RECURSIONLIMIT: i32 = -21;
    pub const BADOFFSET: i32 = -24;
    pub const BADLENGTH: i32 = -32;
}

/// Pattern introspection selectors, numbered as the engine numbers them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InfoSelector {
    Options = 0,
    Size = 1,
    CaptureCount = 2,
    BackrefMax = 3,
    FirstByte = 4,
    FirstTable = 5,
    LastLiteral = 6,
    NameEntrySize = 7,
    NameCount = 8,
    NameTable = 9,
    StudySize = 10,
    DefaultTables = 11,
    OkPartial = 12,
    JChanged = 13,
    HasCrOrLf = 14,
    MinLength = 15,
    Jit = 16,
    JitSize = 17,
}

impl TryFrom<i32> for InfoSelector {
    type Error = i32;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        use InfoSelector::*;
        Ok(match value {
            0 => Options,
            1 => Size,
            2 => CaptureCount,
            3 => BackrefMax,
            4 => FirstByte,
            5 => FirstTable,
            6 => LastLiteral,
            7 => NameEntrySize,
            8 => NameCount,
            9 => NameTable,
            10 => StudySize,
            11 => DefaultTables,
            12 => OkPartial,
            13 => JChanged,
            14 => HasCrOrLf,
            15 => MinLength,
            16 => Jit,
            17 => JitSize,
            other => return Err(other),
        })
    }
}

/// Engine build-configuration selectors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigSelector {
    Utf8 = 0,
    Newline = 1,
    LinkSize = 2,
    PosixMallocThreshold = 3,
    MatchLimit = 4,
    StackRecurse = 5,
    UnicodeProperties = 6,
    MatchLimitRecursion = 7,
    Bsr = 8,
    Jit = 9,
    Utf16 = 10,
    JitTarget = 11,
}

impl TryFrom<i32> for ConfigSelector {
    type Error = i32;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        use ConfigSelector::*;
        Ok(match value {
            0 => Utf8,
            1 => Newline,
            2 => LinkSize,
            3 => PosixMallocThreshold,
            4 => MatchLimit,
            5 => StackRecurse,
            6 => UnicodeProperties,
            7 => MatchLimitRecursion,
            8 => Bsr,
            9 => Jit,
            10 => Utf16,
            11 => JitTarget,
            other => return Err(other),
        })
    }
}

/// A value reported by [`Engine::fullinfo`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InfoValue<'p> {
    Int(i32),
    Size(usize),
    /// Engine-owned bytes; `None` when the engine has no such table.
    Bytes(Option<&'p [u8]>),
}

/// A value reported by [`Engine::config`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigValue {
    Int(i32),
    Long(i64),
    Text(Option<String>),
}

/// Why the engine refused to compile a pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompileFailure {
    pub message: String,
    /// Byte offset in the pattern where compilation stopped.
    pub offset: i32,
}

/// Where a pattern's study data came from.
#[derive(Debug)]
pub enum StudyOrigin<S> {
    /// Produced by [`Engine::study`].
    Engine(S),
    /// Synthesized by the adapter only to carry match limits.
    Local,
}

/// Study data plus the per-pattern match limits attached after study.
#[derive(Debug)]
pub struct Extra<S> {
    pub origin: StudyOrigin<S>,
    pub match_limit: Option<NonZeroU64>,
    pub recursion_limit: Option<NonZeroU64>,
}

impl<S> Extra<S> {
    pub fn studied(study: S) -> Self {
        Self {
            origin: StudyOrigin::Engine(study),
            match_limit: None,
            recursion_limit: None,
        }
    }

    pub fn local() -> Self {
        Self {
            origin: StudyOrigin::Local,
            match_limit: None,
            recursion_limit: None,
        }
    }

    /// Engine study data, if the engine produced any.
    pub fn study(&self) -> Option<&S> {
        match &self.origin {
            StudyOrigin::Engine(study) => Some(study),
            StudyOrigin::Local => None,
        }
    }

    /// The tightest of the configured limits.
    pub fn effective_limit(&self) -> Option<NonZeroU64> {
        match (self.match_limit, self.recursion_limit) {
            (Some(m), Some(r)) => Some(m.min(r)),
            (m, r) => m.or(r),
        }
    }
}

/// A pattern-matching engine driven through integer codes.
pub trait Engine {
    /// A compiled pattern.
    type Pattern;
    /// Optimisation data produced by [`Engine::study`].
    type Study;

    /// Human-readable engine version.
    fn version(&self) -> &'static str;

    /// Compile `pattern` with compile option bits `options`.
    fn compile(
        &self,
        pattern: &[u8],
        options: i32,
        tables: Option<&CharTables>,
    ) -> Result<Self::Pattern, CompileFailure>;

    /// Optimisation pass. `Ok(None)` means nothing worth keeping was found.
    fn study(&self, pattern: &Self::Pattern) -> Result<Option<Self::Study>, String>;

    /// Match `subject[..length]` from `start_offset`, filling `ovector`.
    ///
    /// Returns the highest captured group number plus one, `0` if `ovector`
    /// was too small for every group, or a negative code.
    #[allow(clippy::too_many_arguments)]
    fn exec(
        &self,
        pattern: &Self::Pattern,
        extra: Option<&Extra<Self::Study>>,
        subject: &[u8],
        length: i32,
        start_offset: i32,
        options: i32,
        ovector: &mut [i32],
    ) -> i32;

    /// Report one property of a compiled pattern.
    fn fullinfo<'p>(
        &self,
        pattern: &'p Self::Pattern,
        extra: Option<&Extra<Self::Study>>,
        what: InfoSelector,
    ) -> Result<InfoValue<'p>, i32>;

    /// Report one build-configuration value.
    fn config(&self, what: ConfigSelector) -> Result<ConfigValue, i32>;
}
