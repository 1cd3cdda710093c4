// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Default engine: fancy-regex for matching, regex for the study pass.
//!
//! fancy-regex gives backreferences, lookaround and a backtrack limit.
//! Studying a pattern compiles it a second time with the regex crate when
//! the syntax allows; such patterns then match on the finite-automaton
//! engine, which never backtracks.

use std::cell::RefCell;

use fancy_regex::{Regex, RegexBuilder, RuntimeError};

use super::{
    CompileFailure, ConfigSelector, ConfigValue, Engine, Extra, InfoSelector, InfoValue, code,
    options as opt,
};
use crate::locale::CharTables;

/// Backtracking steps allowed per match unless a pattern sets its own limit.
pub const DEFAULT_BACKTRACK_LIMIT: usize = 1_000_000;

/// Compile bits this engine honours or already behaves as.
const COMPILE_SUPPORTED: i32 = opt::CASELESS
    | opt::MULTILINE
    | opt::DOTALL
    | opt::EXTENDED
    | opt::UNGREEDY
    | opt::ANCHORED
    | opt::FIRSTLINE
    | opt::DOLLAR_ENDONLY
    | opt::UTF8
    | opt::UCP
    | opt::NO_UTF8_CHECK
    | opt::DUPNAMES
    | opt::BSR_ANYCRLF
    | opt::BSR_UNICODE
    | opt::NEWLINE_LF;

/// Exec bits this engine honours or already behaves as.
const EXEC_SUPPORTED: i32 = opt::ANCHORED
    | opt::NO_START_OPTIMIZE
    | opt::NO_UTF8_CHECK
    | opt::BSR_ANYCRLF
    | opt::BSR_UNICODE
    | opt::NEWLINE_LF;

/// Start/end of every group of one match; `None` for groups that did not take part.
type Spans = Vec<Option<(usize, usize)>>;

/// The fancy-regex engine.
#[derive(Debug, Clone)]
pub struct FancyEngine {
    backtrack_limit: usize,
}

impl FancyEngine {
    pub fn new(backtrack_limit: usize) -> Self {
        Self { backtrack_limit }
    }

    pub fn backtrack_limit(&self) -> usize {
        self.backtrack_limit
    }
}

impl Default for FancyEngine {
    fn default() -> Self {
        Self::new(DEFAULT_BACKTRACK_LIMIT)
    }
}

/// A pattern compiled by [`FancyEngine`].
pub struct FancyPattern {
    source: String,
    /// `source` behind an inline-flag prefix.
    expanded: String,
    options: i32,
    regex: Regex,
    names: Vec<u8>,
    name_count: i32,
    name_entry_size: i32,
    /// Variant built with a per-pattern backtrack limit, keyed by that limit.
    limited: RefCell<Option<(u64, Regex)>>,
}

/// Study data: the same pattern on the regex crate.
pub struct FancyStudy {
    regex: regex::Regex,
}

impl Engine for FancyEngine {
    type Pattern = FancyPattern;
    type Study = FancyStudy;

    fn version(&self) -> &'static str {
        concat!("rexcall ", env!("CARGO_PKG_VERSION"), " (fancy-regex 0.14)")
    }

    // Case folding follows Unicode; locale tables are accepted but not consulted.
    fn compile(
        &self,
        pattern: &[u8],
        options: i32,
        _tables: Option<&CharTables>,
    ) -> Result<FancyPattern, CompileFailure> {
        let source = std::str::from_utf8(pattern).map_err(|e| CompileFailure {
            message: "invalid UTF-8 string".to_string(),
            offset: e.valid_up_to() as i32,
        })?;

        let newline = options & opt::NEWLINE_BITS;
        if options & !COMPILE_SUPPORTED != 0 || (newline != 0 && newline != opt::NEWLINE_LF) {
            let rejected = (options & !COMPILE_SUPPORTED) | (newline & !opt::NEWLINE_LF);
            return Err(CompileFailure {
                message: format!("option bits {rejected:#x} not supported by this engine"),
                offset: 0,
            });
        }

        let prefix = inline_flags(options);
        let expanded = format!("{prefix}{source}");
        let regex = RegexBuilder::new(&expanded)
            .backtrack_limit(self.backtrack_limit)
            .build()
            .map_err(|e| compile_failure(&e, prefix.len(), source.len()))?;

        let (names, name_count, name_entry_size) = name_table(&regex)?;
        tracing::trace!("compiled {:?} with options {:#x}", source, options);
        Ok(FancyPattern {
            source: source.to_string(),
            expanded,
            options,
            regex,
            names,
            name_count,
            name_entry_size,
            limited: RefCell::new(None),
        })
    }

    fn study(&self, pattern: &FancyPattern) -> Result<Option<FancyStudy>, String> {
        let Ok(regex) = regex::Regex::new(&pattern.expanded) else {
            return Ok(None);
        };
        if regex.captures_len() != pattern.regex.captures_len() {
            return Ok(None);
        }
        Ok(Some(FancyStudy { regex }))
    }

    fn exec(
        &self,
        pattern: &FancyPattern,
        extra: Option<&Extra<FancyStudy>>,
        subject: &[u8],
        length: i32,
        start_offset: i32,
        options: i32,
        ovector: &mut [i32],
    ) -> i32 {
        let newline = options & opt::NEWLINE_BITS;
        if options & !EXEC_SUPPORTED & !opt::NEWLINE_BITS != 0
            || (newline != 0 && newline != opt::NEWLINE_LF)
        {
            return code::BADOPTION;
        }
        let Some(subject) = usize::try_from(length).ok().and_then(|n| subject.get(..n)) else {
            return code::BADLENGTH;
        };
        let Some(start) = usize::try_from(start_offset)
            .ok()
            .filter(|&s| s <= subject.len())
        else {
            return code::BADOFFSET;
        };
        let Ok(text) = std::str::from_utf8(subject) else {
            return code::BADUTF8;
        };
        if !text.is_char_boundary(start) {
            return code::BADUTF8_OFFSET;
        }

        let spans = match self.find(pattern, extra, text, start) {
            Ok(Some(spans)) => spans,
            Ok(None) => return code::NOMATCH,
            Err(rc) => return rc,
        };
        let Some(Some((match_start, _))) = spans.first().copied() else {
            return code::INTERNAL;
        };

        let all_options = options | pattern.options;
        if all_options & opt::ANCHORED != 0 && match_start != start {
            return code::NOMATCH;
        }
        if pattern.options & opt::FIRSTLINE != 0 {
            let line_end = text[start..].find('\n').map_or(text.len(), |p| start + p);
            if match_start > line_end {
                return code::NOMATCH;
            }
        }
        fill_ovector(&spans, ovector)
    }

    fn fullinfo<'p>(
        &self,
        pattern: &'p FancyPattern,
        extra: Option<&Extra<FancyStudy>>,
        what: InfoSelector,
    ) -> Result<InfoValue<'p>, i32> {
        let value = match what {
            InfoSelector::Options => InfoValue::Int(pattern.options),
            InfoSelector::Size => InfoValue::Size(
                size_of::<FancyPattern>()
                    + pattern.source.len()
                    + pattern.expanded.len()
                    + pattern.names.len(),
            ),
            InfoSelector::CaptureCount => {
                InfoValue::Int(pattern.regex.captures_len().saturating_sub(1) as i32)
            }
            InfoSelector::BackrefMax => InfoValue::Int(backref_max(&pattern.source)),
            InfoSelector::FirstByte => InfoValue::Int(first_byte(&pattern.source, pattern.options)),
            InfoSelector::FirstTable | InfoSelector::DefaultTables => InfoValue::Bytes(None),
            InfoSelector::LastLiteral | InfoSelector::MinLength => InfoValue::Int(-1),
            InfoSelector::NameEntrySize => InfoValue::Int(pattern.name_entry_size),
            InfoSelector::NameCount => InfoValue::Int(pattern.name_count),
            InfoSelector::NameTable => InfoValue::Bytes(Some(&pattern.names)),
            InfoSelector::StudySize => InfoValue::Size(
                extra
                    .and_then(Extra::study)
                    .map_or(0, |_| size_of::<FancyStudy>()),
            ),
            InfoSelector::OkPartial => InfoValue::Int(1),
            InfoSelector::JChanged => InfoValue::Int(i32::from(pattern.source.contains("(?J"))),
            InfoSelector::HasCrOrLf => InfoValue::Int(i32::from(has_cr_or_lf(&pattern.source))),
            InfoSelector::Jit => InfoValue::Int(0),
            InfoSelector::JitSize => InfoValue::Size(0),
        };
        Ok(value)
    }

    fn config(&self, what: ConfigSelector) -> Result<ConfigValue, i32> {
        let limit = i64::try_from(self.backtrack_limit).unwrap_or(i64::MAX);
        Ok(match what {
            ConfigSelector::Utf8 | ConfigSelector::UnicodeProperties => ConfigValue::Int(1),
            ConfigSelector::Newline => ConfigValue::Int(10),
            ConfigSelector::LinkSize
            | ConfigSelector::PosixMallocThreshold
            | ConfigSelector::StackRecurse
            | ConfigSelector::Bsr
            | ConfigSelector::Jit => ConfigValue::Int(0),
            ConfigSelector::MatchLimit | ConfigSelector::MatchLimitRecursion => {
                ConfigValue::Long(limit)
            }
            ConfigSelector::JitTarget => ConfigValue::Text(None),
            ConfigSelector::Utf16 => return Err(code::BADOPTION),
        })
    }
}

impl FancyEngine {
    fn find(
        &self,
        pattern: &FancyPattern,
        extra: Option<&Extra<FancyStudy>>,
        text: &str,
        start: usize,
    ) -> Result<Option<Spans>, i32> {
        if let Some(study) = extra.and_then(Extra::study) {
            return Ok(study.regex.captures_at(text, start).map(|caps| {
                (0..caps.len())
                    .map(|i| caps.get(i).map(|m| (m.start(), m.end())))
                    .collect()
            }));
        }
        let Some(limit) = extra.and_then(Extra::effective_limit) else {
            return fancy_spans(&pattern.regex, text, start);
        };

        let limit = limit.get();
        let mut cache = pattern.limited.borrow_mut();
        if !matches!(&*cache, Some((cached, _)) if *cached == limit) {
            let regex = RegexBuilder::new(&pattern.expanded)
                .backtrack_limit(usize::try_from(limit).unwrap_or(usize::MAX))
                .build()
                .map_err(|_| code::INTERNAL)?;
            *cache = Some((limit, regex));
        }
        match cache.as_ref() {
            Some((_, regex)) => fancy_spans(regex, text, start),
            None => Err(code::INTERNAL),
        }
    }
}

fn fancy_spans(regex: &Regex, text: &str, start: usize) -> Result<Option<Spans>, i32> {
    match regex.captures_from_pos(text, start) {
        Ok(caps) => Ok(caps.map(|caps| {
            (0..caps.len())
                .map(|i| caps.get(i).map(|m| (m.start(), m.end())))
                .collect()
        })),
        Err(fancy_regex::Error::RuntimeError(RuntimeError::BacktrackLimitExceeded)) => {
            Err(code::MATCHLIMIT)
        }
        Err(fancy_regex::Error::RuntimeError(RuntimeError::StackOverflow)) => {
            Err(code::RECURSIONLIMIT)
        }
        Err(_) => Err(code::INTERNAL),
    }
}

/// Store offset pairs in the first two thirds of `ovector`.
///
/// Returns the highest matched group plus one, or `0` when not every
/// group up to that one fits.
fn fill_ovector(spans: &[Option<(usize, usize)>], ovector: &mut [i32]) -> i32 {
    let pairs = ovector.len() / 3;
    let highest = spans.iter().rposition(Option::is_some).map_or(0, |i| i + 1);
    for (i, span) in spans.iter().take(highest).enumerate() {
        if i >= pairs {
            return 0;
        }
        let (s, e) = span.map_or((-1, -1), |(s, e)| (s as i32, e as i32));
        ovector[2 * i] = s;
        ovector[2 * i + 1] = e;
    }
    highest as i32
}

fn inline_flags(options: i32) -> String {
    let flags: String = [
        (opt::CASELESS, 'i'),
        (opt::MULTILINE, 'm'),
        (opt::DOTALL, 's'),
        (opt::EXTENDED, 'x'),
        (opt::UNGREEDY, 'U'),
    ]
    .iter()
    .filter(|(bit, _)| options & bit != 0)
    .map(|&(_, flag)| flag)
    .collect();
    if flags.is_empty() {
        flags
    } else {
        format!("(?{flags})")
    }
}

fn compile_failure(err: &fancy_regex::Error, prefix_len: usize, source_len: usize) -> CompileFailure {
    let offset = match err {
        fancy_regex::Error::ParseError(pos, _) => pos.saturating_sub(prefix_len).min(source_len),
        _ => 0,
    };
    CompileFailure {
        message: err.to_string(),
        offset: offset as i32,
    }
}

/// Build the named-capture table: entries sorted by name, each holding the
/// big-endian group number, the name, and NUL padding to a common stride.
fn name_table(regex: &Regex) -> Result<(Vec<u8>, i32, i32), CompileFailure> {
    let mut named: Vec<(u16, &str)> = Vec::new();
    for (group, name) in regex.capture_names().enumerate() {
        let Some(name) = name else { continue };
        let group = u16::try_from(group).map_err(|_| CompileFailure {
            message: "too many capturing groups".to_string(),
            offset: 0,
        })?;
        named.push((group, name));
    }
    if named.is_empty() {
        return Ok((Vec::new(), 0, 0));
    }
    named.sort_by(|a, b| a.1.cmp(b.1));

    let stride = 3 + named.iter().map(|(_, n)| n.len()).max().unwrap_or(0);
    let mut table = vec![0u8; stride * named.len()];
    for (entry, (group, name)) in table.chunks_exact_mut(stride).zip(&named) {
        entry[..2].copy_from_slice(&group.to_be_bytes());
        entry[2..2 + name.len()].copy_from_slice(name.as_bytes());
    }
    Ok((table, named.len() as i32, stride as i32))
}

/// Highest numbered back-reference (`\N` or `\g{N}`) outside character classes.
fn backref_max(source: &str) -> i32 {
    let bytes = source.as_bytes();
    let mut max = 0;
    let mut in_class = false;
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'\\' => {
                let mut j = i + 1;
                if !in_class && bytes.get(j) == Some(&b'g') {
                    j += 1;
                    if bytes.get(j) == Some(&b'{') {
                        j += 1;
                    }
                }
                let digits = bytes[j.min(bytes.len())..]
                    .iter()
                    .take_while(|b| b.is_ascii_digit())
                    .count();
                if !in_class && digits > 0 && bytes[j] != b'0' {
                    let n = source[j..j + digits].parse::<i32>().unwrap_or(i32::MAX);
                    max = max.max(n);
                }
                i = j.max(i + 2);
                continue;
            }
            b'[' => in_class = true,
            b']' => in_class = false,
            _ => {}
        }
        i += 1;
    }
    max
}

/// Literal first byte, `-1` when every match starts a line, `-2` otherwise.
fn first_byte(source: &str, options: i32) -> i32 {
    let bytes = source.as_bytes();
    if bytes.contains(&b'|') {
        return -2;
    }
    match bytes.first() {
        Some(b'^') if options & opt::MULTILINE != 0 => -1,
        Some(&b)
            if options & (opt::CASELESS | opt::EXTENDED) == 0
                && (b.is_ascii_alphanumeric() || b" _-=:,;'\"<>/@#%&!~`".contains(&b))
                && !matches!(bytes.get(1), Some(b'?' | b'*' | b'{')) =>
        {
            i32::from(b)
        }
        _ => -2,
    }
}

/// Whether the pattern mentions CR or LF, literally or as an escape.
fn has_cr_or_lf(source: &str) -> bool {
    source.contains(['\r', '\n']) || source.contains("\\r") || source.contains("\\n")
}

#[cfg(test)]
#[path = "fancy_tests.rs"]
mod tests;
