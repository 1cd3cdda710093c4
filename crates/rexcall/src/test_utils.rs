// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Shared unit test utilities.
//!
//! [`MockEngine`] is scripted through its public fields so tests can reach
//! paths the real engine never takes (study errors, a zero exec return,
//! failing introspection).

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use std::cell::Cell;

use crate::context::Context;
use crate::engine::{
    CompileFailure, ConfigSelector, ConfigValue, Engine, Extra, InfoSelector, InfoValue, code,
};
use crate::locale::CharTables;

/// A pattern as the mock engine sees it.
#[derive(Debug)]
pub struct MockPattern {
    pub source: Vec<u8>,
    pub options: i32,
    pub had_tables: bool,
    names: Vec<u8>,
    entry_size: i32,
}

#[derive(Debug)]
pub struct MockEngine {
    /// Returned by every compile when set.
    pub compile_error: Option<CompileFailure>,
    /// Returned by every study when set.
    pub study_error: Option<String>,
    /// Whether study produces data.
    pub studies: bool,
    pub capture_count: i32,
    /// Returned by every exec.
    pub exec_rc: i32,
    /// Named groups reported for every pattern, in table order.
    pub names: Vec<(u16, &'static str)>,
    /// Selector whose fullinfo fails, and the code it fails with.
    pub info_failure: Option<(InfoSelector, i32)>,
    /// Value reported for the NEWLINE configuration selector.
    pub newline: i32,
    pub exec_calls: Cell<usize>,
    pub last_ovector_len: Cell<usize>,
}

impl MockEngine {
    pub fn new() -> Self {
        Self {
            compile_error: None,
            study_error: None,
            studies: false,
            capture_count: 1,
            exec_rc: 2,
            names: Vec::new(),
            info_failure: None,
            newline: 10,
            exec_calls: Cell::new(0),
            last_ovector_len: Cell::new(0),
        }
    }

    /// A context over this engine with the given object limit.
    pub fn context(self, limit: usize) -> Context<MockEngine> {
        Context::with_engine(self, limit)
    }
}

impl Engine for MockEngine {
    type Pattern = MockPattern;
    type Study = ();

    fn version(&self) -> &'static str {
        "mock 1.0"
    }

    fn compile(
        &self,
        pattern: &[u8],
        options: i32,
        tables: Option<&CharTables>,
    ) -> Result<MockPattern, CompileFailure> {
        if let Some(failure) = &self.compile_error {
            return Err(failure.clone());
        }
        let stride = 3 + self.names.iter().map(|(_, n)| n.len()).max().unwrap_or(0);
        let mut names = vec![0u8; stride * self.names.len()];
        for (entry, (group, name)) in names.chunks_exact_mut(stride).zip(&self.names) {
            entry[..2].copy_from_slice(&group.to_be_bytes());
            entry[2..2 + name.len()].copy_from_slice(name.as_bytes());
        }
        Ok(MockPattern {
            source: pattern.to_vec(),
            options,
            had_tables: tables.is_some(),
            names,
            entry_size: stride as i32,
        })
    }

    fn study(&self, _pattern: &MockPattern) -> Result<Option<()>, String> {
        match &self.study_error {
            Some(message) => Err(message.clone()),
            None => Ok(self.studies.then_some(())),
        }
    }

    fn exec(
        &self,
        _pattern: &MockPattern,
        _extra: Option<&Extra<()>>,
        _subject: &[u8],
        _length: i32,
        _start_offset: i32,
        _options: i32,
        ovector: &mut [i32],
    ) -> i32 {
        self.exec_calls.set(self.exec_calls.get() + 1);
        self.last_ovector_len.set(ovector.len());
        for (i, slot) in ovector.iter_mut().enumerate() {
            *slot = i as i32;
        }
        self.exec_rc
    }

    fn fullinfo<'p>(
        &self,
        pattern: &'p MockPattern,
        extra: Option<&Extra<()>>,
        what: InfoSelector,
    ) -> Result<InfoValue<'p>, i32> {
        if let Some((_, rc)) = self.info_failure.filter(|&(failing, _)| failing == what) {
            return Err(rc);
        }
        Ok(match what {
            InfoSelector::Options => InfoValue::Int(pattern.options),
            InfoSelector::CaptureCount => InfoValue::Int(self.capture_count),
            InfoSelector::NameCount => InfoValue::Int(self.names.len() as i32),
            InfoSelector::NameEntrySize => InfoValue::Int(pattern.entry_size),
            InfoSelector::NameTable => InfoValue::Bytes(Some(&pattern.names)),
            InfoSelector::FirstTable => InfoValue::Bytes(Some(b"0123456789")),
            InfoSelector::DefaultTables => InfoValue::Bytes(None),
            InfoSelector::StudySize => {
                InfoValue::Size(extra.and_then(Extra::study).map_or(0, |_| 64))
            }
            InfoSelector::Size => InfoValue::Size(pattern.source.len()),
            InfoSelector::JitSize => InfoValue::Size(0),
            _ => InfoValue::Int(0),
        })
    }

    fn config(&self, what: ConfigSelector) -> Result<ConfigValue, i32> {
        Ok(match what {
            ConfigSelector::Newline => ConfigValue::Int(self.newline),
            ConfigSelector::MatchLimit => ConfigValue::Long(42),
            ConfigSelector::JitTarget => ConfigValue::Text(Some("mock-target".to_string())),
            ConfigSelector::Utf16 => return Err(code::BADOPTION),
            _ => ConfigValue::Int(0),
        })
    }
}
