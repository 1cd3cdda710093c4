// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! A compiled pattern and the state the adapter keeps alongside it.

use std::num::NonZeroU64;

use crate::buffer::until_nul;
use crate::context::CompileRequest;
use crate::engine::{Engine, Extra, InfoSelector, InfoValue, code};
use crate::error::{Error, Result};
use crate::locale::CharTables;

/// Named-capture table copied from the engine at compile time.
///
/// Entries are `entry_size` bytes: a big-endian group number in the first
/// two bytes, then the NUL-padded name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NameTable {
    count: usize,
    entry_size: usize,
    bytes: Vec<u8>,
}

impl NameTable {
    /// Number of named groups.
    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    pub fn entry_size(&self) -> usize {
        self.entry_size
    }

    /// Group number and name of entry `index`, counting from 1.
    pub fn entry(&self, index: usize) -> Option<(u16, &[u8])> {
        if index == 0 || index > self.count {
            return None;
        }
        let start = (index - 1) * self.entry_size;
        let entry = self.bytes.get(start..start + self.entry_size)?;
        let (group, name) = entry.split_at_checked(2)?;
        Some((u16::from_be_bytes([group[0], group[1]]), until_nul(name)))
    }
}

/// One live compiled pattern.
///
/// Fields drop in declaration order: study data, locale tables, match
/// vector, then the compiled pattern itself.
pub struct PatternObject<E: Engine> {
    extra: Option<Extra<E::Study>>,
    tables: Option<CharTables>,
    ovector: Option<Vec<i32>>,
    names: NameTable,
    compiled: E::Pattern,
}

impl<E: Engine> PatternObject<E> {
    /// Run every compile step short of registration.
    ///
    /// Anything built before a failing step is dropped on return, so a
    /// failed build leaves nothing behind.
    pub(crate) fn build(engine: &E, request: &CompileRequest<'_>, options: i32) -> Result<Self> {
        let tables = match request.locale {
            "" => None,
            name => Some(CharTables::for_locale(name)?),
        };

        let compiled = engine
            .compile(request.pattern, options, tables.as_ref())
            .map_err(|failure| Error::Compile {
                message: failure.message,
                offset: failure.offset,
            })?;

        let mut extra = engine
            .study(&compiled)
            .map_err(Error::Study)?
            .map(Extra::studied);

        let match_limit = NonZeroU64::new(request.match_limit);
        let recursion_limit = NonZeroU64::new(request.recursion_limit);
        if match_limit.is_some() || recursion_limit.is_some() {
            let extra = extra.get_or_insert_with(Extra::local);
            extra.match_limit = match_limit;
            extra.recursion_limit = recursion_limit;
        }

        let names = fetch_names(engine, &compiled, extra.as_ref())?;
        Ok(Self {
            extra,
            tables,
            ovector: None,
            names,
            compiled,
        })
    }

    pub fn compiled(&self) -> &E::Pattern {
        &self.compiled
    }

    pub fn extra(&self) -> Option<&Extra<E::Study>> {
        self.extra.as_ref()
    }

    /// Locale tables, present only when a locale was requested.
    pub fn tables(&self) -> Option<&CharTables> {
        self.tables.as_ref()
    }

    pub fn names(&self) -> &NameTable {
        &self.names
    }

    /// The vector filled by the most recent exec, if any.
    pub fn ovector(&self) -> Option<&[i32]> {
        self.ovector.as_deref()
    }

    /// Number of capturing groups, as the engine reports it.
    pub fn capture_count(&self, engine: &E) -> Result<i32> {
        info_int(engine.fullinfo(&self.compiled, self.extra(), InfoSelector::CaptureCount))
    }

    /// Install `ovector` in place of the previous one and match into it.
    pub(crate) fn run(
        &mut self,
        engine: &E,
        subject: &[u8],
        length: i32,
        start_offset: i32,
        options: i32,
        ovector: Vec<i32>,
    ) -> i32 {
        let ovector = self.ovector.insert(ovector);
        engine.exec(
            &self.compiled,
            self.extra.as_ref(),
            subject,
            length,
            start_offset,
            options,
            ovector,
        )
    }
}

fn fetch_names<E: Engine>(
    engine: &E,
    compiled: &E::Pattern,
    extra: Option<&Extra<E::Study>>,
) -> Result<NameTable> {
    let count = info_int(engine.fullinfo(compiled, extra, InfoSelector::NameCount))?;
    if count <= 0 {
        return Ok(NameTable::default());
    }
    let entry_size = info_int(engine.fullinfo(compiled, extra, InfoSelector::NameEntrySize))?;
    let InfoValue::Bytes(Some(raw)) = engine
        .fullinfo(compiled, extra, InfoSelector::NameTable)
        .map_err(Error::Engine)?
    else {
        return Err(Error::Engine(code::NULL));
    };

    let count = count as usize;
    let entry_size = usize::try_from(entry_size).map_err(|_| Error::Engine(code::INTERNAL))?;
    let len = count.checked_mul(entry_size).ok_or(Error::OutOfMemory)?;
    let raw = raw.get(..len).ok_or(Error::Engine(code::INTERNAL))?;

    let mut bytes = Vec::new();
    bytes.try_reserve_exact(len).map_err(|_| Error::OutOfMemory)?;
    bytes.extend_from_slice(raw);
    Ok(NameTable {
        count,
        entry_size,
        bytes,
    })
}

fn info_int(value: std::result::Result<InfoValue<'_>, i32>) -> Result<i32> {
    match value.map_err(Error::Engine)? {
        InfoValue::Int(v) => Ok(v),
        _ => Err(Error::Engine(code::INTERNAL)),
    }
}

#[cfg(test)]
#[path = "pattern_tests.rs"]
mod tests;
