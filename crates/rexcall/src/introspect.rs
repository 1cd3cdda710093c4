// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Pattern and engine introspection by selector name.

use crate::context::Context;
use crate::engine::{ConfigSelector, ConfigValue, Engine, InfoSelector, InfoValue, code};
use crate::error::{Error, Result};
use crate::flags::{CONFIG_SELECTORS, INFO_SELECTORS, NEWLINE_NAMES, PATTERN_OPTIONS};
use crate::registry::Handle;

/// Bytes of the first-byte table reported by `FIRSTTABLE`.
pub const FIRST_TABLE_LEN: usize = 8;

/// A reported value: numeric, or text for the host's string buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    Number(i64),
    Text(Vec<u8>),
}

impl Reply {
    pub fn is_text(&self) -> bool {
        matches!(self, Reply::Text(_))
    }
}

impl std::fmt::Display for Reply {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Reply::Number(n) => write!(f, "{n}"),
            Reply::Text(text) => write!(f, "{}", String::from_utf8_lossy(text)),
        }
    }
}

impl<E: Engine> Context<E> {
    /// Report one property of the pattern named by `handle`.
    ///
    /// The selector name is checked before the handle.
    pub fn fullinfo(&self, handle: Handle, selector: &str) -> Result<Reply> {
        let value = INFO_SELECTORS.lookup(selector)?;
        let object = self.objects.get(handle)?;
        let what = InfoSelector::try_from(value)
            .map_err(|_| Error::UnknownOption(selector.to_string()))?;
        let query = || {
            self.engine
                .fullinfo(object.compiled(), object.extra(), what)
                .map_err(Error::Engine)
        };

        match what {
            InfoSelector::BackrefMax
            | InfoSelector::CaptureCount
            | InfoSelector::FirstByte
            | InfoSelector::HasCrOrLf
            | InfoSelector::JChanged
            | InfoSelector::Jit
            | InfoSelector::LastLiteral
            | InfoSelector::MinLength
            | InfoSelector::NameEntrySize
            | InfoSelector::NameCount
            | InfoSelector::OkPartial => match query()? {
                InfoValue::Int(n) => Ok(Reply::Number(i64::from(n))),
                _ => Err(Error::Engine(code::INTERNAL)),
            },
            InfoSelector::JitSize | InfoSelector::Size | InfoSelector::StudySize => {
                match query()? {
                    InfoValue::Size(n) => Ok(Reply::Number(i64::try_from(n).unwrap_or(i64::MAX))),
                    _ => Err(Error::Engine(code::INTERNAL)),
                }
            }
            InfoSelector::Options => match query()? {
                InfoValue::Int(bits) => Ok(Reply::Text(PATTERN_OPTIONS.format(bits).into_bytes())),
                _ => Err(Error::Engine(code::INTERNAL)),
            },
            InfoSelector::FirstTable => match query()? {
                InfoValue::Bytes(table) => Ok(Reply::Text(
                    table
                        .unwrap_or_default()
                        .iter()
                        .take(FIRST_TABLE_LEN)
                        .copied()
                        .collect(),
                )),
                _ => Err(Error::Engine(code::INTERNAL)),
            },
            InfoSelector::NameTable | InfoSelector::DefaultTables => {
                Err(Error::UnknownOption(selector.to_string()))
            }
        }
    }

    /// Report one engine build-configuration value.
    pub fn config(&self, selector: &str) -> Result<Reply> {
        let value = CONFIG_SELECTORS.lookup(selector)?;
        let what = ConfigSelector::try_from(value)
            .map_err(|_| Error::UnknownOption(selector.to_string()))?;

        match (what, self.engine.config(what).map_err(Error::Engine)?) {
            (ConfigSelector::Newline, ConfigValue::Int(n)) => Ok(Reply::Text(
                NEWLINE_NAMES.name_of(n).unwrap_or_default().as_bytes().to_vec(),
            )),
            (ConfigSelector::Newline, _) => Err(Error::Engine(code::INTERNAL)),
            (_, ConfigValue::Int(n)) => Ok(Reply::Number(i64::from(n))),
            (_, ConfigValue::Long(n)) => Ok(Reply::Number(n)),
            (_, ConfigValue::Text(text)) => Ok(Reply::Text(text.unwrap_or_default().into_bytes())),
        }
    }

    /// Group number and name of named capture `index`, counting from 1.
    ///
    /// An index outside `1..=count` is not an error: it reports group 0
    /// and an empty name.
    pub fn name_entry(&self, handle: Handle, index: i32) -> Result<(i32, &[u8])> {
        let names = self.objects.get(handle)?.names();
        Ok(usize::try_from(index)
            .ok()
            .and_then(|i| names.entry(i))
            .map_or((0, &[][..]), |(group, name)| (i32::from(group), name)))
    }

    /// Adapter and engine version.
    pub fn version(&self) -> &'static str {
        self.engine.version()
    }
}

#[cfg(test)]
#[path = "introspect_tests.rs"]
mod tests;
