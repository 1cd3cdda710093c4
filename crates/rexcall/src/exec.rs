// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Matching against a registered pattern and reading back the result.

use crate::context::Context;
use crate::engine::{Engine, code};
use crate::error::{Error, Result};
use crate::flags::EXEC_OPTIONS;
use crate::registry::Handle;

impl<E: Engine> Context<E> {
    /// Match `subject[..length]` from `start_offset`.
    ///
    /// Returns the number of pairs set in the match vector, or `0` when
    /// the subject does not match. Negative `length` and out-of-range
    /// offsets are for the engine to reject. A failed exec leaves the
    /// pattern usable.
    pub fn exec(
        &mut self,
        handle: Handle,
        subject: &[u8],
        length: i32,
        start_offset: i32,
        options: &str,
    ) -> Result<i32> {
        let options = EXEC_OPTIONS.parse_list(options)?;
        let engine = &self.engine;
        let object = self.objects.get_mut(handle)?;
        if usize::try_from(length).is_ok_and(|n| n > subject.len()) {
            return Err(Error::Length);
        }

        let captures = usize::try_from(object.capture_count(engine)?)
            .map_err(|_| Error::Engine(code::INTERNAL))?;
        let size = captures
            .checked_add(1)
            .and_then(|n| n.checked_mul(3))
            .ok_or(Error::OutOfMemory)?;
        let mut ovector = Vec::new();
        ovector.try_reserve_exact(size).map_err(|_| Error::OutOfMemory)?;
        ovector.resize(size, 0);

        let rc = object.run(engine, subject, length, start_offset, options, ovector);
        tracing::debug!("exec {} from {} returned {}", handle, start_offset, rc);
        match rc {
            code::NOMATCH => Ok(0),
            0 => Err(Error::InternalBuffer),
            n if n > 0 => Ok(n),
            raw => Err(Error::Engine(raw)),
        }
    }

    /// The vector filled by the last exec on `handle`.
    pub fn last_match(&self, handle: Handle) -> Result<&[i32]> {
        self.objects
            .get(handle)?
            .ovector()
            .ok_or(Error::InvalidReference)
    }

    /// Element `index` of the last match vector.
    pub fn ovector(&self, handle: Handle, index: i32) -> Result<i32> {
        let vector = self.last_match(handle)?;
        usize::try_from(index)
            .ok()
            .and_then(|i| vector.get(i))
            .copied()
            .ok_or(Error::InvalidReference)
    }

    /// Size of the last match vector.
    pub fn ovecsize(&self, handle: Handle) -> Result<i32> {
        Ok(self.last_match(handle)?.len() as i32)
    }
}

#[cfg(test)]
#[path = "exec_tests.rs"]
mod tests;
