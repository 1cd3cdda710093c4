// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Adapter state: one engine plus the registry of live patterns.
//!
//! Exec and introspection live in `exec.rs` and `introspect.rs` as further
//! `impl Context` blocks.

use crate::config::Config;
use crate::engine::{Engine, FancyEngine};
use crate::error::Result;
use crate::flags::COMPILE_OPTIONS;
use crate::pattern::PatternObject;
use crate::registry::{Handle, HandleRegistry};

/// Arguments of a compile call.
#[derive(Debug, Clone, Copy, Default)]
pub struct CompileRequest<'a> {
    pub pattern: &'a [u8],
    /// `|`-delimited compile option names.
    pub options: &'a str,
    /// Empty for the engine's defaults, `ENV` for the process environment.
    pub locale: &'a str,
    /// Zero leaves the engine default in place.
    pub match_limit: u64,
    /// Zero leaves the engine default in place.
    pub recursion_limit: u64,
}

impl<'a> CompileRequest<'a> {
    pub fn new(pattern: &'a [u8]) -> Self {
        Self {
            pattern,
            ..Self::default()
        }
    }

    pub fn options(mut self, options: &'a str) -> Self {
        self.options = options;
        self
    }

    pub fn locale(mut self, locale: &'a str) -> Self {
        self.locale = locale;
        self
    }

    pub fn limits(mut self, match_limit: u64, recursion_limit: u64) -> Self {
        self.match_limit = match_limit;
        self.recursion_limit = recursion_limit;
        self
    }
}

/// An engine and the patterns compiled with it.
pub struct Context<E: Engine = FancyEngine> {
    pub(crate) engine: E,
    pub(crate) objects: HandleRegistry<PatternObject<E>>,
}

impl Context<FancyEngine> {
    pub fn from_config(config: &Config) -> Self {
        Self::with_engine(
            FancyEngine::new(config.limits.backtrack),
            config.limits.objects,
        )
    }
}

impl Default for Context<FancyEngine> {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

impl<E: Engine> Context<E> {
    pub fn with_engine(engine: E, object_limit: usize) -> Self {
        Self {
            engine,
            objects: HandleRegistry::with_limit(object_limit),
        }
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// Number of live compiled patterns.
    pub fn live_objects(&self) -> usize {
        self.objects.len()
    }

    /// Compile a pattern and register it.
    ///
    /// The registry is checked for room before any work is done; on any
    /// failure nothing is registered.
    pub fn compile(&mut self, request: &CompileRequest<'_>) -> Result<Handle> {
        self.objects.ensure_room()?;
        let options = COMPILE_OPTIONS.parse_list(request.options)?;
        let object = PatternObject::build(&self.engine, request, options)?;
        let handle = self.objects.register(Box::new(object))?;
        tracing::debug!(
            "compiled pattern {} as {} ({} live)",
            String::from_utf8_lossy(request.pattern),
            handle,
            self.objects.len()
        );
        Ok(handle)
    }

    /// Release a pattern and everything attached to it.
    pub fn free(&mut self, handle: Handle) -> Result<()> {
        drop(self.objects.release(handle)?);
        tracing::debug!("freed pattern {} ({} live)", handle, self.objects.len());
        Ok(())
    }

    /// The live pattern named by `handle`.
    pub fn object(&self, handle: Handle) -> Result<&PatternObject<E>> {
        self.objects.get(handle)
    }
}

#[cfg(test)]
#[path = "context_tests.rs"]
mod tests;
