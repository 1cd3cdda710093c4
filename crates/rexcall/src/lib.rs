// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Fixed-signature external-call adapter for a backtracking regular
//! expression engine.
//!
//! Hosts that can only pass integers and fixed-capacity byte buffers drive
//! the engine through opaque pattern handles: compile a pattern, match it,
//! read the match vector, and introspect the pattern or the engine. The
//! [`host`] module holds the integer/buffer calling convention and [`ffi`]
//! exports it over the C ABI.

pub mod buffer;
pub mod cli;
pub mod config;
pub mod context;
pub mod engine;
pub mod error;
pub mod ffi;
pub mod flags;
pub mod host;
pub mod introspect;
pub mod locale;
pub mod logging;
pub mod pattern;
pub mod registry;

mod exec;

#[cfg(test)]
mod test_utils;

pub use config::Config;
pub use context::{CompileRequest, Context};
pub use error::{Error, Result};
pub use introspect::Reply;
pub use registry::Handle;
