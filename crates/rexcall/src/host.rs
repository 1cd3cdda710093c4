// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Fixed-signature operations for hosts that exchange only integers and
//! fixed-capacity buffers.
//!
//! Each function mirrors one host entry point: the caller's argument count
//! comes first, outputs are integer slots and caller-owned buffers, and the
//! return value is a single status. Once the argument count is accepted,
//! every output is reset before any work is done, so a failure never
//! leaves a stale value behind.
//!
//! Side-channel text (the unknown option name, compile diagnostics) is
//! truncated silently. Truncating a primary result (introspection text, a
//! capture name) fails with [`Error::InternalBuffer`] after publishing the
//! part that fit.

use crate::buffer::{clear, copy_bounded};
use crate::context::{CompileRequest, Context};
use crate::engine::Engine;
use crate::error::{Error, Result};
use crate::introspect::Reply;
use crate::registry::Handle;

/// Capacity of the unknown-option buffer.
pub const INVALID_OPTION_CAPACITY: usize = 32;
/// Capacity of the compile diagnostic buffer.
pub const DIAGNOSTIC_CAPACITY: usize = 256;
/// Capacity of the pattern introspection text buffer.
pub const INFO_TEXT_CAPACITY: usize = 1024;
/// Capacity of the configuration text buffer.
pub const CONFIG_TEXT_CAPACITY: usize = 1024;
/// Capacity of the capture name buffer.
pub const NAME_CAPACITY: usize = 64;

/// Argument count of each host entry point.
pub mod arity {
    pub const VERSION: i32 = 0;
    pub const FREE: i32 = 1;
    pub const COMPILE: i32 = 9;
    pub const EXEC: i32 = 6;
    pub const OVECTOR: i32 = 3;
    pub const OVECSIZE: i32 = 2;
    pub const FULLINFO: i32 = 6;
    pub const NAMETABLE: i32 = 4;
    pub const CONFIG: i32 = 5;
}

/// Output slots of [`compile`].
#[derive(Debug)]
pub struct CompileOut<'a> {
    pub handle: &'a mut u64,
    pub invalid_option: &'a mut [u8],
    pub error: &'a mut [u8],
    pub error_offset: &'a mut i32,
}

/// Output slots of [`fullinfo`] and [`config`].
#[derive(Debug)]
pub struct InfoOut<'a> {
    pub invalid_option: &'a mut [u8],
    /// Set to 1 when the value was written to `text`.
    pub is_string: &'a mut i32,
    pub text: &'a mut [u8],
    /// Bytes written to `text`, excluding the terminator.
    pub text_len: &'a mut usize,
    pub number: &'a mut i64,
}

impl InfoOut<'_> {
    fn reset(&mut self) {
        clear(self.invalid_option);
        clear(self.text);
        *self.is_string = 0;
        *self.text_len = 0;
        *self.number = 0;
    }

    fn publish(&mut self, reply: Reply) -> Result<()> {
        match reply {
            Reply::Number(n) => *self.number = n,
            Reply::Text(bytes) => {
                *self.is_string = 1;
                match copy_bounded(self.text, &bytes) {
                    Ok(len) => *self.text_len = len,
                    Err(truncated) => {
                        *self.text_len = truncated.written;
                        return Err(Error::InternalBuffer);
                    }
                }
            }
        }
        Ok(())
    }
}

/// Adapter version; takes no arguments.
pub fn version<E: Engine>(ctx: &Context<E>, argc: i32) -> Result<&'static str> {
    check_argc(argc, arity::VERSION)?;
    Ok(ctx.version())
}

/// Release a compiled pattern.
pub fn free<E: Engine>(ctx: &mut Context<E>, argc: i32, handle: u64) -> i32 {
    status(check_argc(argc, arity::FREE).and_then(|()| ctx.free(Handle::from_raw(handle))))
}

/// Compile a pattern; its handle goes to `out.handle`.
#[allow(clippy::too_many_arguments)]
pub fn compile<E: Engine>(
    ctx: &mut Context<E>,
    argc: i32,
    pattern: &[u8],
    options: &[u8],
    locale: &[u8],
    match_limit: u64,
    recursion_limit: u64,
    out: CompileOut<'_>,
) -> i32 {
    if let Err(err) = check_argc(argc, arity::COMPILE) {
        return err.code();
    }
    *out.handle = 0;
    *out.error_offset = 0;
    clear(out.invalid_option);
    clear(out.error);

    let options = String::from_utf8_lossy(options);
    let locale = String::from_utf8_lossy(locale);
    let request = CompileRequest::new(pattern)
        .options(&options)
        .locale(&locale)
        .limits(match_limit, recursion_limit);
    match ctx.compile(&request) {
        Ok(handle) => {
            *out.handle = handle.raw();
            0
        }
        Err(err) => {
            report_unknown(&err, out.invalid_option);
            if let Some(message) = err.diagnostic() {
                let _ = copy_bounded(out.error, message.as_bytes());
            }
            if let Error::Compile { offset, .. } = err {
                *out.error_offset = offset;
            }
            err.code()
        }
    }
}

/// Match `subject[..length]` from `start_offset`.
///
/// Returns the match count (`0` for no match) or an error code.
#[allow(clippy::too_many_arguments)]
pub fn exec<E: Engine>(
    ctx: &mut Context<E>,
    argc: i32,
    handle: u64,
    subject: &[u8],
    length: i32,
    start_offset: i32,
    options: &[u8],
    invalid_option: &mut [u8],
) -> i32 {
    if let Err(err) = check_argc(argc, arity::EXEC) {
        return err.code();
    }
    clear(invalid_option);
    let options = String::from_utf8_lossy(options);
    match ctx.exec(Handle::from_raw(handle), subject, length, start_offset, &options) {
        Ok(count) => count,
        Err(err) => {
            report_unknown(&err, invalid_option);
            err.code()
        }
    }
}

/// Element `index` of the last match vector.
pub fn ovector<E: Engine>(
    ctx: &Context<E>,
    argc: i32,
    handle: u64,
    index: i32,
    value: &mut i32,
) -> i32 {
    if let Err(err) = check_argc(argc, arity::OVECTOR) {
        return err.code();
    }
    *value = 0;
    status(
        ctx.ovector(Handle::from_raw(handle), index)
            .map(|v| *value = v),
    )
}

/// Size of the last match vector.
pub fn ovecsize<E: Engine>(ctx: &Context<E>, argc: i32, handle: u64, size: &mut i32) -> i32 {
    if let Err(err) = check_argc(argc, arity::OVECSIZE) {
        return err.code();
    }
    *size = 0;
    status(ctx.ovecsize(Handle::from_raw(handle)).map(|n| *size = n))
}

/// Report one property of a compiled pattern.
pub fn fullinfo<E: Engine>(
    ctx: &Context<E>,
    argc: i32,
    handle: u64,
    selector: &[u8],
    mut out: InfoOut<'_>,
) -> i32 {
    if let Err(err) = check_argc(argc, arity::FULLINFO) {
        return err.code();
    }
    out.reset();
    let selector = String::from_utf8_lossy(selector);
    let result = ctx
        .fullinfo(Handle::from_raw(handle), &selector)
        .and_then(|reply| out.publish(reply));
    if let Err(err) = &result {
        report_unknown(err, out.invalid_option);
    }
    status(result)
}

/// Group number and name of named capture `index` (1-based).
pub fn nametable<E: Engine>(
    ctx: &Context<E>,
    argc: i32,
    handle: u64,
    index: i32,
    group: &mut i32,
    name: &mut [u8],
) -> i32 {
    if let Err(err) = check_argc(argc, arity::NAMETABLE) {
        return err.code();
    }
    *group = 0;
    clear(name);
    status(
        ctx.name_entry(Handle::from_raw(handle), index)
            .and_then(|(number, label)| {
                *group = number;
                copy_bounded(name, label)
                    .map(drop)
                    .map_err(|_| Error::InternalBuffer)
            }),
    )
}

/// Report one engine build-configuration value.
pub fn config<E: Engine>(ctx: &Context<E>, argc: i32, selector: &[u8], mut out: InfoOut<'_>) -> i32 {
    if let Err(err) = check_argc(argc, arity::CONFIG) {
        return err.code();
    }
    out.reset();
    let selector = String::from_utf8_lossy(selector);
    let result = ctx.config(&selector).and_then(|reply| out.publish(reply));
    if let Err(err) = &result {
        report_unknown(err, out.invalid_option);
    }
    status(result)
}

fn check_argc(actual: i32, expected: i32) -> Result<()> {
    if actual != expected {
        return Err(Error::ArgumentCount { expected, actual });
    }
    Ok(())
}

fn status(result: Result<()>) -> i32 {
    match result {
        Ok(()) => 0,
        Err(err) => err.code(),
    }
}

fn report_unknown(err: &Error, invalid_option: &mut [u8]) {
    if let Error::UnknownOption(token) = err {
        let _ = copy_bounded(invalid_option, token.as_bytes());
    }
}

#[cfg(test)]
#[path = "host_tests.rs"]
mod tests;
