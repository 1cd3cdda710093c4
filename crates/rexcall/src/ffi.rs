// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! C ABI entry points.
//!
// Allow unsafe_code for the exported extern "C" functions.
// Safety justification:
// 1. Every pointer is checked for null before it is turned into a reference
// 2. Output buffers are sliced to the documented capacity and never beyond it
// 3. References built from host pointers do not outlive the call
#![allow(unsafe_code)]
//!
//! Every function takes the host's argument count first. A null pointer
//! where the operation needs one is reported like a wrong argument count.
//! Buffers the host supplies must hold at least the capacities listed in
//! [`crate::host`]. All calls share one process-wide [`Context`], locked
//! for the duration of the call.

use std::ffi::{CStr, CString, c_char, c_int, c_long, c_ulong};
use std::sync::{LazyLock, Mutex, MutexGuard, PoisonError};

use crate::config::Config;
use crate::context::Context;
use crate::error::Error;
use crate::host::{
    self, CONFIG_TEXT_CAPACITY, CompileOut, DIAGNOSTIC_CAPACITY, INFO_TEXT_CAPACITY,
    INVALID_OPTION_CAPACITY, InfoOut, NAME_CAPACITY, arity,
};
use crate::logging;

/// A counted string as the host lays it out.
#[repr(C)]
#[derive(Debug)]
pub struct HostString {
    pub length: c_long,
    pub address: *mut c_char,
}

static CONTEXT: LazyLock<Mutex<Context>> = LazyLock::new(|| {
    let (config, problem) = match Config::from_env() {
        Ok(config) => (config, None),
        Err(err) => (Config::default(), Some(err)),
    };
    logging::init(&config.log);
    if let Some(err) = problem {
        tracing::warn!("using default configuration: {}", err);
    }
    Mutex::new(Context::from_config(&config))
});

static VERSION: LazyLock<CString> =
    LazyLock::new(|| CString::new(context().version()).unwrap_or_default());

fn context() -> MutexGuard<'static, Context> {
    CONTEXT.lock().unwrap_or_else(PoisonError::into_inner)
}

fn rejected(expected: i32, argc: c_int) -> c_int {
    Error::ArgumentCount {
        expected,
        actual: argc,
    }
    .code()
}

/// # Safety
/// `ptr` is null or a NUL-terminated string valid for the call.
unsafe fn text<'a>(ptr: *const c_char) -> Option<&'a [u8]> {
    if ptr.is_null() {
        return None;
    }
    // SAFETY: non-null and NUL-terminated per the caller's contract.
    Some(unsafe { CStr::from_ptr(ptr) }.to_bytes())
}

/// # Safety
/// `ptr` is null or valid for writes of `capacity` bytes for the call.
unsafe fn buffer<'a>(ptr: *mut c_char, capacity: usize) -> Option<&'a mut [u8]> {
    if ptr.is_null() {
        return None;
    }
    // SAFETY: non-null and writable for `capacity` bytes per the caller's contract.
    Some(unsafe { std::slice::from_raw_parts_mut(ptr.cast::<u8>(), capacity) })
}

/// Adapter and engine version as a static C string.
///
/// Takes no arguments; any other count yields the empty string.
#[unsafe(no_mangle)]
pub extern "C" fn rexcall_version(argc: c_int) -> *const c_char {
    let accepted = host::version(&context(), argc).is_ok();
    if !accepted {
        return c"".as_ptr();
    }
    VERSION.as_ptr()
}

/// Release a compiled pattern.
#[unsafe(no_mangle)]
pub extern "C" fn rexcall_free(argc: c_int, handle: c_ulong) -> c_int {
    host::free(&mut context(), argc, u64::from(handle))
}

/// Compile `pattern`; its handle is stored in `*handle`.
///
/// # Safety
/// String arguments are NUL-terminated. `invalid_option` holds 32 bytes and
/// `error` 256 bytes. Integer pointers are valid for writes.
#[unsafe(no_mangle)]
#[allow(clippy::too_many_arguments)]
pub unsafe extern "C" fn rexcall_compile(
    argc: c_int,
    pattern: *const c_char,
    options: *const c_char,
    invalid_option: *mut c_char,
    handle: *mut c_ulong,
    error: *mut c_char,
    error_offset: *mut c_int,
    locale: *const c_char,
    match_limit: c_ulong,
    recursion_limit: c_ulong,
) -> c_int {
    // SAFETY: forwarded caller contract.
    let args = unsafe {
        (
            text(pattern),
            text(options),
            text(locale),
            buffer(invalid_option, INVALID_OPTION_CAPACITY),
            buffer(error, DIAGNOSTIC_CAPACITY),
            handle.as_mut(),
            error_offset.as_mut(),
        )
    };
    let (
        Some(pattern),
        Some(options),
        Some(locale),
        Some(invalid_option),
        Some(error),
        Some(handle),
        Some(error_offset),
    ) = args
    else {
        return rejected(arity::COMPILE, argc);
    };

    let mut raw = *handle as u64;
    let rc = host::compile(
        &mut context(),
        argc,
        pattern,
        options,
        locale,
        u64::from(match_limit),
        u64::from(recursion_limit),
        CompileOut {
            handle: &mut raw,
            invalid_option,
            error,
            error_offset,
        },
    );
    *handle = raw as c_ulong;
    rc
}

/// Match `subject` (first `length` bytes) from `start_offset`.
///
/// # Safety
/// `subject` points to a host string whose address is valid for reads of
/// `length` bytes. `options` is NUL-terminated; `invalid_option` holds 32
/// bytes.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn rexcall_exec(
    argc: c_int,
    handle: c_ulong,
    subject: *const HostString,
    length: c_int,
    start_offset: c_int,
    options: *const c_char,
    invalid_option: *mut c_char,
) -> c_int {
    // SAFETY: forwarded caller contract.
    let (subject, options, invalid_option) = unsafe {
        (
            subject.as_ref().and_then(|s| host_bytes(s)),
            text(options),
            buffer(invalid_option, INVALID_OPTION_CAPACITY),
        )
    };
    let (Some(subject), Some(options), Some(invalid_option)) = (subject, options, invalid_option)
    else {
        return rejected(arity::EXEC, argc);
    };
    host::exec(
        &mut context(),
        argc,
        u64::from(handle),
        subject,
        length,
        start_offset,
        options,
        invalid_option,
    )
}

/// # Safety
/// `s.address` is valid for reads of `s.length` bytes, or null with length 0.
unsafe fn host_bytes<'a>(s: &HostString) -> Option<&'a [u8]> {
    let length = usize::try_from(s.length).ok()?;
    if s.address.is_null() {
        return (length == 0).then_some(&[][..]);
    }
    // SAFETY: readable for `length` bytes per the caller's contract.
    Some(unsafe { std::slice::from_raw_parts(s.address.cast::<u8>(), length) })
}

/// Element `index` of the last match vector.
///
/// # Safety
/// `value` is valid for writes.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn rexcall_ovector(
    argc: c_int,
    handle: c_ulong,
    index: c_int,
    value: *mut c_int,
) -> c_int {
    // SAFETY: forwarded caller contract.
    let Some(value) = (unsafe { value.as_mut() }) else {
        return rejected(arity::OVECTOR, argc);
    };
    host::ovector(&context(), argc, u64::from(handle), index, value)
}

/// Size of the last match vector.
///
/// # Safety
/// `size` is valid for writes.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn rexcall_ovecsize(argc: c_int, handle: c_ulong, size: *mut c_int) -> c_int {
    // SAFETY: forwarded caller contract.
    let Some(size) = (unsafe { size.as_mut() }) else {
        return rejected(arity::OVECSIZE, argc);
    };
    host::ovecsize(&context(), argc, u64::from(handle), size)
}

/// Report one property of a compiled pattern.
///
/// Text values go to `s`, whose address holds 1024 bytes; its length is
/// updated to the bytes written.
///
/// # Safety
/// `selector` is NUL-terminated, `invalid_option` holds 32 bytes, and the
/// remaining pointers are valid for writes.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn rexcall_fullinfo(
    argc: c_int,
    handle: c_ulong,
    selector: *const c_char,
    invalid_option: *mut c_char,
    is_string: *mut c_int,
    s: *mut HostString,
    number: *mut c_long,
) -> c_int {
    // SAFETY: forwarded caller contract.
    let args = unsafe {
        (
            text(selector),
            buffer(invalid_option, INVALID_OPTION_CAPACITY),
            is_string.as_mut(),
            s.as_mut(),
            number.as_mut(),
        )
    };
    let (Some(selector), Some(invalid_option), Some(is_string), Some(s), Some(number)) = args
    else {
        return rejected(arity::FULLINFO, argc);
    };
    // SAFETY: the host string's address holds the documented capacity.
    let Some(text) = (unsafe { buffer(s.address, INFO_TEXT_CAPACITY) }) else {
        return rejected(arity::FULLINFO, argc);
    };

    let mut text_len = usize::try_from(s.length).unwrap_or(0);
    let mut wide = i64::from(*number);
    let rc = host::fullinfo(
        &context(),
        argc,
        u64::from(handle),
        selector,
        InfoOut {
            invalid_option,
            is_string,
            text,
            text_len: &mut text_len,
            number: &mut wide,
        },
    );
    s.length = text_len as c_long;
    *number = wide as c_long;
    rc
}

/// Group number and name of named capture `index` (1-based).
///
/// # Safety
/// `group` is valid for writes; `name` holds 64 bytes.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn rexcall_nametable(
    argc: c_int,
    handle: c_ulong,
    index: c_int,
    group: *mut c_int,
    name: *mut c_char,
) -> c_int {
    // SAFETY: forwarded caller contract.
    let (Some(group), Some(name)) = (unsafe { (group.as_mut(), buffer(name, NAME_CAPACITY)) })
    else {
        return rejected(arity::NAMETABLE, argc);
    };
    host::nametable(&context(), argc, u64::from(handle), index, group, name)
}

/// Report one engine build-configuration value.
///
/// # Safety
/// `selector` is NUL-terminated, `invalid_option` holds 32 bytes, `s`
/// holds 1024 bytes, and the integer pointers are valid for writes.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn rexcall_config(
    argc: c_int,
    selector: *const c_char,
    invalid_option: *mut c_char,
    is_string: *mut c_int,
    s: *mut c_char,
    number: *mut c_long,
) -> c_int {
    // SAFETY: forwarded caller contract.
    let args = unsafe {
        (
            text(selector),
            buffer(invalid_option, INVALID_OPTION_CAPACITY),
            is_string.as_mut(),
            buffer(s, CONFIG_TEXT_CAPACITY),
            number.as_mut(),
        )
    };
    let (Some(selector), Some(invalid_option), Some(is_string), Some(text), Some(number)) = args
    else {
        return rejected(arity::CONFIG, argc);
    };

    let mut text_len = 0;
    let mut wide = i64::from(*number);
    let rc = host::config(
        &context(),
        argc,
        selector,
        InfoOut {
            invalid_option,
            is_string,
            text,
            text_len: &mut text_len,
            number: &mut wide,
        },
    );
    *number = wide as c_long;
    rc
}

#[cfg(test)]
#[path = "ffi_tests.rs"]
mod tests;
