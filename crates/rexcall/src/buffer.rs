// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Bounded copies into caller-supplied, fixed-capacity buffers.
//!
//! The host cannot receive allocated strings, so every textual result is
//! copied into a buffer the host owns. All copies go through
//! [`copy_bounded`] so truncation is detected and reported the same way
//! everywhere. Buffers are NUL-terminated, which also makes them usable as
//! C strings.

/// The source did not fit; `written` bytes (plus terminator) were stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("buffer too small: wrote {written} of {needed} bytes")]
pub struct Truncated {
    pub written: usize,
    pub needed: usize,
}

/// Copy `src` into `dest` and NUL-terminate it.
///
/// Returns the number of bytes copied (excluding the terminator). When
/// `src` plus the terminator does not fit, copies as much as fits, still
/// terminates, and returns [`Truncated`]. Never touches bytes beyond
/// `dest.len()`; a zero-capacity `dest` is left untouched.
pub fn copy_bounded(dest: &mut [u8], src: &[u8]) -> Result<usize, Truncated> {
    let Some(room) = dest.len().checked_sub(1) else {
        return Err(Truncated {
            written: 0,
            needed: src.len(),
        });
    };
    let written = src.len().min(room);
    dest[..written].copy_from_slice(&src[..written]);
    dest[written] = 0;
    if written < src.len() {
        return Err(Truncated {
            written,
            needed: src.len(),
        });
    }
    Ok(written)
}

/// Reset `dest` to the empty string.
pub fn clear(dest: &mut [u8]) {
    if let Some(first) = dest.first_mut() {
        *first = 0;
    }
}

/// Bytes of `buf` before the first NUL (all of it if there is none).
pub fn until_nul(buf: &[u8]) -> &[u8] {
    let end = buf.iter().position(|&b| b == 0).unwrap_or(buf.len());
    &buf[..end]
}

#[cfg(test)]
#[path = "buffer_tests.rs"]
mod tests;
