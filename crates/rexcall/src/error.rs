// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Error kinds and their host status codes.
//!
//! Status codes are split into two reserved blocks:
//! - `-16384..=-16393`: failures detected by this layer
//! - `-16400 + code`: raw negative engine codes passed through unchanged

/// First code of the block reserved for this layer's own failures.
pub const LAYER_BASE: i32 = -16384;

/// Offset added to raw engine codes so they never collide with [`LAYER_BASE`] codes.
pub const ENGINE_BASE: i32 = -16400;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Every way an operation can fail.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// The caller passed a different number of arguments than the operation takes.
    #[error("argument count mismatch: expected {expected}, got {actual}")]
    ArgumentCount { expected: i32, actual: i32 },

    /// An option or selector name is not in the table it was looked up in.
    #[error("unknown option name: {0}")]
    UnknownOption(String),

    /// The handle registry is full.
    #[error("maximum number of objects exceeded ({limit})")]
    ObjectLimit { limit: usize },

    /// The handle does not denote a live object.
    #[error("invalid object reference")]
    InvalidReference,

    /// A buffer sized by this layer (or a caller buffer on output) was too small.
    #[error("internal buffer too small")]
    InternalBuffer,

    /// An allocation failed.
    #[error("could not allocate memory")]
    OutOfMemory,

    /// The engine's optimisation pass reported an error.
    #[error("pattern study failed: {0}")]
    Study(String),

    /// The requested locale could not be installed.
    #[error("invalid locale name: {0}")]
    Locale(String),

    /// The engine rejected the pattern.
    #[error("pattern compilation failed at offset {offset}: {message}")]
    Compile { message: String, offset: i32 },

    /// The subject length exceeds the subject actually supplied.
    #[error("invalid length value specified")]
    Length,

    /// An unclassified negative engine code.
    #[error("engine error {0}")]
    Engine(i32),
}

impl Error {
    /// Host status code for this error.
    pub fn code(&self) -> i32 {
        match self {
            Error::ArgumentCount { .. } => LAYER_BASE,
            Error::UnknownOption(_) => LAYER_BASE - 1,
            Error::ObjectLimit { .. } => LAYER_BASE - 2,
            Error::InvalidReference => LAYER_BASE - 3,
            Error::InternalBuffer => LAYER_BASE - 4,
            Error::OutOfMemory => LAYER_BASE - 5,
            Error::Study(_) => LAYER_BASE - 6,
            Error::Locale(_) => LAYER_BASE - 7,
            Error::Compile { .. } => LAYER_BASE - 8,
            Error::Length => LAYER_BASE - 9,
            Error::Engine(raw) => ENGINE_BASE + raw,
        }
    }

    /// Diagnostic text the host can display alongside the status.
    ///
    /// Only compile and study failures carry engine text; everything else
    /// is identified by its code alone.
    pub fn diagnostic(&self) -> Option<&str> {
        match self {
            Error::Compile { message, .. } | Error::Study(message) => Some(message),
            _ => None,
        }
    }
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
