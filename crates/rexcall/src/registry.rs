// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Bounded registry of live objects addressed by opaque handles.
//!
//! A handle is the address of the boxed object it names; no separate
//! numbering exists. Handles coming back from the host are never
//! dereferenced: they are compared against the addresses of the boxes the
//! registry owns, so a stale or forged handle can only fail the lookup.
//!
//! The registry is an unordered set. Removal swaps the last entry into the
//! freed slot, so the relative order of entries changes over time and no
//! enumeration is offered.

use crate::error::{Error, Result};

/// Default maximum number of live objects.
pub const DEFAULT_OBJECT_LIMIT: usize = 256;

/// Opaque reference to a registered object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Handle(u64);

impl Handle {
    /// Wrap a raw value received from the host. Any value is accepted;
    /// validity is decided by the registry.
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    pub const fn raw(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for Handle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:#x}", self.0)
    }
}

/// Bounded set of boxed objects.
#[derive(Debug)]
pub struct HandleRegistry<T> {
    live: Vec<Box<T>>,
    limit: usize,
}

impl<T> HandleRegistry<T> {
    pub fn new() -> Self {
        Self::with_limit(DEFAULT_OBJECT_LIMIT)
    }

    pub fn with_limit(limit: usize) -> Self {
        // Distinct boxes of a zero-sized type share one address.
        const { assert!(size_of::<T>() > 0, "registry objects must not be zero-sized") };
        Self {
            live: Vec::new(),
            limit,
        }
    }

    /// Maximum number of live objects.
    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Number of live objects.
    pub fn len(&self) -> usize {
        self.live.len()
    }

    pub fn is_empty(&self) -> bool {
        self.live.is_empty()
    }

    /// Fail with [`Error::ObjectLimit`] if no further object can be registered.
    pub fn ensure_room(&self) -> Result<()> {
        if self.live.len() >= self.limit {
            return Err(Error::ObjectLimit { limit: self.limit });
        }
        Ok(())
    }

    /// Take ownership of `obj` and return its handle.
    pub fn register(&mut self, obj: Box<T>) -> Result<Handle> {
        self.ensure_room()?;
        let handle = identity(&*obj);
        self.live.push(obj);
        Ok(handle)
    }

    /// Whether `handle` names a live object.
    pub fn validate(&self, handle: Handle) -> bool {
        self.position(handle).is_some()
    }

    pub fn get(&self, handle: Handle) -> Result<&T> {
        let index = self.position(handle).ok_or(Error::InvalidReference)?;
        Ok(&self.live[index])
    }

    pub fn get_mut(&mut self, handle: Handle) -> Result<&mut T> {
        let index = self.position(handle).ok_or(Error::InvalidReference)?;
        Ok(&mut self.live[index])
    }

    /// Remove the object named by `handle` and hand it back to the caller.
    pub fn release(&mut self, handle: Handle) -> Result<Box<T>> {
        let index = self.position(handle).ok_or(Error::InvalidReference)?;
        Ok(self.live.swap_remove(index))
    }

    fn position(&self, handle: Handle) -> Option<usize> {
        if handle.0 == 0 {
            return None;
        }
        self.live.iter().position(|obj| identity(&**obj) == handle)
    }
}

impl<T> Default for HandleRegistry<T> {
    fn default() -> Self {
        Self::new()
    }
}

fn identity<T>(obj: &T) -> Handle {
    Handle(std::ptr::from_ref(obj).addr() as u64)
}

#[cfg(test)]
#[path = "registry_tests.rs"]
mod tests;
