//! Shared namespace of plugin constructors.
//!
//! Three independent name-to-constructor mappings (formatters, hooks,
//! writers), populated by registration calls before configuration loading
//! and consulted by [`Config::validate`](crate::config::Config::validate).
//! Each mapping serializes access behind its own lock, so registration and
//! lookup may race safely even though callers are expected to finish
//! registering before they load.

use crate::plugin::{NewFormatterFn, NewHookFn, NewWriterFn};
use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};
use tracing::debug;

/// Outcome of a constructor lookup.
///
/// A name can be absent, registered with no constructor bound, or bound to
/// a usable constructor. The validator treats the first two as distinct
/// failures.
pub enum Binding<T> {
    /// Name was never registered.
    Missing,
    /// Name is registered but carries no constructor.
    Damaged,
    /// Usable constructor.
    Bound(T),
}

impl<T> Binding<T> {
    /// The constructor, if one is bound.
    pub fn into_constructor(self) -> Option<T> {
        match self {
            Binding::Bound(ctor) => Some(ctor),
            Binding::Missing | Binding::Damaged => None,
        }
    }
}

/// Plugin constructor registry, injected into validation rather than
/// reached through a global.
#[derive(Default)]
pub struct Registry {
    formatters: RwLock<HashMap<String, Option<NewFormatterFn>>>,
    hooks: RwLock<HashMap<String, Option<NewHookFn>>>,
    writers: RwLock<HashMap<String, Option<NewWriterFn>>>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a formatter constructor. Last write wins. Passing `None`
    /// binds the name without a constructor, which validation reports as
    /// damaged.
    pub fn register_formatter(&self, name: impl Into<String>, ctor: Option<NewFormatterFn>) {
        let name = name.into();
        debug!(kind = "formatter", name = %name, "plugin registered");
        lock_write(&self.formatters).insert(name, ctor);
    }

    /// Register a hook constructor. Same semantics as `register_formatter`.
    pub fn register_hook(&self, name: impl Into<String>, ctor: Option<NewHookFn>) {
        let name = name.into();
        debug!(kind = "hook", name = %name, "plugin registered");
        lock_write(&self.hooks).insert(name, ctor);
    }

    /// Register a writer constructor. Same semantics as `register_formatter`.
    pub fn register_writer(&self, name: impl Into<String>, ctor: Option<NewWriterFn>) {
        let name = name.into();
        debug!(kind = "writer", name = %name, "plugin registered");
        lock_write(&self.writers).insert(name, ctor);
    }

    /// Look up a formatter constructor by name.
    pub fn formatter(&self, name: &str) -> Binding<NewFormatterFn> {
        lookup(&self.formatters, name)
    }

    /// Look up a hook constructor by name.
    pub fn hook(&self, name: &str) -> Binding<NewHookFn> {
        lookup(&self.hooks, name)
    }

    /// Look up a writer constructor by name.
    pub fn writer(&self, name: &str) -> Binding<NewWriterFn> {
        lookup(&self.writers, name)
    }
}

fn lock_write<T>(map: &RwLock<T>) -> std::sync::RwLockWriteGuard<'_, T> {
    map.write().unwrap_or_else(PoisonError::into_inner)
}

fn lookup<T: Clone>(map: &RwLock<HashMap<String, Option<T>>>, name: &str) -> Binding<T> {
    let map = map.read().unwrap_or_else(PoisonError::into_inner);
    match map.get(name) {
        None => Binding::Missing,
        Some(None) => Binding::Damaged,
        Some(Some(ctor)) => Binding::Bound(ctor.clone()),
    }
}

#[cfg(test)]
mod tests;
