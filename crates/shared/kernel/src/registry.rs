//! Pending-selection registry for picker-style screens.
//!
//! A screen that needs a value chosen elsewhere (a patient, a practice, a contract) registers a
//! callback and hands the returned [`SelectionKey`] to the picker. The picker resolves the key
//! with the chosen value, which removes the entry and runs the callback exactly once.
//!
//! The registry is a plain owned value passed by reference to whoever needs it; there is no
//! process-wide instance.

use crate::safe_nanoid;
use fxhash::FxHashMap;
use std::borrow::Cow;
use std::fmt;
use tracing::debug;

#[chairside_derive::chairside_error]
pub enum RegistryError {
    #[error("Unknown selection key{}: {key}", format_context(.context))]
    UnknownKey { key: SelectionKey, context: Option<Cow<'static, str>> },
}

/// Opaque token identifying one pending selection.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SelectionKey(String);

impl SelectionKey {
    fn generate() -> Self {
        Self(safe_nanoid!())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SelectionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

type Callback<T> = Box<dyn FnOnce(T) + Send>;

/// Owned map of pending selection callbacks receiving a `T`.
pub struct SelectionRegistry<T> {
    pending: FxHashMap<SelectionKey, Callback<T>>,
}

impl<T> SelectionRegistry<T> {
    #[must_use]
    pub fn new() -> Self {
        Self { pending: FxHashMap::default() }
    }

    /// Stores `callback` and returns the key that resolves it.
    pub fn register(&mut self, callback: impl FnOnce(T) + Send + 'static) -> SelectionKey {
        let mut key = SelectionKey::generate();
        while self.pending.contains_key(&key) {
            key = SelectionKey::generate();
        }
        self.pending.insert(key.clone(), Box::new(callback));
        debug!(%key, pending = self.pending.len(), "selection registered");
        key
    }

    /// Removes the entry for `key` and runs its callback with `value`.
    ///
    /// # Errors
    /// Returns [`RegistryError::UnknownKey`] if the key was never registered, was already
    /// resolved, or was cancelled. `value` is dropped in that case.
    pub fn resolve(&mut self, key: &SelectionKey, value: T) -> Result<(), RegistryError> {
        let callback = self
            .pending
            .remove(key)
            .ok_or_else(|| RegistryError::UnknownKey { key: key.clone(), context: None })?;
        debug!(%key, pending = self.pending.len(), "selection resolved");
        callback(value);
        Ok(())
    }

    /// Drops the entry for `key` without running it. Returns whether an entry existed.
    pub fn cancel(&mut self, key: &SelectionKey) -> bool {
        let removed = self.pending.remove(key).is_some();
        if removed {
            debug!(%key, pending = self.pending.len(), "selection cancelled");
        }
        removed
    }

    #[must_use]
    pub fn contains(&self, key: &SelectionKey) -> bool {
        self.pending.contains_key(key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Drops every pending callback without running any of them.
    pub fn clear(&mut self) {
        self.pending.clear();
    }
}

impl<T> Default for SelectionRegistry<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for SelectionRegistry<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SelectionRegistry").field("pending", &self.pending.len()).finish()
    }
}
