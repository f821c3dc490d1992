//! In-memory preference store.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use super::PreferenceStore;
use crate::error::StorageError;

#[derive(Debug, Default)]
struct Inner {
    values: HashMap<String, String>,
    unavailable: bool,
    writes: usize,
}

/// A store kept in process memory.
///
/// Cloning yields another handle to the same map, so a host (or a test) can
/// keep one handle and give the other to a [`ThemeContext`](crate::ThemeContext).
///
/// # Example
///
/// ```rust
/// use eyesante_theme::{MemoryStore, PreferenceStore};
///
/// let store = MemoryStore::new().with("theme", "dark");
/// let handle = store.clone();
/// store.set("theme", "light").unwrap();
/// assert_eq!(handle.get("theme").unwrap().as_deref(), Some("light"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    inner: Rc<RefCell<Inner>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds a value, returning the store for chaining.
    pub fn with(self, key: &str, value: &str) -> Self {
        self.inner
            .borrow_mut()
            .values
            .insert(key.to_string(), value.to_string());
        self
    }

    /// A store whose every operation fails with [`StorageError::Unavailable`].
    pub fn unavailable() -> Self {
        let store = Self::new();
        store.set_available(false);
        store
    }

    /// Toggles simulated availability. Stored values survive.
    pub fn set_available(&self, available: bool) {
        self.inner.borrow_mut().unavailable = !available;
    }

    /// Reads a value without going through the availability check.
    pub fn peek(&self, key: &str) -> Option<String> {
        self.inner.borrow().values.get(key).cloned()
    }

    /// Number of successful writes so far.
    pub fn write_count(&self) -> usize {
        self.inner.borrow().writes
    }
}

impl PreferenceStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let inner = self.inner.borrow();
        if inner.unavailable {
            return Err(StorageError::Unavailable);
        }
        Ok(inner.values.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut inner = self.inner.borrow_mut();
        if inner.unavailable {
            return Err(StorageError::Unavailable);
        }
        inner.values.insert(key.to_string(), value.to_string());
        inner.writes += 1;
        Ok(())
    }
}
