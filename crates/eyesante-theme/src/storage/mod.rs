//! Persisted key-value storage for the raw theme mode.
//!
//! The resolver only needs two operations, so any backend that can read and
//! write a small string under a key will do:
//!
//! - [`MemoryStore`]: in-process, shareable, can simulate disabled storage
//! - [`FileStore`]: a JSON object on disk
//!
//! Only the raw [`ThemeMode`](crate::ThemeMode) is ever written, never the
//! resolved theme.

mod file;
mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use crate::error::StorageError;

/// A string key-value store.
///
/// Methods take `&self` so a store can be shared between the bootstrap step,
/// the resolver and whatever hosts them. Implementations that hold state use
/// interior mutability.
pub trait PreferenceStore {
    /// Reads the value stored under `key`, or `None` if it has never been set.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Stores `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
}

impl<S: PreferenceStore + ?Sized> PreferenceStore for Box<S> {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set(key, value)
    }
}
