//! Error types.

use std::path::PathBuf;

use thiserror::Error;

/// Errors surfaced by the theme API.
///
/// Resolver operations never return storage failures to the caller; they
/// degrade to in-memory state instead. Storage errors only reach callers
/// that talk to a [`PreferenceStore`](crate::PreferenceStore) directly.
#[derive(Debug, Error)]
pub enum ThemeError {
    /// A mode string outside `light`, `dark` and `system`.
    #[error("invalid theme mode '{value}': expected one of light, dark, system")]
    InvalidMode { value: String },

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error("invalid theme configuration: {0}")]
    Config(String),

    #[error("failed to render bootstrap script: {0}")]
    Template(#[from] minijinja::Error),
}

/// Failure of the persisted key-value store.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Storage is disabled or otherwise not reachable.
    #[error("preference storage is unavailable")]
    Unavailable,

    #[error("failed to access preference store at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("preference store at {} is corrupt: {message}", path.display())]
    Corrupt { path: PathBuf, message: String },
}
