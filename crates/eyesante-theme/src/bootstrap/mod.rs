//! The synchronous bootstrap step that runs before the UI mounts.
//!
//! Its job is to paint the right theme before first render, so the user
//! never sees a flash of the wrong one, and to leave a record of what it
//! painted for the resolver to trust on its first read:
//!
//! 1. read the persisted mode (absent or invalid means the configured default)
//! 2. resolve it, consulting the OS signal only for `system`
//! 3. apply the result as class token and attribute on the document root
//! 4. set the marker flag
//!
//! On a storage failure `light` is applied instead; the marker is set either
//! way. The step never writes to storage.
//!
//! In a browser this runs as an inline script in the page head, rendered by
//! [`render_bootstrap_script`]. [`run_bootstrap`] is the same sequence for
//! native hosts and tests.

mod script;

pub use script::{render_bootstrap_script, render_bootstrap_tag};

use crate::config::ThemeConfig;
use crate::document::{apply_theme, DocumentRoot};
use crate::error::StorageError;
use crate::scheme::ColorSchemeSignal;
use crate::storage::PreferenceStore;
use crate::theme::{ResolvedTheme, ThemeMode};

/// Runs the bootstrap sequence, returning the theme it applied.
///
/// # Example
///
/// ```rust
/// use eyesante_theme::{
///     run_bootstrap, DocumentRoot, ManualSignal, MemoryDocument, MemoryStore, ResolvedTheme,
///     ThemeConfig,
/// };
///
/// let config = ThemeConfig::default();
/// let store = MemoryStore::new().with("theme", "system");
/// let doc = MemoryDocument::new();
///
/// let applied = run_bootstrap(&store, &ManualSignal::new(Some(true)), &doc, &config);
/// assert_eq!(applied, ResolvedTheme::Dark);
/// assert_eq!(doc.attribute("data-theme").as_deref(), Some("dark"));
/// assert!(doc.marker("__THEME_APPLIED__"));
/// ```
pub fn run_bootstrap(
    store: &dyn PreferenceStore,
    signal: &dyn ColorSchemeSignal,
    doc: &dyn DocumentRoot,
    config: &ThemeConfig,
) -> ResolvedTheme {
    let resolved = match stored_mode(store, config) {
        Ok(mode) => mode.resolve(signal.prefers_dark()),
        Err(err) => {
            tracing::warn!(error = %err, "theme bootstrap failed, falling back to light");
            ResolvedTheme::Light
        }
    };
    apply_theme(doc, resolved, config);
    doc.set_marker(&config.marker);
    resolved
}

fn stored_mode(store: &dyn PreferenceStore, config: &ThemeConfig) -> Result<ThemeMode, StorageError> {
    let raw = store.get(&config.storage_key)?;
    Ok(raw
        .and_then(|value| value.parse().ok())
        .unwrap_or(config.default_mode))
}
