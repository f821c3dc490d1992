//! # Eyesante Theme - light, dark and system theming without the flash
//!
//! This crate resolves the dashboard's theme preference. The user picks
//! `light`, `dark` or `system`; `system` follows the operating environment's
//! colour-scheme preference. The resolved theme is applied to the document
//! root as a class token and a data attribute, and the raw choice is
//! persisted under a single key.
//!
//! ## Avoiding the flash of the wrong theme
//!
//! A page may be rendered once without access to storage or the OS signal
//! and then again on the client. To keep both renders in agreement, theming
//! happens in two steps:
//!
//! 1. The bootstrap step ([`run_bootstrap`], or the inline script from
//!    [`render_bootstrap_script`]) paints the document before the UI mounts
//!    and sets a marker flag.
//! 2. The [`ThemeContext`] trusts what was painted on its first read, and
//!    only computes from storage and the OS signal once [mounted](ThemeContext::mount).
//!
//! ## Collaborators
//!
//! The context talks to its environment through three traits, so it runs the
//! same in a browser binding, a native shell or a test:
//!
//! - [`PreferenceStore`]: persisted key-value storage ([`MemoryStore`], [`FileStore`])
//! - [`ColorSchemeSignal`]: the OS preference ([`SystemSignal`], [`ManualSignal`])
//! - [`DocumentRoot`]: the element the theme is applied to ([`MemoryDocument`])
//!
//! Storage failures never surface: the context logs a warning and keeps the
//! preference in memory for the rest of the session.
//!
//! ## Quick start
//!
//! ```rust
//! use std::rc::Rc;
//! use eyesante_theme::{
//!     run_bootstrap, ManualSignal, MemoryDocument, MemoryStore, ResolvedTheme, ThemeConfig,
//!     ThemeContext,
//! };
//!
//! let config = ThemeConfig::default();
//! let store = MemoryStore::new().with("theme", "dark");
//! let signal = ManualSignal::new(Some(false));
//! let doc = MemoryDocument::new();
//!
//! run_bootstrap(&store, &signal, &doc, &config);
//!
//! let theme = ThemeContext::new(config, store, Rc::new(signal), doc);
//! let first = theme.initialize();
//! assert_eq!(first.resolved, ResolvedTheme::Dark);
//!
//! let mounted = theme.mount();
//! theme.set_mode_str("system").unwrap();
//! assert_eq!(theme.snapshot().resolved, ResolvedTheme::Light);
//! assert!(theme.set_mode_str("blue").is_err());
//! mounted.unmount();
//! ```

pub mod bootstrap;
pub mod config;
mod context;
pub mod document;
mod error;
pub mod scheme;
pub mod storage;
mod theme;
pub mod toggle;

pub use bootstrap::{render_bootstrap_script, render_bootstrap_tag, run_bootstrap};
pub use config::ThemeConfig;
pub use context::{Mounted, Phase, ThemeContext};
pub use document::{apply_theme, read_applied_theme, DocumentRoot, MemoryDocument};
pub use error::{StorageError, ThemeError};
pub use scheme::{
    subscribe_scoped, ColorSchemeSignal, ManualSignal, SchemeListener, Subscription,
    SubscriptionId, SystemSignal,
};
pub use storage::{FileStore, MemoryStore, PreferenceStore};
pub use theme::{ResolvedTheme, ThemeMode, ThemePreference};
pub use toggle::{current_option, toggle_icon, toggle_target, Icon, ThemeOption, THEME_OPTIONS};
