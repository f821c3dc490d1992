//! The theme preference resolver.
//!
//! [`ThemeContext`] owns the user's [`ThemeMode`] and the [`ResolvedTheme`]
//! derived from it, keeps both consistent with storage and the OS signal,
//! and applies the resolved theme to the document root.
//!
//! # Phases
//!
//! ```text
//! Uninitialized ──(bootstrap step ran)──▶ Bootstrapped ──mount()──▶ Live
//!        └─────────────────────────mount()─────────────────────────▲
//! ```
//!
//! - **Uninitialized**: the bootstrap marker is missing, as in a pre-render
//!   pass with no document to paint. Explicit modes resolve to themselves;
//!   `system` reads as `light` because the OS is not consulted yet.
//! - **Bootstrapped**: the bootstrap step painted the document before this
//!   context existed. For `system`, the first read trusts the applied
//!   attribute instead of recomputing it, so the first client render matches
//!   what is already on screen. That value is captured once and stops being
//!   used as soon as `set_mode` or an OS change moves the preference on.
//! - **Live**: entered by [`ThemeContext::mount`]. Every change is computed
//!   from the mode and the OS signal and applied to the document.
//!
//! The context is an explicit handle: create one per UI tree and pass clones
//! to whatever needs to read or change the theme.
//!
//! # Example
//!
//! ```rust
//! use std::rc::Rc;
//! use eyesante_theme::{
//!     run_bootstrap, ManualSignal, MemoryDocument, MemoryStore, Phase, ResolvedTheme,
//!     ThemeConfig, ThemeContext, ThemeMode,
//! };
//!
//! let config = ThemeConfig::default();
//! let store = MemoryStore::new();
//! let signal = ManualSignal::new(Some(false));
//! let doc = MemoryDocument::new();
//!
//! run_bootstrap(&store, &signal, &doc, &config);
//!
//! let theme = ThemeContext::new(config, store, Rc::new(signal.clone()), doc);
//! assert_eq!(theme.phase(), Phase::Bootstrapped);
//! theme.initialize();
//!
//! let _mounted = theme.mount();
//! signal.set(Some(true));
//! assert_eq!(theme.snapshot().resolved, ResolvedTheme::Dark);
//!
//! theme.set_mode(ThemeMode::Light);
//! assert_eq!(theme.snapshot().resolved, ResolvedTheme::Light);
//! ```

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use once_cell::unsync::OnceCell;

use crate::config::ThemeConfig;
use crate::document::{apply_theme, read_applied_theme, DocumentRoot};
use crate::error::{StorageError, ThemeError};
use crate::scheme::{subscribe_scoped, ColorSchemeSignal, Subscription};
use crate::storage::PreferenceStore;
use crate::theme::{ResolvedTheme, ThemeMode, ThemePreference};
use crate::toggle::toggle_target;

/// Lifecycle phase of a [`ThemeContext`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Uninitialized,
    Bootstrapped,
    Live,
}

#[derive(Debug)]
struct State {
    phase: Phase,
    mode: ThemeMode,
    resolved: ResolvedTheme,
    loaded: bool,
    degraded: bool,
    /// Set once `set_mode` or an OS change has moved the preference on from
    /// what the bootstrap step painted.
    touched: bool,
}

struct Shared {
    config: ThemeConfig,
    store: Box<dyn PreferenceStore>,
    signal: Rc<dyn ColorSchemeSignal>,
    document: Box<dyn DocumentRoot>,
    bootstrap_value: OnceCell<ResolvedTheme>,
    state: RefCell<State>,
}

/// Handle to the theme preference of one UI tree.
///
/// Clones are cheap and refer to the same preference.
#[derive(Clone)]
pub struct ThemeContext {
    shared: Rc<Shared>,
}

impl ThemeContext {
    /// Creates the context for a UI tree.
    ///
    /// The starting phase is [`Phase::Bootstrapped`] when the document carries
    /// the bootstrap marker, [`Phase::Uninitialized`] otherwise. Nothing is
    /// read from storage until [`initialize`](Self::initialize) or
    /// [`mount`](Self::mount).
    pub fn new<S, D>(
        config: ThemeConfig,
        store: S,
        signal: Rc<dyn ColorSchemeSignal>,
        document: D,
    ) -> Self
    where
        S: PreferenceStore + 'static,
        D: DocumentRoot + 'static,
    {
        let phase = if document.marker(&config.marker) {
            Phase::Bootstrapped
        } else {
            Phase::Uninitialized
        };
        let state = State {
            phase,
            mode: config.default_mode,
            resolved: ResolvedTheme::Light,
            loaded: false,
            degraded: false,
            touched: false,
        };
        let shared = Rc::new(Shared {
            config,
            store: Box::new(store),
            signal,
            document: Box::new(document),
            bootstrap_value: OnceCell::new(),
            state: RefCell::new(state),
        });
        let context = Self { shared };
        let resolved = context.current_resolution();
        context.shared.state.borrow_mut().resolved = resolved;
        context
    }

    /// Loads the persisted mode and returns the resulting preference.
    ///
    /// An absent or invalid stored value is replaced with the configured
    /// default, which is written back. An explicit mode always resolves to
    /// itself. Before [`mount`](Self::mount), `system` resolves to what the
    /// bootstrap step painted (or `light` when it never ran) until
    /// [`set_mode`](Self::set_mode) or an OS change moves it on.
    pub fn initialize(&self) -> ThemePreference {
        self.load_mode();
        let resolved = self.current_resolution();
        let mut state = self.shared.state.borrow_mut();
        state.resolved = resolved;
        ThemePreference::new(state.mode, state.resolved)
    }

    /// Takes over from the bootstrap step.
    ///
    /// Switches to [`Phase::Live`], recomputes the resolved theme from the
    /// mode and the live OS signal, applies it to the document, and
    /// subscribes to OS colour-scheme changes. The subscription lives as long
    /// as the returned [`Mounted`] guard.
    pub fn mount(&self) -> Mounted {
        self.load_mode();
        let mode = {
            let mut state = self.shared.state.borrow_mut();
            if state.phase != Phase::Live {
                tracing::debug!(from = ?state.phase, "theme context mounted");
            }
            state.phase = Phase::Live;
            state.mode
        };
        let resolved = self.resolve_live(mode);
        self.shared.state.borrow_mut().resolved = resolved;
        self.apply(resolved);

        let weak: Weak<Shared> = Rc::downgrade(&self.shared);
        let subscription = subscribe_scoped(
            &self.shared.signal,
            Box::new(move |is_dark| {
                if let Some(shared) = weak.upgrade() {
                    ThemeContext { shared }.on_system_preference_change(is_dark);
                }
            }),
        );
        Mounted {
            context: self.clone(),
            _subscription: subscription,
        }
    }

    /// Sets the user's mode.
    ///
    /// Persists the mode, recomputes the resolved theme and, once live,
    /// applies it to the document. Setting the same mode again changes
    /// nothing observable.
    pub fn set_mode(&self, mode: ThemeMode) {
        {
            let mut state = self.shared.state.borrow_mut();
            state.mode = mode;
            state.loaded = true;
            state.touched = true;
        }
        tracing::debug!(mode = %mode, "saving theme");
        self.persist(mode);

        let resolved = self.resolve_live(mode);
        let live = {
            let mut state = self.shared.state.borrow_mut();
            state.resolved = resolved;
            state.phase == Phase::Live
        };
        if live {
            self.apply(resolved);
        }
    }

    /// Parses and sets a mode from untyped input.
    ///
    /// # Errors
    ///
    /// Returns [`ThemeError::InvalidMode`] naming `raw` if it is not one of
    /// `light`, `dark` or `system`. The preference is left untouched.
    pub fn set_mode_str(&self, raw: &str) -> Result<(), ThemeError> {
        let mode: ThemeMode = raw.parse()?;
        self.set_mode(mode);
        Ok(())
    }

    /// Flips between light and dark, as the single-button toggle does.
    ///
    /// Returns the mode that was set. See [`toggle_target`].
    pub fn toggle(&self) -> ThemeMode {
        let target = toggle_target(self.snapshot());
        self.set_mode(target);
        target
    }

    /// Handles an OS colour-scheme change.
    ///
    /// Ignored unless the mode is [`ThemeMode::System`].
    pub fn on_system_preference_change(&self, is_dark: bool) {
        let resolved = ResolvedTheme::from_prefers_dark(is_dark);
        let live = {
            let mut state = self.shared.state.borrow_mut();
            if state.mode != ThemeMode::System {
                tracing::trace!(mode = %state.mode, "ignoring system theme change");
                return;
            }
            state.resolved = resolved;
            state.touched = true;
            state.phase == Phase::Live
        };
        tracing::debug!(theme = %resolved, "system theme changed");
        if live {
            self.apply(resolved);
        }
    }

    /// Current mode and resolved theme.
    pub fn snapshot(&self) -> ThemePreference {
        let state = self.shared.state.borrow();
        ThemePreference::new(state.mode, state.resolved)
    }

    pub fn phase(&self) -> Phase {
        self.shared.state.borrow().phase
    }

    /// Whether storage has failed and the preference is now memory-only.
    pub fn is_degraded(&self) -> bool {
        self.shared.state.borrow().degraded
    }

    pub fn config(&self) -> &ThemeConfig {
        &self.shared.config
    }

    fn trusted_bootstrap_value(&self) -> ResolvedTheme {
        *self.shared.bootstrap_value.get_or_init(|| {
            read_applied_theme(self.shared.document.as_ref(), &self.shared.config)
                .unwrap_or(ResolvedTheme::Light)
        })
    }

    /// Resolution for a first read, before anything live has been computed.
    ///
    /// Explicit modes resolve to themselves. `system` follows the OS once
    /// live; before that it keeps the bootstrap value (or `light` without a
    /// bootstrap) until the preference has been touched.
    fn current_resolution(&self) -> ResolvedTheme {
        let (phase, mode, touched, current) = {
            let state = self.shared.state.borrow();
            (state.phase, state.mode, state.touched, state.resolved)
        };
        match (mode, phase) {
            (ThemeMode::Light | ThemeMode::Dark, _) => mode.resolve(None),
            (ThemeMode::System, Phase::Live) => self.resolve_live(mode),
            (ThemeMode::System, _) if touched => current,
            (ThemeMode::System, Phase::Bootstrapped) => self.trusted_bootstrap_value(),
            (ThemeMode::System, Phase::Uninitialized) => ResolvedTheme::Light,
        }
    }

    /// Resolves `mode`, querying the OS signal only when `mode` needs it.
    fn resolve_live(&self, mode: ThemeMode) -> ResolvedTheme {
        match mode {
            ThemeMode::System => mode.resolve(self.shared.signal.prefers_dark()),
            explicit => explicit.resolve(None),
        }
    }

    fn apply(&self, resolved: ResolvedTheme) {
        apply_theme(self.shared.document.as_ref(), resolved, &self.shared.config);
    }

    /// Reads the persisted mode once per context.
    fn load_mode(&self) {
        {
            let mut state = self.shared.state.borrow_mut();
            if state.loaded {
                return;
            }
            state.loaded = true;
            if state.degraded {
                return;
            }
        }

        match self.shared.store.get(&self.shared.config.storage_key) {
            Ok(Some(raw)) => match raw.parse::<ThemeMode>() {
                Ok(mode) => {
                    tracing::debug!(mode = %mode, "loading saved theme");
                    self.shared.state.borrow_mut().mode = mode;
                }
                Err(err) => {
                    tracing::debug!(error = %err, "ignoring saved theme");
                    self.write_default();
                }
            },
            Ok(None) => self.write_default(),
            Err(err) => self.degrade(err),
        }
    }

    fn write_default(&self) {
        let mode = self.shared.config.default_mode;
        tracing::debug!(mode = %mode, "setting default theme");
        self.shared.state.borrow_mut().mode = mode;
        self.persist(mode);
    }

    fn persist(&self, mode: ThemeMode) {
        if self.is_degraded() {
            return;
        }
        if let Err(err) = self.shared.store.set(&self.shared.config.storage_key, mode.as_str()) {
            self.degrade(err);
        }
    }

    fn degrade(&self, err: StorageError) {
        tracing::warn!(error = %err, "theme storage unavailable, keeping preference in memory");
        self.shared.state.borrow_mut().degraded = true;
    }
}

impl std::fmt::Debug for ThemeContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ThemeContext")
            .field("config", &self.shared.config)
            .field("state", &*self.shared.state.borrow())
            .finish()
    }
}

/// Guard for a mounted [`ThemeContext`].
///
/// Holds the OS colour-scheme subscription. Dropping it (or calling
/// [`unmount`](Mounted::unmount)) stops OS changes from reaching the
/// context. The context itself stays live.
#[must_use = "dropping Mounted releases the colour-scheme subscription"]
pub struct Mounted {
    context: ThemeContext,
    _subscription: Subscription,
}

impl Mounted {
    pub fn context(&self) -> &ThemeContext {
        &self.context
    }

    pub fn unmount(self) {}
}

impl std::fmt::Debug for Mounted {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Mounted")
            .field("subscription", &self._subscription)
            .finish()
    }
}
