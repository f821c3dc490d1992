//! Programmatically driven colour-scheme signal.

use std::cell::Cell;
use std::rc::Rc;

use super::{ColorSchemeSignal, Listeners, SchemeListener, SubscriptionId};

#[derive(Default)]
struct Inner {
    value: Cell<Option<bool>>,
    listeners: Listeners,
}

/// A signal whose value is set by the host.
///
/// Clones share state, so a host can keep one handle to drive changes while
/// the resolver holds another.
///
/// # Example
///
/// ```rust
/// use eyesante_theme::{ColorSchemeSignal, ManualSignal};
///
/// let signal = ManualSignal::new(Some(false));
/// signal.set(Some(true));
/// assert_eq!(signal.prefers_dark(), Some(true));
/// ```
#[derive(Clone, Default)]
pub struct ManualSignal {
    inner: Rc<Inner>,
}

impl ManualSignal {
    pub fn new(prefers_dark: Option<bool>) -> Self {
        let signal = Self::default();
        signal.inner.value.set(prefers_dark);
        signal
    }

    /// A signal for environments that cannot answer the query.
    pub fn unsupported() -> Self {
        Self::new(None)
    }

    /// Updates the value, notifying listeners only if it changed.
    pub fn set(&self, prefers_dark: Option<bool>) {
        if self.inner.value.replace(prefers_dark) == prefers_dark {
            return;
        }
        self.inner.listeners.notify(prefers_dark.unwrap_or(false));
    }

    pub fn listener_count(&self) -> usize {
        self.inner.listeners.len()
    }
}

impl std::fmt::Debug for ManualSignal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ManualSignal")
            .field("prefers_dark", &self.inner.value.get())
            .field("listeners", &self.inner.listeners.len())
            .finish()
    }
}

impl ColorSchemeSignal for ManualSignal {
    fn prefers_dark(&self) -> Option<bool> {
        self.inner.value.get()
    }

    fn subscribe(&self, listener: SchemeListener) -> SubscriptionId {
        self.inner.listeners.add(listener)
    }

    fn unsubscribe(&self, id: SubscriptionId) {
        self.inner.listeners.remove(id);
    }
}
