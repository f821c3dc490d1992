//! OS colour-scheme detection through `dark-light`.

use std::cell::Cell;

use dark_light::{detect as detect_os_theme, Mode as OsThemeMode};

use super::{ColorSchemeSignal, Listeners, SchemeListener, SubscriptionId};

/// Function used to query the OS. Returns `None` when detection is unsupported.
pub type SchemeDetector = fn() -> Option<bool>;

/// The signal reported by the operating system.
///
/// The OS offers no push notification that works on every platform, so
/// changes are delivered by calling [`SystemSignal::poll`] from the host's
/// event loop.
pub struct SystemSignal {
    detector: SchemeDetector,
    last: Cell<Option<bool>>,
    listeners: Listeners,
}

impl SystemSignal {
    /// Creates a signal backed by the real OS detector.
    pub fn new() -> Self {
        Self::with_detector(os_scheme_detector)
    }

    /// Creates a signal backed by a custom detector.
    ///
    /// Useful for testing or for forcing a specific colour scheme.
    pub fn with_detector(detector: SchemeDetector) -> Self {
        Self {
            detector,
            last: Cell::new(detector()),
            listeners: Listeners::default(),
        }
    }

    /// Re-runs detection and notifies listeners if the value changed.
    ///
    /// Returns `true` when a change was delivered.
    pub fn poll(&self) -> bool {
        let current = (self.detector)();
        if self.last.replace(current) == current {
            return false;
        }
        tracing::debug!(prefers_dark = ?current, "system color scheme changed");
        self.listeners.notify(current.unwrap_or(false));
        true
    }
}

impl Default for SystemSignal {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for SystemSignal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SystemSignal")
            .field("last", &self.last.get())
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl ColorSchemeSignal for SystemSignal {
    /// Queries the OS without recording the value, so a later
    /// [`poll`](SystemSignal::poll) still reports the change.
    fn prefers_dark(&self) -> Option<bool> {
        (self.detector)()
    }

    fn subscribe(&self, listener: SchemeListener) -> SubscriptionId {
        self.listeners.add(listener)
    }

    fn unsubscribe(&self, id: SubscriptionId) {
        self.listeners.remove(id);
    }
}

fn os_scheme_detector() -> Option<bool> {
    #[allow(unreachable_patterns)]
    match detect_os_theme() {
        OsThemeMode::Dark => Some(true),
        OsThemeMode::Light => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::rc::Rc;
    use std::sync::atomic::{AtomicU8, Ordering};

    // 0 = unsupported, 1 = light, 2 = dark
    static FAKE_OS: AtomicU8 = AtomicU8::new(1);

    fn fake_detector() -> Option<bool> {
        match FAKE_OS.load(Ordering::SeqCst) {
            1 => Some(false),
            2 => Some(true),
            _ => None,
        }
    }

    #[test]
    fn test_system_signal_poll_delivers_changes() {
        FAKE_OS.store(1, Ordering::SeqCst);
        let signal = SystemSignal::with_detector(fake_detector);
        let seen = Rc::new(std::cell::RefCell::new(Vec::new()));
        let s = Rc::clone(&seen);
        signal.subscribe(Box::new(move |dark| s.borrow_mut().push(dark)));

        assert!(!signal.poll());

        FAKE_OS.store(2, Ordering::SeqCst);
        assert!(signal.poll());
        assert!(!signal.poll());
        assert_eq!(signal.prefers_dark(), Some(true));

        FAKE_OS.store(0, Ordering::SeqCst);
        assert!(signal.poll());
        assert_eq!(signal.prefers_dark(), None);

        assert_eq!(*seen.borrow(), vec![true, false]);
        FAKE_OS.store(1, Ordering::SeqCst);
    }

    static QUERIED_OS: AtomicU8 = AtomicU8::new(1);

    fn queried_detector() -> Option<bool> {
        Some(QUERIED_OS.load(Ordering::SeqCst) == 2)
    }

    #[test]
    fn test_query_does_not_swallow_pending_change() {
        QUERIED_OS.store(1, Ordering::SeqCst);
        let signal = SystemSignal::with_detector(queried_detector);
        let seen = Rc::new(std::cell::RefCell::new(Vec::new()));
        let s = Rc::clone(&seen);
        signal.subscribe(Box::new(move |dark| s.borrow_mut().push(dark)));

        QUERIED_OS.store(2, Ordering::SeqCst);
        assert_eq!(signal.prefers_dark(), Some(true));

        assert!(signal.poll());
        assert_eq!(*seen.borrow(), vec![true]);
    }

    #[test]
    fn test_forced_detector() {
        let signal = SystemSignal::with_detector(|| Some(true));
        assert_eq!(signal.prefers_dark(), Some(true));
    }
}
