//! The operating environment's colour-scheme signal.
//!
//! A signal answers "is a dark presentation preferred?" on demand and pushes
//! changes to subscribers. Two implementations are provided:
//!
//! - [`SystemSignal`]: queries the OS through `dark-light`; changes are
//!   picked up by [`SystemSignal::poll`]
//! - [`ManualSignal`]: set programmatically, for server-side rendering
//!   passes, embedding hosts and tests
//!
//! Subscriptions are scoped: [`subscribe_scoped`] returns a [`Subscription`]
//! that unsubscribes when dropped.

mod manual;
mod system;

pub use manual::ManualSignal;
pub use system::{SchemeDetector, SystemSignal};

use std::cell::{Cell, RefCell};
use std::rc::Rc;

/// Callback receiving the new "is dark preferred" value.
pub type SchemeListener = Box<dyn FnMut(bool)>;

/// Identifies one subscription on a signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// A boolean colour-scheme query with change notification.
pub trait ColorSchemeSignal {
    /// Whether a dark presentation is preferred.
    ///
    /// `None` means the environment cannot answer; callers treat it as light.
    fn prefers_dark(&self) -> Option<bool>;

    /// Registers a listener called once per actual change.
    fn subscribe(&self, listener: SchemeListener) -> SubscriptionId;

    /// Removes a listener. Unknown ids are ignored.
    fn unsubscribe(&self, id: SubscriptionId);
}

/// Subscribes to `signal`, returning a guard that unsubscribes on drop.
pub fn subscribe_scoped(signal: &Rc<dyn ColorSchemeSignal>, listener: SchemeListener) -> Subscription {
    let id = signal.subscribe(listener);
    Subscription {
        signal: Rc::clone(signal),
        id,
    }
}

/// A live subscription on a [`ColorSchemeSignal`].
///
/// Dropping it releases the listener, including during unwinding.
#[must_use = "dropping a Subscription unsubscribes immediately"]
pub struct Subscription {
    signal: Rc<dyn ColorSchemeSignal>,
    id: SubscriptionId,
}

impl Subscription {
    pub fn id(&self) -> SubscriptionId {
        self.id
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription").field("id", &self.id).finish()
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.signal.unsubscribe(self.id);
    }
}

type SharedListener = Rc<RefCell<SchemeListener>>;

/// Listener bookkeeping shared by the signal implementations.
#[derive(Default)]
pub(crate) struct Listeners {
    next_id: Cell<u64>,
    entries: RefCell<Vec<(SubscriptionId, SharedListener)>>,
}

impl Listeners {
    pub(crate) fn add(&self, listener: SchemeListener) -> SubscriptionId {
        let id = SubscriptionId(self.next_id.get());
        self.next_id.set(id.0 + 1);
        let shared: SharedListener = Rc::new(RefCell::new(listener));
        self.entries.borrow_mut().push((id, shared));
        id
    }

    pub(crate) fn remove(&self, id: SubscriptionId) {
        self.entries.borrow_mut().retain(|(entry, _)| *entry != id);
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    /// Calls every listener registered at the time of the call.
    ///
    /// The entry list is not borrowed while listeners run, so a listener may
    /// subscribe or unsubscribe.
    pub(crate) fn notify(&self, is_dark: bool) {
        let snapshot: Vec<SharedListener> = self
            .entries
            .borrow()
            .iter()
            .map(|(_, listener)| Rc::clone(listener))
            .collect();
        for listener in snapshot {
            if let Ok(mut callback) = listener.try_borrow_mut() {
                (&mut **callback)(is_dark);
            }
        }
    }
}
