//! Scoped event subscriptions.
//!
//! A component that wants to hear about events outside its own bounds, such
//! as a pointer press anywhere on screen or key presses while it owns a
//! popup, takes a [`Subscription`] from its [`Subscriptions`] registry. The
//! listener stays registered exactly as long as the guard is alive, so
//! releasing it on blur or drop cannot be forgotten.
//!
//! ```rust
//! use search_autocomplete::subscription::{ListenerKind, Subscriptions};
//!
//! let subs = Subscriptions::new();
//! {
//!     let _keys = subs.subscribe(ListenerKind::KeyDown);
//!     assert!(subs.is_listening(ListenerKind::KeyDown));
//! }
//! assert!(!subs.is_listening(ListenerKind::KeyDown));
//! ```

use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Kinds of global listeners a component can hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListenerKind {
    /// Pointer presses anywhere.
    PointerDown,
    /// Key presses routed to the component regardless of focus order.
    KeyDown,
}

impl ListenerKind {
    fn slot(self) -> usize {
        match self {
            ListenerKind::PointerDown => 0,
            ListenerKind::KeyDown => 1,
        }
    }
}

#[derive(Default)]
struct Counts([AtomicUsize; 2]);

/// Registry of live listeners. Cloning shares the registry.
#[derive(Clone, Default)]
pub struct Subscriptions {
    counts: Arc<Counts>,
}

impl fmt::Debug for Subscriptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscriptions")
            .field("pointer_down", &self.count(ListenerKind::PointerDown))
            .field("key_down", &self.count(ListenerKind::KeyDown))
            .finish()
    }
}

impl Subscriptions {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a listener; it is released when the returned guard drops.
    #[must_use = "the listener is released as soon as the guard is dropped"]
    pub fn subscribe(&self, kind: ListenerKind) -> Subscription {
        self.counts.0[kind.slot()].fetch_add(1, Ordering::SeqCst);
        Subscription {
            counts: Arc::clone(&self.counts),
            kind,
        }
    }

    /// Number of live listeners of `kind`.
    pub fn count(&self, kind: ListenerKind) -> usize {
        self.counts.0[kind.slot()].load(Ordering::SeqCst)
    }

    /// Whether at least one listener of `kind` is live.
    pub fn is_listening(&self, kind: ListenerKind) -> bool {
        self.count(kind) > 0
    }
}

/// Guard for one registered listener.
pub struct Subscription {
    counts: Arc<Counts>,
    kind: ListenerKind,
}

impl Subscription {
    /// The kind of listener this guard holds.
    pub fn kind(&self) -> ListenerKind {
        self.kind
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription").field("kind", &self.kind).finish()
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.counts.0[self.kind.slot()].fetch_sub(1, Ordering::SeqCst);
    }
}
