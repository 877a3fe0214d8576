//! Cancellable deferred update of the debounced query.

use bubbletea_rs::{tick as bubbletea_tick, Cmd, Msg};
use std::time::Duration;

use super::types::DebounceMsg;

/// Schedules [`DebounceMsg`] ticks and tells the current one from superseded ones.
///
/// Every [`Debouncer::schedule`] bumps the tag, so only the tick armed last
/// is accepted.
#[derive(Debug, Clone)]
pub(crate) struct Debouncer {
    id: i64,
    pub(crate) tag: u64,
    delay: Duration,
    pending: bool,
}

impl Debouncer {
    pub(crate) fn new(id: i64, delay: Duration) -> Self {
        Self {
            id,
            tag: 0,
            delay,
            pending: false,
        }
    }

    pub(crate) fn delay(&self) -> Duration {
        self.delay
    }

    pub(crate) fn set_delay(&mut self, delay: Duration) {
        self.delay = delay;
    }

    /// Cancels any pending tick and arms a new one.
    pub(crate) fn schedule(&mut self) -> Cmd {
        self.tag = self.tag.wrapping_add(1);
        self.pending = true;

        let id = self.id;
        let tag = self.tag;
        bubbletea_tick(self.delay, move |_| Box::new(DebounceMsg { id, tag }) as Msg)
    }

    pub(crate) fn is_pending(&self) -> bool {
        self.pending
    }

    /// Accepts `msg` if it is the tick armed last; consumes the pending state.
    pub(crate) fn accept(&mut self, msg: &DebounceMsg) -> bool {
        if msg.id != self.id || msg.tag != self.tag || !self.pending {
            return false;
        }
        self.pending = false;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn msg(d: &Debouncer) -> DebounceMsg {
        DebounceMsg {
            id: d.id,
            tag: d.tag,
        }
    }

    #[test]
    fn test_only_last_schedule_is_accepted() {
        let mut d = Debouncer::new(7, Duration::from_millis(300));
        let _ = d.schedule();
        let first = msg(&d);
        let _ = d.schedule();
        let second = msg(&d);

        assert!(!d.accept(&first));
        assert!(d.accept(&second));
        assert!(!d.is_pending());
    }

    #[test]
    fn test_tick_is_accepted_once() {
        let mut d = Debouncer::new(1, Duration::from_millis(10));
        let _ = d.schedule();
        let m = msg(&d);
        assert!(d.accept(&m));
        assert!(!d.accept(&m));
    }

    #[test]
    fn test_foreign_id_is_rejected() {
        let mut d = Debouncer::new(1, Duration::from_millis(10));
        let _ = d.schedule();
        let foreign = DebounceMsg { id: 2, tag: d.tag };
        assert!(!d.accept(&foreign));
        assert!(d.is_pending());
    }
}
