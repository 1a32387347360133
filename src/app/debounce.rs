//! Debouncing on top of non-cancellable timers.
//!
//! Zellij's `set_timeout` cannot be cancelled and the resulting `Timer`
//! event carries no identifier. Every armed timer gets a ticket; tickets are
//! queued in arming order and, because all timers share one delay, they fire
//! in that same order. A firing timer only counts when its ticket is still
//! the live one.

use std::collections::VecDeque;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Debouncer {
    delay: Duration,
    next_ticket: u64,
    live: Option<u64>,
    armed: VecDeque<u64>,
}

impl Debouncer {
    #[must_use]
    pub const fn new(delay: Duration) -> Self {
        Self {
            delay,
            next_ticket: 0,
            live: None,
            armed: VecDeque::new(),
        }
    }

    /// Arms a new timer, superseding any pending one.
    ///
    /// Returns the delay the caller must schedule the timer with.
    pub fn arm(&mut self) -> Duration {
        let ticket = self.next_ticket;
        self.next_ticket += 1;
        self.live = Some(ticket);
        self.armed.push_back(ticket);
        tracing::trace!(ticket, pending_timers = self.armed.len(), "debounce armed");
        self.delay
    }

    /// Forgets the pending timer; its eventual firing is ignored.
    pub fn cancel(&mut self) {
        self.live = None;
    }

    /// Consumes one timer firing. Returns `true` when it belongs to the live
    /// (most recently armed, uncancelled) timer.
    pub fn on_timer(&mut self) -> bool {
        let Some(ticket) = self.armed.pop_front() else {
            return false;
        };

        if self.live == Some(ticket) {
            self.live = None;
            true
        } else {
            tracing::trace!(ticket, "superseded debounce timer ignored");
            false
        }
    }

    #[must_use]
    pub const fn is_pending(&self) -> bool {
        self.live.is_some()
    }
}
