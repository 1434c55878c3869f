//! Sequenced fetches and fixed-interval polling.
//!
//! Every fetch takes a [`Ticket`] from a [`PollGuard`] before it starts. When
//! it completes, its result is applied only if no newer fetch has started in
//! the meantime, so a slow response can never overwrite a fresher one.

use gloo_timers::callback::Interval;
use leptos::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Ticket(u64);

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PollGuard {
    latest: u64,
}

impl PollGuard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new fetch; every earlier ticket becomes stale
    pub fn issue(&mut self) -> Ticket {
        self.latest += 1;
        Ticket(self.latest)
    }

    pub fn is_current(&self, ticket: Ticket) -> bool {
        ticket.0 == self.latest
    }

    /// Invalidate in-flight fetches without starting a new one
    pub fn invalidate(&mut self) {
        self.latest += 1;
    }
}

/// Failure streak of a polled fetch. Only the first failure of a streak is
/// reported; a success ends the streak.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PollHealth {
    failing: bool,
}

impl PollHealth {
    /// Record one completed cycle; `true` when the user should be told
    pub fn record(&mut self, ok: bool) -> bool {
        let report = !ok && !self.failing;
        self.failing = !ok;
        report
    }
}

/// Take a ticket from a guard kept in a `StoredValue`
pub fn issue_ticket(guard: StoredValue<PollGuard>) -> Option<Ticket> {
    guard.try_update_value(|g| g.issue())
}

/// Whether a completion holding `ticket` may still be applied; logs the drop
pub fn accept_ticket(guard: StoredValue<PollGuard>, ticket: Ticket, what: &str) -> bool {
    let current = guard.try_with_value(|g| g.is_current(ticket)).unwrap_or(false);
    if !current {
        log::debug!("Discarding stale {} response ({:?})", what, ticket);
    }
    current
}

/// Run `tick` now and then every `interval_ms` while the calling component is
/// mounted.
pub fn use_polling<F>(interval_ms: u32, tick: F)
where
    F: Fn() + 'static,
{
    tick();
    use_interval(interval_ms, tick);
}

/// Run `f` every `interval_ms`; the timer is cancelled when the owner is
/// cleaned up.
pub fn use_interval<F>(interval_ms: u32, f: F)
where
    F: Fn() + 'static,
{
    let interval = Interval::new(interval_ms, f);
    let handle = StoredValue::new_local(Some(interval));
    on_cleanup(move || {
        handle.try_update_value(|h| {
            if let Some(interval) = h.take() {
                interval.cancel();
            }
        });
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_latest_ticket_wins() {
        let mut guard = PollGuard::new();
        let first = guard.issue();
        let second = guard.issue();
        assert!(!guard.is_current(first));
        assert!(guard.is_current(second));
    }

    #[test]
    fn test_late_response_after_newer_completion_is_stale() {
        let mut guard = PollGuard::new();
        let slow = guard.issue();
        let fast = guard.issue();
        // fast completes first and is applied
        assert!(guard.is_current(fast));
        // slow arrives afterwards and must be dropped
        assert!(!guard.is_current(slow));
    }

    #[test]
    fn test_invalidate() {
        let mut guard = PollGuard::new();
        let t = guard.issue();
        guard.invalidate();
        assert!(!guard.is_current(t));
        let next = guard.issue();
        assert!(next > t);
        assert!(guard.is_current(next));
    }

    #[test]
    fn test_failure_streak_reported_once() {
        let mut health = PollHealth::default();
        assert!(!health.record(true));
        assert!(health.record(false));
        assert!(!health.record(false));
        assert!(!health.record(true));
        assert!(health.record(false));
    }
}
