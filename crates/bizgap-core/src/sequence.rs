//! Discarding out-of-order responses.
//!
//! When a new location pick replaces one still in flight, both requests may
//! complete in either order. Each request takes a [`Ticket`] when it starts;
//! a finished response is shown only if its ticket is newer than the last one
//! shown, so a slow early response can never overwrite a later one.

use std::sync::atomic::{AtomicU64, Ordering};

/// Monotonic request number issued by [`ResponseSequencer::issue`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Ticket(u64);

impl Ticket {
    #[must_use]
    pub fn get(self) -> u64 {
        self.0
    }
}

#[derive(Debug, Default)]
pub struct ResponseSequencer {
    next: AtomicU64,
    /// Highest ticket accepted so far; 0 means none.
    displayed: AtomicU64,
}

impl ResponseSequencer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Issues the ticket for a request that is about to start. Tickets start at 1.
    pub fn issue(&self) -> Ticket {
        Ticket(self.next.fetch_add(1, Ordering::Relaxed) + 1)
    }

    /// Returns `true` and records `ticket` when it is newer than every ticket
    /// accepted so far; returns `false` for a stale response.
    pub fn accept(&self, ticket: Ticket) -> bool {
        self.displayed.fetch_max(ticket.0, Ordering::AcqRel) < ticket.0
    }

    /// Whether a response holding `ticket` would still be current.
    #[must_use]
    pub fn is_current(&self, ticket: Ticket) -> bool {
        self.displayed.load(Ordering::Acquire) < ticket.0
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;

    #[test]
    fn tickets_increase() {
        let seq = ResponseSequencer::new();
        let a = seq.issue();
        let b = seq.issue();
        assert_eq!(a.get(), 1);
        assert!(b > a);
    }

    #[test]
    fn in_order_responses_are_all_accepted() {
        let seq = ResponseSequencer::new();
        let first = seq.issue();
        let second = seq.issue();
        assert!(seq.accept(first));
        assert!(seq.accept(second));
    }

    #[test]
    fn late_response_from_older_request_is_discarded() {
        let seq = ResponseSequencer::new();
        let slow = seq.issue();
        let fast = seq.issue();
        assert!(seq.accept(fast));
        assert!(!seq.is_current(slow));
        assert!(!seq.accept(slow));
    }

    #[test]
    fn same_ticket_is_accepted_once() {
        let seq = ResponseSequencer::new();
        let t = seq.issue();
        assert!(seq.accept(t));
        assert!(!seq.accept(t));
    }

    #[test]
    fn concurrent_issue_yields_unique_tickets() {
        let seq = Arc::new(ResponseSequencer::new());
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let seq = Arc::clone(&seq);
                std::thread::spawn(move || (0..100).map(|_| seq.issue().get()).collect::<Vec<_>>())
            })
            .collect();
        let mut all: Vec<u64> = handles
            .into_iter()
            .flat_map(|h| h.join().expect("thread panicked"))
            .collect();
        all.sort_unstable();
        all.dedup();
        assert_eq!(all.len(), 800);
    }
}
