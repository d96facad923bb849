use std::time::Duration;

/// Identifies one scheduled timer slot; only the newest ticket is live
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket(u64);

/// Single-slot cancellable timer for the search box.
///
/// Scheduling hands out a new ticket and implicitly cancels the previous
/// one. The caller sleeps for `delay()` and then calls `fire` with its
/// ticket; only the latest ticket produces the pending query.
#[derive(Debug)]
pub struct Debouncer {
    delay: Duration,
    generation: u64,
    pending: Option<String>,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            generation: 0,
            pending: None,
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Restart the countdown for `query`
    pub fn schedule(&mut self, query: impl Into<String>) -> Ticket {
        self.generation += 1;
        self.pending = Some(query.into());
        Ticket(self.generation)
    }

    /// Drop any pending query; outstanding tickets become stale
    pub fn cancel(&mut self) {
        self.generation += 1;
        self.pending = None;
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Take the pending query if `ticket` is still the live slot
    pub fn fire(&mut self, ticket: Ticket) -> Option<String> {
        if ticket.0 != self.generation {
            return None;
        }
        self.pending.take()
    }
}
