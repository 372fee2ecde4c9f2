//! Request sequencing for page-scoped state.
//!
//! Every fetch that feeds page state takes a [`RequestTicket`] before it goes
//! out. When the response arrives, it is applied only if no newer ticket has
//! been issued in the meantime; otherwise it is discarded. This keeps a slow,
//! older response from overwriting the result of a faster, newer one.

use std::sync::atomic::{AtomicU64, Ordering};

/// Issues monotonically increasing request tickets.
#[derive(Debug, Default)]
pub struct RequestSequence {
    latest: AtomicU64,
}

/// Proof of when a request was started.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct RequestTicket(u64);

impl RequestSequence {
    /// Sequence that has issued no tickets.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            latest: AtomicU64::new(0),
        }
    }

    /// Starts a request, superseding every earlier ticket.
    pub fn begin(&self) -> RequestTicket {
        RequestTicket(self.latest.fetch_add(1, Ordering::SeqCst) + 1)
    }

    /// True if no request was started after `ticket`.
    #[must_use]
    pub fn is_current(&self, ticket: RequestTicket) -> bool {
        self.latest.load(Ordering::SeqCst) == ticket.0
    }
}
