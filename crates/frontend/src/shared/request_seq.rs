//! Generation counter that lets only the newest in-flight request win.
//!
//! ```ignore
//! let seq = RequestSeq::new();
//! let ticket = seq.next();
//! let result = api::fetch().await;
//! if seq.is_current(ticket) { apply(result) }
//! ```

use leptos::prelude::*;

#[derive(Clone, Copy)]
pub struct RequestSeq {
    latest: StoredValue<u64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket(u64);

impl RequestSeq {
    pub fn new() -> Self {
        Self {
            latest: StoredValue::new(0),
        }
    }

    /// Start a new request; every older ticket becomes stale.
    pub fn next(&self) -> Ticket {
        self.latest.update_value(|v| *v += 1);
        Ticket(self.latest.get_value())
    }

    pub fn is_current(&self, ticket: Ticket) -> bool {
        self.latest.try_get_value() == Some(ticket.0)
    }

    /// Drop whatever is in flight without starting anything new.
    pub fn invalidate(&self) {
        self.latest.update_value(|v| *v += 1);
    }
}

impl Default for RequestSeq {
    fn default() -> Self {
        Self::new()
    }
}
