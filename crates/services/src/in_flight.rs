//! Per-operation dispatch guard.
//!
//! A store takes a ticket for `(operation, target)` before sending a
//! mutation. While the ticket is alive a second dispatch of the same key is
//! refused; the ticket releases its key on drop, including when the owning
//! future is cancelled.

use dashmap::DashSet;
use tracing::debug;

#[derive(Debug, Default)]
pub struct InFlight {
    keys: DashSet<String>,
}

impl InFlight {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `None` when `key` is already being dispatched.
    pub fn try_begin(&self, key: impl Into<String>) -> Option<InFlightTicket<'_>> {
        let key = key.into();
        if self.keys.insert(key.clone()) {
            Some(InFlightTicket { owner: self, key })
        } else {
            debug!(%key, "duplicate dispatch refused");
            None
        }
    }

    pub fn is_pending(&self, key: &str) -> bool {
        self.keys.contains(key)
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

pub struct InFlightTicket<'a> {
    owner: &'a InFlight,
    key: String,
}

impl InFlightTicket<'_> {
    pub fn key(&self) -> &str {
        &self.key
    }
}

impl Drop for InFlightTicket<'_> {
    fn drop(&mut self) {
        self.owner.keys.remove(&self.key);
    }
}
