//! Subscriber types for the editor session.
//!
//! A subscriber is a presentation-side callback that wants to re-render
//! whenever the graph changes. The session calls every subscriber, in
//! registration order, after each successful mutation and revalidation.

use crate::graph::GraphSnapshot;
use crate::validate::ValidationReport;

use super::Outcome;

/// Unique identifier for a subscriber within one session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriberId(u64);

impl SubscriberId {
    pub(crate) fn new(raw: u64) -> Self {
        Self(raw)
    }
}

/// What a subscriber receives after a mutation.
#[derive(Debug, Clone, Copy)]
pub struct Update<'a> {
    /// The mutation that triggered this update.
    pub outcome: &'a Outcome,
    /// The graph after the mutation.
    pub snapshot: &'a GraphSnapshot,
    /// The validation of `snapshot`.
    pub report: &'a ValidationReport,
}

/// A registered change callback.
pub struct Subscriber {
    id: SubscriberId,
    notify: Box<dyn Fn(&Update<'_>)>,
}

impl Subscriber {
    /// Create a new subscriber with the given notification callback.
    pub(crate) fn new<F>(id: SubscriberId, notify: F) -> Self
    where
        F: Fn(&Update<'_>) + 'static,
    {
        Self {
            id,
            notify: Box::new(notify),
        }
    }

    /// Get the subscriber's ID.
    pub fn id(&self) -> SubscriberId {
        self.id
    }

    /// Notify the subscriber that the graph changed.
    pub(crate) fn notify(&self, update: &Update<'_>) {
        (self.notify)(update);
    }
}

impl std::fmt::Debug for Subscriber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscriber").field("id", &self.id).finish()
    }
}
