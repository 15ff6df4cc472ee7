//! # SubscriberSet: fan-out over multiple subscribers
//!
//! [`SubscriberSet`] distributes each [`Event`] to every registered subscriber.
//!
//! ## What it guarantees
//! - Every subscriber sees every event emitted through this set.
//! - Panics inside subscribers are caught (isolation); the other subscribers
//!   are told through a `SubscriberPanicked` event.
//! - Cloning is cheap (`Arc`-backed), so the set travels with configs into
//!   every pool and cursor thread.
//!
//! ## What it does **not** guarantee
//! - No global ordering across threads; use [`Event::seq`].
//!
//! ## Diagram
//! ```text
//!    emit(&Event)
//!        ├──► S1.on_event()   (panic caught)
//!        ├──► S2.on_event()   (panic caught)
//!        └──► SN.on_event()   (panic caught)
//! ```

use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use crate::events::{panic_message, Event};

use super::Subscribe;

/// Composite fan-out over subscribers.
#[derive(Clone)]
pub struct SubscriberSet {
    subs: Arc<[Arc<dyn Subscribe>]>,
}

impl SubscriberSet {
    /// Creates a new set from the given subscribers.
    #[must_use]
    pub fn new(subs: Vec<Arc<dyn Subscribe>>) -> Self {
        Self { subs: subs.into() }
    }

    /// Returns a new set with `sub` appended.
    #[must_use]
    pub fn with(&self, sub: Arc<dyn Subscribe>) -> Self {
        let mut subs: Vec<Arc<dyn Subscribe>> = self.subs.iter().cloned().collect();
        subs.push(sub);
        Self::new(subs)
    }

    /// Fan-out one event to all subscribers.
    pub fn emit(&self, event: &Event) {
        for (idx, sub) in self.subs.iter().enumerate() {
            let res = panic::catch_unwind(AssertUnwindSafe(|| sub.on_event(event)));
            if let Err(payload) = res {
                let report = Event::subscriber_panicked(sub.name(), panic_message(payload.as_ref()));
                // The panicking subscriber is skipped so a faulty one cannot loop.
                for (other_idx, other) in self.subs.iter().enumerate() {
                    if other_idx != idx {
                        let _ = panic::catch_unwind(AssertUnwindSafe(|| other.on_event(&report)));
                    }
                }
            }
        }
    }

    /// True if there are no subscribers.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.subs.is_empty()
    }

    /// Number of subscribers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.subs.len()
    }
}

impl Default for SubscriberSet {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl fmt::Debug for SubscriberSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.subs.iter().map(|s| s.name()))
            .finish()
    }
}
