//! Process-lifetime sequence numbers for contracts and recruitments.
//!
//! Numbers restart at 1 whenever the process restarts. They label messages
//! for humans and are not identifiers: two concurrent submissions can be shown
//! the same number.

use std::sync::atomic::{AtomicU32, Ordering};

use crate::form::Category;

/// Contract and recruitment counters.
#[derive(Debug, Default)]
pub struct SequenceCounters {
    contracts: AtomicU32,
    recruits: AtomicU32,
}

impl SequenceCounters {
    pub fn new() -> Self {
        Self::default()
    }

    fn counter(&self, category: Category) -> Option<&AtomicU32> {
        match category {
            Category::Contract(_) => Some(&self.contracts),
            Category::Recruitment => Some(&self.recruits),
            Category::Generic => None,
        }
    }

    /// Number the next delivered submission of this category will carry.
    ///
    /// Does not advance the counter; call [`commit`](Self::commit) once the
    /// message has been delivered.
    pub fn peek_next(&self, category: Category) -> Option<u32> {
        self.counter(category)
            .map(|c| c.load(Ordering::Relaxed).saturating_add(1))
    }

    /// Record a successful delivery.
    pub fn commit(&self, category: Category) {
        if let Some(counter) = self.counter(category) {
            counter.fetch_add(1, Ordering::Relaxed);
        }
    }

    /// Delivered contracts so far.
    pub fn contracts(&self) -> u32 {
        self.contracts.load(Ordering::Relaxed)
    }

    /// Delivered recruitments so far.
    pub fn recruits(&self) -> u32 {
        self.recruits.load(Ordering::Relaxed)
    }
}
