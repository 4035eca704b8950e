//! Run-scoped collection point for issues.

use crate::types::Issue;
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Append-only issue store shared by every rule during one lint run.
///
/// The driver owns one ledger, clears it at the start of each run and drains
/// it once every inspection has finished. Rules only ever call
/// [`IssueLedger::record`].
#[derive(Debug, Default)]
pub struct IssueLedger {
    issues: Mutex<Vec<Issue>>,
}

impl IssueLedger {
    /// Creates an empty ledger.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Discards every recorded issue.
    pub fn clear(&self) {
        self.lock().clear();
    }

    /// Appends one issue. Safe to call from many workers at once.
    pub fn record(&self, issue: Issue) {
        self.lock().push(issue);
    }

    /// Returns a snapshot of everything recorded since the last [`clear`].
    ///
    /// The ledger keeps its contents, so repeated drains within one run
    /// return the same sequence in the same order.
    ///
    /// [`clear`]: IssueLedger::clear
    #[must_use]
    pub fn drain(&self) -> Vec<Issue> {
        self.lock().clone()
    }

    /// Number of issues recorded so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Returns true if nothing has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    // A panicking rule can poison the lock; appends are atomic so the
    // vector is still consistent.
    fn lock(&self) -> MutexGuard<'_, Vec<Issue>> {
        self.issues.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
