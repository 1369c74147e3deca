//! Shared cap on the number of diagnostics reported in one run.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

/// Counts diagnostics across all files of a run and signals when the
/// configured maximum has been reached.
///
/// Workers check [`DiagnosticBudget::is_exhausted`] between lines and stop
/// early once it returns true.
#[derive(Debug)]
pub struct DiagnosticBudget {
    max: usize,
    count: AtomicUsize,
    exhausted: AtomicBool,
}

impl DiagnosticBudget {
    /// Creates a budget admitting at most `max` diagnostics.
    #[must_use]
    pub fn new(max: usize) -> Self {
        Self {
            max,
            count: AtomicUsize::new(0),
            exhausted: AtomicBool::new(max == 0),
        }
    }

    /// Claims room for one diagnostic. Returns false when the budget is
    /// already used up, in which case the diagnostic must be dropped.
    pub fn try_acquire(&self) -> bool {
        let claimed = self
            .count
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |n| {
                (n < self.max).then_some(n + 1)
            });

        match claimed {
            Ok(previous) => {
                if previous + 1 >= self.max {
                    self.exhausted.store(true, Ordering::Release);
                }
                true
            }
            Err(_) => {
                self.exhausted.store(true, Ordering::Release);
                false
            }
        }
    }

    /// Whether the maximum has been reached.
    #[must_use]
    pub fn is_exhausted(&self) -> bool {
        self.exhausted.load(Ordering::Acquire)
    }

    /// Number of diagnostics admitted so far.
    #[must_use]
    pub fn used(&self) -> usize {
        self.count.load(Ordering::Acquire)
    }
}
