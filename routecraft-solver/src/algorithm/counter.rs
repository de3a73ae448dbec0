//! Iteration progress logging.

/// Counts loop iterations and logs progress at powers of two.
///
/// One counter belongs to one loop; it is reset at the start of every run.
#[derive(Debug, Clone)]
pub struct IterationCounter {
    label: &'static str,
    count: u64,
    next_report: u64,
}

impl IterationCounter {
    /// A zeroed counter whose log lines start with `label`.
    pub const fn new(label: &'static str) -> Self {
        Self {
            label,
            count: 0,
            next_report: 1,
        }
    }

    /// Back to zero.
    pub const fn reset(&mut self) {
        self.count = 0;
        self.next_report = 1;
    }

    /// Count one iteration, logging when the total reaches a power of two.
    pub fn increment(&mut self) {
        self.count = self.count.saturating_add(1);
        if self.count == self.next_report {
            log::info!("{} {}", self.label, self.count);
            self.next_report = self.next_report.saturating_mul(2);
        }
    }

    /// Iterations counted since the last reset.
    pub const fn count(&self) -> u64 {
        self.count
    }
}
