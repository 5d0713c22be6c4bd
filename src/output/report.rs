//! Per-run results: records that succeeded and failures that did not

use crate::fetch::FetchFailure;

/// Records harvested in one run plus every per-item failure
///
/// An empty `records` with empty `failures` means the source legitimately had
/// nothing; an empty `records` with failures means it could not be read.
#[derive(Debug, Clone)]
pub struct ScrapeReport<T> {
    pub records: Vec<T>,
    pub failures: Vec<FetchFailure>,
}

impl<T> Default for ScrapeReport<T> {
    fn default() -> Self {
        Self {
            records: Vec::new(),
            failures: Vec::new(),
        }
    }
}

impl<T> ScrapeReport<T> {
    /// Creates an empty report
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the outcome of one item
    pub fn record(&mut self, outcome: Result<T, FetchFailure>) {
        match outcome {
            Ok(record) => self.records.push(record),
            Err(failure) => self.failures.push(failure),
        }
    }

    /// True if no item failed
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }

    /// Counts for the end-of-run printout
    pub fn summary(&self) -> RunSummary {
        RunSummary {
            records: self.records.len() as u64,
            failures: self.failures.len() as u64,
        }
    }
}

/// Outcome counts for a run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Items that produced a record
    pub records: u64,
    /// Items that failed to fetch or decode
    pub failures: u64,
}

impl RunSummary {
    /// Total items attempted
    pub fn attempted(&self) -> u64 {
        self.records + self.failures
    }

    /// Returns the success rate as a percentage
    pub fn success_rate(&self) -> f64 {
        let attempted = self.attempted();
        if attempted == 0 {
            return 0.0;
        }
        (self.records as f64 / attempted as f64) * 100.0
    }
}
