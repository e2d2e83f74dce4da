//! Operation Timing Module
//!
//! Lightweight named start/stop latency records for instrumenting cache
//! hit/miss paths or coalesced operation latency. Purely observational:
//! misuse is a silent no-op, never an error.

use std::collections::HashMap;
use std::sync::Arc;

use serde::Serialize;

use crate::clock::{Clock, SystemClock};

// == Timing Record ==
/// A single named latency measurement.
#[derive(Debug, Clone, Serialize)]
pub struct TimingRecord {
    /// Start timestamp in clock milliseconds
    pub started_at_ms: u64,
    /// End timestamp, None until ended
    pub ended_at_ms: Option<u64>,
    /// Derived duration, None until ended
    pub duration_ms: Option<u64>,
}

// == Operation Timer ==
/// Records start/end timestamps per named operation.
///
/// Records are keyed by name with no history: starting a name again
/// overwrites the previous record.
pub struct OperationTimer {
    /// Latest record per operation name
    records: HashMap<String, TimingRecord>,
    /// Time source for the stamps
    clock: Arc<dyn Clock>,
}

impl std::fmt::Debug for OperationTimer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OperationTimer")
            .field("records", &self.records)
            .finish()
    }
}

impl Default for OperationTimer {
    fn default() -> Self {
        Self::new()
    }
}

impl OperationTimer {
    // == Constructors ==
    /// Creates a timer on the system clock.
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    /// Creates a timer reading time from the supplied clock.
    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            records: HashMap::new(),
            clock,
        }
    }

    // == Start Timing ==
    /// Starts (or restarts) the measurement for `name`.
    ///
    /// Any prior record under the same name is overwritten, finished or not.
    pub fn start_timing(&mut self, name: impl Into<String>) {
        let record = TimingRecord {
            started_at_ms: self.clock.now_ms(),
            ended_at_ms: None,
            duration_ms: None,
        };
        self.records.insert(name.into(), record);
    }

    // == End Timing ==
    /// Ends the measurement for `name`, computing its duration.
    ///
    /// Silent no-op when `name` was never started.
    pub fn end_timing(&mut self, name: &str) {
        if let Some(record) = self.records.get_mut(name) {
            let now = self.clock.now_ms();
            record.ended_at_ms = Some(now);
            record.duration_ms = Some(now.saturating_sub(record.started_at_ms));
        }
    }

    // == Get Timing ==
    /// Returns the record for `name`, if any.
    pub fn get_timing(&self, name: &str) -> Option<&TimingRecord> {
        self.records.get(name)
    }

    // == All Timings ==
    /// Returns every record currently held.
    pub fn all_timings(&self) -> &HashMap<String, TimingRecord> {
        &self.records
    }

    // == Clear Timings ==
    /// Removes all records.
    pub fn clear_timings(&mut self) {
        self.records.clear();
    }
}
