//! Per-tick rate computation from cumulative counters.

use crate::counters::AggregateCounters;

/// Receive/transmit rate pair in bytes per tick.
///
/// Signed: a counter reset or wrap between two samples shows up as a
/// negative value and is rendered as an error by the formatter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Rates {
    pub rx: i64,
    pub tx: i64,
}

/// Keeps the previous tick's aggregate as the baseline for the next delta.
///
/// The baseline starts at zero, so the first delta equals the full
/// cumulative counter values.
#[derive(Debug, Clone, Default)]
pub struct DeltaTracker {
    previous: AggregateCounters,
}

impl DeltaTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from a known baseline instead of zero.
    pub fn with_baseline(previous: AggregateCounters) -> Self {
        Self { previous }
    }

    /// The baseline the next [`delta`](Self::delta) will subtract.
    pub fn baseline(&self) -> AggregateCounters {
        self.previous
    }

    /// Compute `current - previous` for both directions, then make
    /// `current` the new baseline.
    pub fn delta(&mut self, current: AggregateCounters) -> Rates {
        let rates = Rates {
            rx: signed_diff(current.rx, self.previous.rx),
            tx: signed_diff(current.tx, self.previous.tx),
        };
        self.previous = current;
        rates
    }
}

fn signed_diff(now: u64, before: u64) -> i64 {
    (now as i128 - before as i128).clamp(i64::MIN as i128, i64::MAX as i128) as i64
}
