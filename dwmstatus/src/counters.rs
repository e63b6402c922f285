//! Cumulative per-interface byte counters.
//!
//! Reads the kernel's `/proc/net/dev` table:
//!
//! ```text
//! Inter-|   Receive                                                |  Transmit
//!  face |bytes    packets errs drop fifo frame compressed multicast|bytes    packets ...
//!   eth0: 1234567    8901    0    0    0     0          0         0  7654321    5432 ...
//! ```
//!
//! Only lines whose name token is in the monitored set count towards the
//! aggregate. Header lines and anything else that does not parse are skipped.

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::trace;

/// Error returned when the counter table cannot be read.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("Counter table {path} unavailable: {source}")]
    Unavailable {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Sum of received/transmitted bytes over all monitored interfaces.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AggregateCounters {
    pub rx: u64,
    pub tx: u64,
}

impl AggregateCounters {
    pub fn new(rx: u64, tx: u64) -> Self {
        Self { rx, tx }
    }
}

/// One parsed line of the counter table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawSample<'a> {
    /// Device token including the trailing colon, e.g. "eth0:".
    pub device: &'a str,
    pub rx_bytes: u64,
    pub tx_bytes: u64,
}

/// Parse one table line.
///
/// The line must hold a device token followed by at least nine numeric
/// fields: field 1 is received bytes, field 9 transmitted bytes, the ones in
/// between are parsed and discarded. Returns `None` for anything else.
pub fn parse_line(line: &str) -> Option<RawSample<'_>> {
    let mut fields = line.split_whitespace();
    let device = fields.next()?;

    let mut numbers = [0u64; 9];
    for slot in &mut numbers {
        *slot = fields.next()?.parse().ok()?;
    }

    Some(RawSample {
        device,
        rx_bytes: numbers[0],
        tx_bytes: numbers[8],
    })
}

/// Aggregate the counters of all monitored devices found in `table`.
///
/// The table is split on raw bytes so a line that is not valid UTF-8 (an
/// interface name with odd bytes, say) is skipped on its own.
pub fn aggregate(table: impl AsRef<[u8]>, interfaces: &HashSet<String>) -> AggregateCounters {
    let mut total = AggregateCounters::default();

    for raw in table.as_ref().split(|b| *b == b'\n') {
        let Ok(line) = std::str::from_utf8(raw) else {
            trace!(len = raw.len(), "Skipping non UTF-8 counter line");
            continue;
        };
        let Some(sample) = parse_line(line) else {
            trace!(line = %line.trim(), "Skipping unparsable counter line");
            continue;
        };

        if interfaces.contains(sample.device) {
            total.rx = total.rx.wrapping_add(sample.rx_bytes);
            total.tx = total.tx.wrapping_add(sample.tx_bytes);
        }
    }

    total
}

/// Reads aggregate counters for a fixed set of interfaces.
#[derive(Debug, Clone)]
pub struct CounterSource {
    path: PathBuf,
    interfaces: HashSet<String>,
}

impl CounterSource {
    /// Create a source reading `path` and matching `interfaces` exactly.
    pub fn new<I, S>(path: impl Into<PathBuf>, interfaces: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            path: path.into(),
            interfaces: interfaces.into_iter().map(Into::into).collect(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn interfaces(&self) -> &HashSet<String> {
        &self.interfaces
    }

    /// Read the table and sum the monitored devices' counters.
    pub fn sample(&self) -> Result<AggregateCounters, SourceError> {
        let table = std::fs::read(&self.path).map_err(|e| SourceError::Unavailable {
            path: self.path.display().to_string(),
            source: e,
        })?;

        Ok(aggregate(&table, &self.interfaces))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TABLE: &str = "\
Inter-|   Receive                                                |  Transmit
 face |bytes    packets errs drop fifo frame compressed multicast|bytes    packets errs drop fifo colls carrier compressed
    lo:  987654    1200    0    0    0     0          0         0   987654    1200    0    0    0     0       0          0
  eth0: 1000000    8901    0    0    0     0          0         0  2000000    5432    0    0    0     0       0          0
 wlan0:     500      10    0    0    0     0          0         0      700       9    0    0    0     0       0          0
docker0:    3000      20    0    0    0     0          0         0     4000      30    0    0    0     0       0          0
";

    fn monitored(names: &[&str]) -> HashSet<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_parse_line() {
        let sample = parse_line("  eth0: 1000 1 2 3 4 5 6 7 2000 8 0 0 0 0 0 0").unwrap();
        assert_eq!(sample.device, "eth0:");
        assert_eq!(sample.rx_bytes, 1000);
        assert_eq!(sample.tx_bytes, 2000);
    }

    #[test]
    fn test_parse_line_rejects_headers() {
        assert!(parse_line("Inter-|   Receive   |  Transmit").is_none());
        assert!(parse_line(" face |bytes    packets errs drop").is_none());
        assert!(parse_line("").is_none());
    }

    #[test]
    fn test_parse_line_rejects_short_or_garbage() {
        assert!(parse_line("eth0: 1 2 3").is_none());
        assert!(parse_line("eth0: 1 2 3 4 x 6 7 8 9 10").is_none());
        assert!(parse_line("eth0: -1 2 3 4 5 6 7 8 9 10").is_none());
    }

    #[test]
    fn test_aggregate_sums_monitored_only() {
        let total = aggregate(TABLE, &monitored(&["eth0:", "wlan0:"]));
        assert_eq!(total, AggregateCounters::new(1_000_500, 2_000_700));
    }

    #[test]
    fn test_aggregate_exact_match() {
        // "eth" must not match "eth0:", and names need the colon
        let total = aggregate(TABLE, &monitored(&["eth", "eth0", "docker"]));
        assert_eq!(total, AggregateCounters::default());
    }

    #[test]
    fn test_aggregate_ignores_malformed_lines() {
        let noisy = format!(
            "garbage line\n{}eth0: not numbers at all here 1 2 3 4 5 6\n\n  eth0: 12\n",
            TABLE
        );
        let interfaces = monitored(&["eth0:", "wlan0:"]);
        assert_eq!(aggregate(&noisy, &interfaces), aggregate(TABLE, &interfaces));
    }

    #[test]
    fn test_sample_skips_non_utf8_line() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dev");
        let mut table = b"  eth0: 1000 1 0 0 0 0 0 0 2000 1 0 0 0 0 0 0\n".to_vec();
        table.extend_from_slice(b" w\xfflan: 5 1 0 0 0 0 0 0 7 1 0 0 0 0 0 0\n");
        table.extend_from_slice(b" wlan0: 30 1 0 0 0 0 0 0 40 1 0 0 0 0 0 0\n");
        std::fs::write(&path, table).unwrap();

        let source = CounterSource::new(&path, ["eth0:", "wlan0:"]);
        assert_eq!(
            source.sample().unwrap(),
            AggregateCounters::new(1030, 2040)
        );
    }

    #[test]
    fn test_sample_unavailable() {
        let source = CounterSource::new("/nonexistent/net/dev", ["eth0:"]);
        assert!(matches!(
            source.sample(),
            Err(SourceError::Unavailable { .. })
        ));
    }

    #[test]
    fn test_sample_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dev");
        std::fs::write(&path, TABLE).unwrap();

        let source = CounterSource::new(&path, ["eth0:"]);
        assert_eq!(source.path(), path.as_path());
        assert_eq!(
            source.sample().unwrap(),
            AggregateCounters::new(1_000_000, 2_000_000)
        );
    }
}
