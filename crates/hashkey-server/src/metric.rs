use std::collections::HashMap;
use std::fmt;
use std::sync::Mutex;
use std::time::{Duration, SystemTime};

/// Endpoint a request was answered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Keys,
    Batch,
    Preflight,
    Unknown,
}

impl Route {
    pub fn as_str(self) -> &'static str {
        match self {
            Route::Keys => "keys",
            Route::Batch => "batch",
            Route::Preflight => "preflight",
            Route::Unknown => "unknown",
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

type MinuteCounts = HashMap<u64, HashMap<u16, u64>>;

/// Minute buckets older than this are dropped on the next write.
pub const RETENTION_MINUTES: u64 = 60;

/// In-memory per-minute status counts keyed by route.
#[derive(Default)]
pub struct Metrics {
    counts: Mutex<HashMap<Route, MinuteCounts>>,
}

impl Metrics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a response status using the current wall-clock time.
    pub fn record(&self, route: Route, status: u16) {
        self.record_at(route, status, SystemTime::now());
    }

    pub fn record_at(&self, route: Route, status: u16, at: SystemTime) {
        let minute = Self::minute_bucket(at);
        let mut guard = self.counts.lock().unwrap_or_else(|e| e.into_inner());
        *guard
            .entry(route)
            .or_default()
            .entry(minute)
            .or_default()
            .entry(status)
            .or_insert(0) += 1;

        let oldest = minute.saturating_sub(RETENTION_MINUTES - 1);
        for minutes in guard.values_mut() {
            minutes.retain(|&bucket, _| bucket >= oldest);
        }
    }

    /// Per-minute counts for `route`. Empty when nothing was recorded.
    pub fn snapshot(&self, route: Route) -> MinuteCounts {
        self.counts
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .get(&route)
            .cloned()
            .unwrap_or_default()
    }

    /// Counts for `route` summed over all minutes, keyed by status.
    pub fn totals(&self, route: Route) -> HashMap<u16, u64> {
        let mut totals = HashMap::new();
        for minute in self.snapshot(route).values() {
            for (status, count) in minute {
                *totals.entry(*status).or_insert(0) += *count;
            }
        }
        totals
    }

    fn minute_bucket(at: SystemTime) -> u64 {
        at.duration_since(SystemTime::UNIX_EPOCH)
            .unwrap_or(Duration::ZERO)
            .as_secs()
            / 60
    }
}
