use serde::Serialize;

/// Cumulative read/write byte counters as of one observation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CounterSample {
    pub read_bytes:  u64,
    pub write_bytes: u64,
}

impl CounterSample {
    pub fn new(read_bytes: u64, write_bytes: u64) -> Self {
        Self { read_bytes, write_bytes }
    }
}

/// Instantaneous throughput derived from two consecutive samples.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct RateEstimate {
    pub read_bytes_per_sec:  f64,
    pub write_bytes_per_sec: f64,
}
