use crate::models::counters::{CounterSample, RateEstimate};

/// Turns successive cumulative counter samples into per-second rates.
///
/// Rates are computed against the configured polling interval rather than
/// measured wall-clock time. A counter that goes backwards (device removed,
/// driver reset, wraparound) produces a negative rate, which is reported
/// as-is.
#[derive(Debug, Clone)]
pub struct RateEstimator {
    interval_secs: f64,
    previous:      Option<CounterSample>,
}

impl RateEstimator {
    pub fn new(interval_secs: f64) -> Self {
        Self { interval_secs, previous: None }
    }

    /// Record `now` and return the rate since the previous sample.
    /// The first call only seeds the estimator and reports zero.
    pub fn sample(&mut self, now: CounterSample) -> RateEstimate {
        let rate = match self.previous {
            None => RateEstimate::default(),
            Some(prev) => RateEstimate {
                read_bytes_per_sec:  per_sec(prev.read_bytes,  now.read_bytes,  self.interval_secs),
                write_bytes_per_sec: per_sec(prev.write_bytes, now.write_bytes, self.interval_secs),
            },
        };
        self.previous = Some(now);
        rate
    }
}

fn per_sec(prev: u64, curr: u64, interval_secs: f64) -> f64 {
    (curr as i128 - prev as i128) as f64 / interval_secs
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_sample_is_zero() {
        let mut est = RateEstimator::new(1.0);
        let r = est.sample(CounterSample::new(u64::MAX / 2, 123_456_789));
        assert_eq!(r, RateEstimate { read_bytes_per_sec: 0.0, write_bytes_per_sec: 0.0 });
    }

    #[test]
    fn delta_over_configured_interval() {
        let mut est = RateEstimator::new(2.0);
        est.sample(CounterSample::new(1000, 2000));
        let r = est.sample(CounterSample::new(3000, 2000));
        assert_eq!(r.read_bytes_per_sec, 1000.0);
        assert_eq!(r.write_bytes_per_sec, 0.0);
    }

    #[test]
    fn channels_are_independent_and_previous_advances() {
        let mut est = RateEstimator::new(0.5);
        est.sample(CounterSample::new(0, 0));
        let r1 = est.sample(CounterSample::new(512, 4096));
        assert_eq!(r1.read_bytes_per_sec, 1024.0);
        assert_eq!(r1.write_bytes_per_sec, 8192.0);

        let r2 = est.sample(CounterSample::new(512, 5120));
        assert_eq!(r2.read_bytes_per_sec, 0.0);
        assert_eq!(r2.write_bytes_per_sec, 2048.0);
    }

    #[test]
    fn counter_reset_yields_negative_rate() {
        let mut est = RateEstimator::new(1.0);
        est.sample(CounterSample::new(10_000, 10_000));
        let r = est.sample(CounterSample::new(4_000, 10_000));
        assert_eq!(r.read_bytes_per_sec, -6000.0);
    }

    #[test]
    fn large_counters_keep_precision() {
        let base = 1u64 << 60;
        let mut est = RateEstimator::new(1.0);
        est.sample(CounterSample::new(base, base));
        let r = est.sample(CounterSample::new(base + 1536, base + 3));
        assert_eq!(r.read_bytes_per_sec, 1536.0);
        assert_eq!(r.write_bytes_per_sec, 3.0);
    }

    #[test]
    fn non_decreasing_pairs_match_formula() {
        let cases = [(0u64, 0u64, 1.0f64), (7, 7_000_007, 3.0), (1 << 40, (1 << 40) + 999, 0.25)];
        for (prev, curr, interval) in cases {
            let mut est = RateEstimator::new(interval);
            est.sample(CounterSample::new(prev, 0));
            let r = est.sample(CounterSample::new(curr, 0));
            let expected = (curr - prev) as f64 / interval;
            assert!((r.read_bytes_per_sec - expected).abs() <= expected.abs() * 1e-12);
        }
    }
}
