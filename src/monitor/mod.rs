pub mod health;
pub mod rate;

use crate::collectors::{MetricsProvider, TelemetryProvider};
use crate::models::counters::RateEstimate;
use crate::models::volume::VolumeReport;
use anyhow::{Context, Result};
use chrono::{DateTime, Local};
use health::HealthAggregator;
use rate::RateEstimator;
use serde::Serialize;

/// Everything produced by one tick.
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot {
    pub taken_at: DateTime<Local>,
    pub rates:    RateEstimate,
    pub volumes:  Vec<VolumeReport>,
}

/// One host's sampling pipeline: counters into rates, volumes into
/// health rows.
pub struct Monitor<M, T> {
    metrics:    M,
    estimator:  RateEstimator,
    aggregator: HealthAggregator<T>,
}

impl<M: MetricsProvider, T: TelemetryProvider> Monitor<M, T> {
    pub fn new(metrics: M, telemetry: T, interval_secs: f64) -> Self {
        Self {
            metrics,
            estimator:  RateEstimator::new(interval_secs),
            aggregator: HealthAggregator::new(telemetry),
        }
    }

    /// Sample the I/O counters and report every volume.
    /// Counter failures are fatal to the caller.
    pub fn tick(&mut self) -> Result<Snapshot> {
        let counters = self.metrics.counters().context("reading disk I/O counters")?;
        let rates    = self.estimator.sample(counters);
        let volumes  = self.aggregator.report(&self.metrics).context("listing volumes")?;
        tracing::trace!(read = rates.read_bytes_per_sec, write = rates.write_bytes_per_sec, volumes = volumes.len(), "tick");
        Ok(Snapshot { taken_at: Local::now(), rates, volumes })
    }
}
