pub mod diskstats;
pub mod filesystem;
pub mod smart;

use crate::models::counters::CounterSample;
use crate::models::volume::{Volume, VolumeUsage};
use std::time::Duration;
use thiserror::Error;

/// Failure to read the host-wide I/O counters. Not recovered anywhere.
#[derive(Debug, Error)]
pub enum CounterError {
    #[error("reading {path}: {source}")]
    Io { path: &'static str, source: std::io::Error },
    #[error("no block devices found in {0}")]
    Empty(&'static str),
}

/// Failure to enumerate volumes or read one volume's capacity.
#[derive(Debug, Error)]
pub enum VolumeError {
    #[error("reading mount table: {0}")]
    MountTable(#[source] std::io::Error),
    #[error("statvfs {mount}: {source}")]
    Stat { mount: String, source: nix::Error },
}

/// Reasons health telemetry could not be obtained for a device.
#[derive(Debug, Error)]
pub enum TelemetryError {
    #[error("telemetry disabled")]
    Disabled,
    #[error("{device} is not a block device path")]
    Unsupported { device: String },
    #[error("launching {tool}: {source}")]
    Spawn { tool: String, source: std::io::Error },
    #[error("{tool} exited with status {code:?}")]
    ExitStatus { tool: String, code: Option<i32> },
    #[error("{tool} did not finish within {timeout:?}")]
    Timeout { tool: String, timeout: Duration },
    #[error("malformed attribute row for {attribute}: {row:?}")]
    Parse { attribute: &'static str, row: String },
}

/// Source of host-wide counters and per-volume capacity.
pub trait MetricsProvider {
    /// Cumulative bytes read and written across all physical disks.
    fn counters(&self) -> Result<CounterSample, CounterError>;

    /// Currently mounted volumes, in mount-table order.
    fn volumes(&self) -> Result<Vec<Volume>, VolumeError>;

    /// Capacity and usage of one volume.
    fn usage(&self, volume: &Volume) -> Result<VolumeUsage, VolumeError>;
}

/// Source of raw SMART attribute output for a device.
pub trait TelemetryProvider {
    fn attributes(&self, device_id: &str) -> Result<String, TelemetryError>;
}

/// Linux host: /proc/diskstats, /proc/mounts and statvfs.
#[derive(Debug, Clone, Default)]
pub struct Host {
    /// Mount-point patterns hidden from the report.
    pub exclude: Vec<String>,
}

impl Host {
    pub fn new(exclude: Vec<String>) -> Self {
        Self { exclude }
    }
}

impl MetricsProvider for Host {
    fn counters(&self) -> Result<CounterSample, CounterError> {
        diskstats::read_counters()
    }

    fn volumes(&self) -> Result<Vec<Volume>, VolumeError> {
        filesystem::read_volumes(&self.exclude)
    }

    fn usage(&self, volume: &Volume) -> Result<VolumeUsage, VolumeError> {
        filesystem::read_usage(volume)
    }
}
