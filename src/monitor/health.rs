use crate::collectors::{smart, MetricsProvider, TelemetryError, TelemetryProvider, VolumeError};
use crate::models::volume::{Health, VolumeReport};
use crate::util::health_score::health_score;
use tracing::debug;

/// Pairs each visible volume's capacity with a SMART-derived health score.
#[derive(Debug, Clone)]
pub struct HealthAggregator<T> {
    telemetry: T,
}

impl<T: TelemetryProvider> HealthAggregator<T> {
    pub fn new(telemetry: T) -> Self {
        Self { telemetry }
    }

    /// Build a fresh report, in the order the provider lists volumes.
    ///
    /// A volume whose capacity cannot be read is left out entirely. A
    /// volume whose telemetry cannot be read is kept with `Health::Unknown`.
    /// Only a failure to enumerate volumes at all is returned.
    pub fn report<M: MetricsProvider>(&self, metrics: &M) -> Result<Vec<VolumeReport>, VolumeError> {
        let volumes = metrics.volumes()?;
        let mut out = Vec::with_capacity(volumes.len());

        for volume in &volumes {
            let usage = match metrics.usage(volume) {
                Ok(u)  => u,
                Err(e) => {
                    debug!(device = %volume.device_id, mount = %volume.mount_path, error = %e, "dropping volume");
                    continue;
                }
            };

            let health = match self.health(&volume.device_id) {
                Ok(h)  => h,
                Err(TelemetryError::Disabled) => Health::Unknown,
                Err(e) => {
                    debug!(device = %volume.device_id, error = %e, "health unavailable");
                    Health::Unknown
                }
            };

            out.push(VolumeReport::new(volume, usage, health));
        }

        Ok(out)
    }

    fn health(&self, device_id: &str) -> Result<Health, TelemetryError> {
        let raw   = self.telemetry.attributes(device_id)?;
        let attrs = smart::parse_attributes(&raw)?;
        Ok(Health::Score(health_score(&attrs)))
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::collectors::CounterError;
    use crate::models::counters::CounterSample;
    use crate::models::volume::{Volume, VolumeUsage};
    use std::cell::Cell;
    use std::collections::HashMap;

    /// In-memory host: volumes whose mount is in `broken` fail statvfs.
    #[derive(Default)]
    pub struct FakeHost {
        pub counters:  Vec<CounterSample>,
        pub calls:     Cell<usize>,
        pub volumes:   Vec<Volume>,
        pub broken:    Vec<String>,
        pub no_mounts: bool,
    }

    impl MetricsProvider for FakeHost {
        fn counters(&self) -> Result<CounterSample, CounterError> {
            let i = self.calls.get();
            self.calls.set(i + 1);
            self.counters.get(i).copied().ok_or(CounterError::Empty("fake"))
        }

        fn volumes(&self) -> Result<Vec<Volume>, VolumeError> {
            if self.no_mounts {
                return Err(VolumeError::MountTable(std::io::Error::from(std::io::ErrorKind::NotFound)));
            }
            Ok(self.volumes.clone())
        }

        fn usage(&self, volume: &Volume) -> Result<VolumeUsage, VolumeError> {
            if self.broken.contains(&volume.mount_path) {
                return Err(VolumeError::Stat {
                    mount: volume.mount_path.clone(),
                    source: nix::Error::EACCES,
                });
            }
            Ok(VolumeUsage::from_blocks(4096, 1000, 400, 300))
        }
    }

    /// Canned `smartctl -A` output per device; anything else fails.
    #[derive(Default)]
    pub struct FakeSmart(pub HashMap<String, String>);

    impl TelemetryProvider for FakeSmart {
        fn attributes(&self, device_id: &str) -> Result<String, TelemetryError> {
            self.0.get(device_id).cloned().ok_or_else(|| TelemetryError::ExitStatus {
                tool: "smartctl".into(),
                code: Some(2),
            })
        }
    }

    pub fn table(reallocated: &str, hours: &str) -> String {
        format!(
            "ID# ATTRIBUTE_NAME FLAG VALUE WORST THRESH TYPE UPDATED WHEN_FAILED RAW_VALUE\n\
             \x20 5 Reallocated_Sector_Ct 0x0033 100 100 010 Pre-fail Always - {}\n\
             \x20 9 Power_On_Hours 0x0032 094 094 000 Old_age Always - {}\n",
            reallocated, hours
        )
    }

    fn host(mounts: &[(&str, &str)]) -> FakeHost {
        FakeHost {
            volumes: mounts.iter().map(|(d, m)| Volume::new(d, m)).collect(),
            ..Default::default()
        }
    }

    #[test]
    fn scores_volumes_with_telemetry() {
        let h = host(&[("/dev/sda1", "/")]);
        let smart = FakeSmart(HashMap::from([("/dev/sda1".to_string(), table("50", "5000"))]));
        let reports = HealthAggregator::new(smart).report(&h).unwrap();
        assert_eq!(reports.len(), 1);
        assert_eq!(reports[0].health, Health::Score(90.0));
        assert_eq!(reports[0].health.label(), "90.00%");
    }

    #[test]
    fn telemetry_failure_keeps_volume_as_unknown() {
        let h = host(&[("/dev/sdb1", "/data")]);
        let reports = HealthAggregator::new(FakeSmart::default()).report(&h).unwrap();
        assert_eq!(reports.len(), 1);
        let r = &reports[0];
        assert_eq!(r.health, Health::Unknown);
        assert_eq!(r.total_bytes, 4_096_000);
        assert_eq!(r.used_bytes, 600 * 4096);
        assert_eq!(r.free_bytes, 300 * 4096);
    }

    #[test]
    fn unparsable_telemetry_is_unknown() {
        let h = host(&[("/dev/sda1", "/")]);
        let smart = FakeSmart(HashMap::from([("/dev/sda1".to_string(), table("50", "12h+3m"))]));
        let reports = HealthAggregator::new(smart).report(&h).unwrap();
        assert_eq!(reports[0].health, Health::Unknown);
    }

    #[test]
    fn failed_capacity_drops_only_that_volume() {
        let mut h = host(&[("/dev/sda1", "/"), ("/dev/sda2", "/home"), ("/dev/sdc1", "/media/usb")]);
        h.broken = vec!["/home".to_string()];
        let reports = HealthAggregator::new(FakeSmart::default()).report(&h).unwrap();
        assert_eq!(reports.len(), 2);
        let mounts: Vec<&str> = reports.iter().map(|r| r.mount_path.as_str()).collect();
        assert_eq!(mounts, vec!["/", "/media/usb"]);
    }

    #[test]
    fn preserves_provider_order() {
        let h = host(&[("/dev/sdz1", "/z"), ("/dev/sda1", "/a"), ("/dev/sdm1", "/m")]);
        let reports = HealthAggregator::new(FakeSmart::default()).report(&h).unwrap();
        let devs: Vec<&str> = reports.iter().map(|r| r.device_id.as_str()).collect();
        assert_eq!(devs, vec!["/dev/sdz1", "/dev/sda1", "/dev/sdm1"]);
    }

    #[test]
    fn enumeration_failure_is_returned() {
        let h = FakeHost { no_mounts: true, ..Default::default() };
        assert!(HealthAggregator::new(FakeSmart::default()).report(&h).is_err());
    }
}
