use serde::Serialize;

/// One mounted volume as enumerated from the mount table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Volume {
    pub device_id:  String,
    pub mount_path: String,
}

impl Volume {
    pub fn new(device_id: &str, mount_path: &str) -> Self {
        Self {
            device_id:  device_id.to_string(),
            mount_path: mount_path.to_string(),
        }
    }
}

/// Capacity figures for one volume. `used_bytes + free_bytes` may be
/// less than `total_bytes`: blocks reserved for root count as neither.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct VolumeUsage {
    pub total_bytes:  u64,
    pub used_bytes:   u64,
    pub free_bytes:   u64,
    pub used_percent: f64,
}

impl VolumeUsage {
    /// Build usage from raw statvfs block counts.
    ///
    /// `used` counts everything not free to root, `free` is what an
    /// unprivileged user can still allocate, and the percentage is taken
    /// against `used + free` (rounded to one decimal) so reserved blocks
    /// do not hide a full disk.
    pub fn from_blocks(fragment_size: u64, blocks: u64, blocks_free: u64, blocks_avail: u64) -> Self {
        let total_bytes = blocks.saturating_mul(fragment_size);
        let root_free   = blocks_free.saturating_mul(fragment_size);
        let free_bytes  = blocks_avail.saturating_mul(fragment_size);
        let used_bytes  = total_bytes.saturating_sub(root_free);

        let denom = used_bytes as f64 + free_bytes as f64;
        let used_percent = if denom > 0.0 {
            (used_bytes as f64 / denom * 1000.0).round() / 10.0
        } else {
            0.0
        };

        Self { total_bytes, used_bytes, free_bytes, used_percent }
    }
}

/// Derived device health.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Health {
    /// Always within `[0, 100]`.
    Score(f64),
    Unknown,
}

impl Health {
    pub fn label(&self) -> String {
        match self {
            Health::Score(s) => format!("{:.2}%", s),
            Health::Unknown  => "Unknown".to_string(),
        }
    }
}

/// One row of the per-tick health report.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VolumeReport {
    pub device_id:    String,
    pub mount_path:   String,
    pub total_bytes:  u64,
    pub used_bytes:   u64,
    pub free_bytes:   u64,
    pub used_percent: f64,
    pub health:       Health,
}

impl VolumeReport {
    pub fn new(volume: &Volume, usage: VolumeUsage, health: Health) -> Self {
        Self {
            device_id:    volume.device_id.clone(),
            mount_path:   volume.mount_path.clone(),
            total_bytes:  usage.total_bytes,
            used_bytes:   usage.used_bytes,
            free_bytes:   usage.free_bytes,
            used_percent: usage.used_percent,
            health,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reserved_blocks_are_neither_used_nor_free() {
        // 1000 blocks, 300 free to root, 250 free to users.
        let u = VolumeUsage::from_blocks(4096, 1000, 300, 250);
        assert_eq!(u.total_bytes, 4_096_000);
        assert_eq!(u.used_bytes, 700 * 4096);
        assert_eq!(u.free_bytes, 250 * 4096);
        assert!(u.used_bytes + u.free_bytes < u.total_bytes);
        // 700 / 950 = 73.68..% -> 73.7
        assert!((u.used_percent - 73.7).abs() < 1e-9);
    }

    #[test]
    fn empty_filesystem_has_zero_percent() {
        let u = VolumeUsage::from_blocks(4096, 0, 0, 0);
        assert_eq!(u.used_percent, 0.0);
    }

    #[test]
    fn health_labels() {
        assert_eq!(Health::Score(90.0).label(), "90.00%");
        assert_eq!(Health::Unknown.label(), "Unknown");
    }

    #[test]
    fn unknown_health_serializes_as_null() {
        assert_eq!(serde_json::to_string(&Health::Unknown).unwrap(), "null");
        assert_eq!(serde_json::to_string(&Health::Score(42.5)).unwrap(), "42.5");
    }
}
