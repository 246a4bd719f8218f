/// Attribute names read from the ATA SMART attribute table.
pub const REALLOCATED_SECTOR_CT: &str = "Reallocated_Sector_Ct";
pub const WEAR_LEVELING_COUNT:   &str = "Wear_Leveling_Count";
pub const POWER_ON_HOURS:        &str = "Power_On_Hours";

/// The SMART counters the health score is derived from.
///
/// An attribute the device does not report keeps its neutral default:
/// - `reallocated_sectors`: 0 (no remapped sectors)
/// - `wear_leveling_count`: 100 (no wear)
/// - `power_on_hours`:      0
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SmartAttributes {
    pub reallocated_sectors: u64,
    /// Parsed for completeness; not part of the score.
    pub wear_leveling_count: u64,
    pub power_on_hours:      u64,
}

impl Default for SmartAttributes {
    fn default() -> Self {
        Self {
            reallocated_sectors: 0,
            wear_leveling_count: 100,
            power_on_hours:      0,
        }
    }
}
