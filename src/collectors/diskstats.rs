use super::CounterError;
use crate::models::counters::CounterSample;

const DISKSTATS: &str = "/proc/diskstats";

/// The kernel reports sector counts in 512-byte units regardless of the
/// device's physical sector size.
const SECTOR_BYTES: u64 = 512;

/// Read /proc/diskstats and sum read/write bytes over whole disks.
pub fn read_counters() -> Result<CounterSample, CounterError> {
    let content = std::fs::read_to_string(DISKSTATS)
        .map_err(|source| CounterError::Io { path: DISKSTATS, source })?;
    parse_counters(&content).ok_or(CounterError::Empty(DISKSTATS))
}

/// Sum the sector counters of every non-partition, non-virtual device.
/// Returns None when no device line qualified.
pub fn parse_counters(content: &str) -> Option<CounterSample> {
    let mut read  = 0u64;
    let mut write = 0u64;
    let mut seen  = false;

    for line in content.lines() {
        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.len() < 14 { continue; }

        let name = fields[2];
        if name.starts_with("loop")
            || name.starts_with("ram")
            || name.starts_with("zram")
            || is_partition(name)
        {
            continue;
        }

        let sectors_read    = parse(fields[5]);
        let sectors_written = parse(fields[9]);
        read  = read .wrapping_add(sectors_read    .wrapping_mul(SECTOR_BYTES));
        write = write.wrapping_add(sectors_written.wrapping_mul(SECTOR_BYTES));
        seen = true;
    }

    seen.then(|| CounterSample::new(read, write))
}

fn parse(s: &str) -> u64 {
    s.parse().unwrap_or(0)
}

/// Returns true for partition entries like sda1, nvme0n1p1, mmcblk0p2.
fn is_partition(name: &str) -> bool {
    if name.starts_with("nvme") || name.starts_with("mmcblk") {
        return match name.rfind('p') {
            Some(i) => {
                let suffix = &name[i + 1..];
                !suffix.is_empty() && suffix.chars().all(|c| c.is_ascii_digit())
            }
            None => false,
        };
    }
    if name.starts_with("md") || name.starts_with("dm-") {
        return false;
    }
    let rest = name.trim_start_matches(|c: char| c.is_alphabetic());
    rest.len() < name.len() && !rest.is_empty() && rest.chars().all(|c| c.is_ascii_digit())
}
