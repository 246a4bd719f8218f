use crate::models::unit::UnitSpec;

const UNITS: [&str; 5] = ["B", "KB", "MB", "GB", "TB"];

/// Format a byte quantity adaptively: "1023.00 B", "1.00 KB", "2.50 MB".
/// Anything past terabytes stays in TB.
pub fn fmt_bytes(bytes: f64) -> String {
    let mut value = bytes;
    let mut unit  = 0;
    while value.abs() >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    format!("{:.2} {}", value, UNITS[unit])
}

/// Format a rate in a fixed unit: "12.50 MB/s"
pub fn fmt_rate(bytes_per_sec: f64, unit: UnitSpec) -> String {
    format!("{:.2} {}/s", bytes_per_sec / unit.divisor(), unit.label())
}

/// Format a percentage with two decimals: "84.50"
pub fn fmt_pct(pct: f64) -> String {
    format!("{:.2}", pct)
}
