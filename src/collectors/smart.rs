use super::{TelemetryError, TelemetryProvider};
use crate::models::smart::{
    SmartAttributes, POWER_ON_HOURS, REALLOCATED_SECTOR_CT, WEAR_LEVELING_COUNT,
};
use std::io::Read;
use std::process::{Command, Stdio};
use std::thread;
use std::time::{Duration, Instant};

/// Column of RAW_VALUE in a `smartctl -A` attribute row:
/// `ID# ATTRIBUTE_NAME FLAG VALUE WORST THRESH TYPE UPDATED WHEN_FAILED RAW_VALUE`
const RAW_VALUE_COL: usize = 9;

/// Fetches attribute tables by running `smartctl -A <device>`.
#[derive(Debug, Clone)]
pub struct Smartctl {
    pub program: String,
    pub timeout: Duration,
    pub enabled: bool,
}

impl Smartctl {
    pub fn new(program: &str, timeout: Duration, enabled: bool) -> Self {
        Self { program: program.to_string(), timeout, enabled }
    }
}

impl TelemetryProvider for Smartctl {
    fn attributes(&self, device_id: &str) -> Result<String, TelemetryError> {
        if !self.enabled {
            return Err(TelemetryError::Disabled);
        }
        if !device_id.starts_with("/dev/") {
            return Err(TelemetryError::Unsupported { device: device_id.to_string() });
        }
        run_with_timeout(&self.program, &["-A", device_id], self.timeout)
    }
}

/// How often a running child is checked for exit.
const WAIT_STEP: Duration = Duration::from_millis(20);

/// Run `program args..`, returning stdout if it exits 0 within `timeout`.
/// A child that overruns is killed.
fn run_with_timeout(program: &str, args: &[&str], timeout: Duration) -> Result<String, TelemetryError> {
    let mut child = Command::new(program)
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .spawn()
        .map_err(|source| TelemetryError::Spawn { tool: program.to_string(), source })?;

    // Drain stdout on a side thread so a chatty child never blocks on a full pipe.
    let stdout = child.stdout.take();
    let reader = thread::spawn(move || {
        let mut buf = String::new();
        if let Some(mut out) = stdout {
            let _ = out.read_to_string(&mut buf);
        }
        buf
    });

    let deadline = Instant::now().checked_add(timeout);
    let status = loop {
        match child.try_wait() {
            Ok(Some(status)) => break status,
            Ok(None) => {}
            Err(source) => return Err(TelemetryError::Spawn { tool: program.to_string(), source }),
        }
        if deadline.is_some_and(|d| Instant::now() >= d) {
            let _ = child.kill();
            let _ = child.wait();
            return Err(TelemetryError::Timeout { tool: program.to_string(), timeout });
        }
        thread::sleep(WAIT_STEP);
    };

    let out = reader.join().unwrap_or_default();
    if status.success() {
        Ok(out)
    } else {
        Err(TelemetryError::ExitStatus { tool: program.to_string(), code: status.code() })
    }
}

/// Pull the scored attributes out of a `smartctl -A` attribute table.
///
/// Rows are tokenized on whitespace and matched on the ATTRIBUTE_NAME
/// column; the RAW_VALUE column must be a plain integer. Attributes the
/// table does not list keep the neutral defaults of `SmartAttributes`.
/// A matching row that is too short or whose raw value is not an integer
/// is an error: the whole reading is untrustworthy.
pub fn parse_attributes(text: &str) -> Result<SmartAttributes, TelemetryError> {
    let mut attrs = SmartAttributes::default();

    for row in text.lines() {
        let cols: Vec<&str> = row.split_whitespace().collect();
        let Some(&name) = cols.get(1) else { continue };

        let (attribute, slot) = match name {
            REALLOCATED_SECTOR_CT => (REALLOCATED_SECTOR_CT, &mut attrs.reallocated_sectors),
            WEAR_LEVELING_COUNT   => (WEAR_LEVELING_COUNT,   &mut attrs.wear_leveling_count),
            POWER_ON_HOURS        => (POWER_ON_HOURS,        &mut attrs.power_on_hours),
            _ => continue,
        };

        *slot = cols
            .get(RAW_VALUE_COL)
            .and_then(|raw| raw.parse::<u64>().ok())
            .ok_or_else(|| TelemetryError::Parse { attribute, row: row.trim().to_string() })?;
    }

    Ok(attrs)
}
