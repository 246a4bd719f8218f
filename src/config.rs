use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub general: GeneralConfig,

    #[serde(default)]
    pub telemetry: TelemetryConfig,

    #[serde(default)]
    pub volumes: VolumesConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Polling interval in seconds (overridden by --interval)
    pub interval_secs: f64,
    /// Throughput display unit: B, KB, MB or GB (overridden by --unit)
    pub unit: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TelemetryConfig {
    /// Query SMART attributes at all (--no-smart turns this off)
    pub enabled: bool,
    /// smartctl binary, looked up on PATH unless absolute
    pub smartctl_path: String,
    /// Give up on a device after this many seconds; 0 waits forever
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VolumesConfig {
    /// Mount points to hide, e.g. "/boot*" or "/mnt/scratch"
    pub exclude: Vec<String>,
}

// ── Defaults ─────────────────────────────────────────────────────────

impl Default for GeneralConfig {
    fn default() -> Self {
        Self { interval_secs: 1.0, unit: "MB".into() }
    }
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self { enabled: true, smartctl_path: "smartctl".into(), timeout_secs: 10 }
    }
}

impl TelemetryConfig {
    pub fn timeout(&self) -> Duration {
        match self.timeout_secs {
            0 => Duration::MAX,
            s => Duration::from_secs(s),
        }
    }
}

// ── Load / Save ───────────────────────────────────────────────────────

impl Config {
    pub fn load() -> Self {
        let Some(path) = Config::config_path() else {
            return Config::default();
        };
        match load_from(&path) {
            Ok(c)  => c,
            Err(e) => {
                if path.exists() {
                    tracing::warn!(path = %path.display(), error = %e, "ignoring unreadable config");
                } else {
                    // Write defaults on first run (best-effort)
                    let _ = write_defaults(&path);
                }
                Config::default()
            }
        }
    }

    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("diskpulse").join("diskpulse.toml"))
    }
}

pub fn load_from(path: &Path) -> Result<Config> {
    let text = fs::read_to_string(path)?;
    let cfg: Config = toml::from_str(&text)?;
    Ok(cfg)
}

pub fn write_defaults(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let text = toml::to_string_pretty(&Config::default())?;
    fs::write(path, format!("# diskpulse configuration\n# Generated on first run, edit freely\n\n{}", text))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn written_defaults_load_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("diskpulse.toml");
        write_defaults(&path).unwrap();
        assert_eq!(load_from(&path).unwrap(), Config::default());
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("diskpulse.toml");
        fs::write(&path, "[general]\nunit = \"gb\"\n\n[volumes]\nexclude = [\"/boot*\"]\n").unwrap();

        let cfg = load_from(&path).unwrap();
        assert_eq!(cfg.general.unit, "gb");
        assert_eq!(cfg.general.interval_secs, 1.0);
        assert_eq!(cfg.volumes.exclude, vec!["/boot*".to_string()]);
        assert_eq!(cfg.telemetry, TelemetryConfig::default());
    }

    #[test]
    fn zero_timeout_means_unbounded() {
        let t = TelemetryConfig { timeout_secs: 0, ..Default::default() };
        assert_eq!(t.timeout(), Duration::MAX);
        assert_eq!(TelemetryConfig::default().timeout(), Duration::from_secs(10));
    }

    #[test]
    fn malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("diskpulse.toml");
        fs::write(&path, "[general\ninterval_secs = ").unwrap();
        assert!(load_from(&path).is_err());
    }
}
