mod app;
mod collectors;
mod config;
mod input;
mod models;
mod monitor;
mod ui;
mod util;

use anyhow::{anyhow, Context, Result};
use app::App;
use clap::Parser;
use collectors::smart::Smartctl;
use collectors::Host;
use config::Config;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use models::unit::UnitSpec;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::fs::{self, File};
use std::io;
use std::panic;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tracing_subscriber::fmt::time::FormatTime;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "diskpulse", about = "Monitor real-time disk read/write speed and volume health", version)]
struct Cli {
    /// Interval (in seconds) between updates [default: 1.0]
    #[arg(short, long, value_parser = parse_interval)]
    interval: Option<f64>,

    /// Unit for the read/write speed lines: B, KB, MB or GB [default: MB]
    #[arg(short, long)]
    unit: Option<String>,

    /// Disable SMART health collection
    #[arg(long)]
    no_smart: bool,

    /// Print one JSON snapshot (after one interval) and exit
    #[arg(long)]
    json: bool,

    /// Print config file path and current values, then exit
    #[arg(long)]
    config: bool,
}

fn parse_interval(s: &str) -> Result<f64, String> {
    let v: f64 = s.parse().map_err(|_| format!("`{}` is not a number", s))?;
    check_interval(v)
}

fn check_interval(v: f64) -> Result<f64, String> {
    if !(v > 0.0) || Duration::try_from_secs_f64(v).is_err() {
        return Err(format!("interval must be a positive number of seconds, got {}", v));
    }
    Ok(v)
}

/// Effective settings after layering CLI flags over the config file.
struct Settings {
    interval_secs: f64,
    unit:          UnitSpec,
    smartctl:      Smartctl,
    exclude:       Vec<String>,
}

impl Settings {
    fn resolve(cli: &Cli, cfg: &Config) -> Result<Self> {
        let interval_secs = match cli.interval {
            Some(v) => v,
            None => check_interval(cfg.general.interval_secs)
                .map_err(|e| anyhow!("general.interval_secs in config: {}", e))?,
        };
        let unit = UnitSpec::from_name(cli.unit.as_deref().unwrap_or(&cfg.general.unit));
        let smartctl = Smartctl::new(
            &cfg.telemetry.smartctl_path,
            cfg.telemetry.timeout(),
            cfg.telemetry.enabled && !cli.no_smart,
        );
        Ok(Self { interval_secs, unit, smartctl, exclude: cfg.volumes.exclude.clone() })
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let log_path = init_logging();

    if cli.config {
        return run_print_config(log_path);
    }

    let cfg = Config::load();
    let settings = Settings::resolve(&cli, &cfg)?;

    let shutdown = Arc::new(AtomicBool::new(false));
    {
        let flag = shutdown.clone();
        ctrlc::set_handler(move || flag.store(true, Ordering::SeqCst))
            .context("installing interrupt handler")?;
    }

    if cli.json {
        return run_json_snapshot(settings, &shutdown);
    }

    println!("Starting disk monitor. Press Ctrl+C to stop.");
    tracing::info!(
        interval = settings.interval_secs,
        unit = %settings.unit,
        smart = settings.smartctl.enabled,
        "starting"
    );

    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |info| {
        let _ = restore_terminal();
        original_hook(info);
    }));

    let result = run(settings, shutdown);
    restore_terminal()?;
    if let Err(e) = &result {
        tracing::error!(error = %format!("{:#}", e), "monitor failed");
    }
    result?;

    println!("Stopping disk monitor...");
    Ok(())
}

fn run(settings: Settings, shutdown: Arc<AtomicBool>) -> Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(stdout);
    let mut term = Terminal::new(backend)?;

    let mut app = App::new(
        Host::new(settings.exclude),
        settings.smartctl,
        settings.interval_secs,
        settings.unit,
        shutdown,
    );
    app.run(&mut term)
}

fn restore_terminal() -> Result<()> {
    disable_raw_mode()?;
    execute!(io::stdout(), LeaveAlternateScreen)?;
    Ok(())
}

fn run_json_snapshot(settings: Settings, shutdown: &AtomicBool) -> Result<()> {
    use monitor::Monitor;

    let mut monitor = Monitor::new(
        Host::new(settings.exclude),
        settings.smartctl,
        settings.interval_secs,
    );
    // The first tick only seeds the counters.
    monitor.tick()?;
    std::thread::sleep(Duration::from_secs_f64(settings.interval_secs));
    if shutdown.load(Ordering::SeqCst) {
        return Ok(());
    }
    let snapshot = monitor.tick()?;
    println!("{}", serde_json::to_string_pretty(&snapshot)?);
    Ok(())
}

fn run_print_config(log_path: Option<PathBuf>) -> Result<()> {
    let cfg = Config::load();
    let path = Config::config_path()
        .map(|p| p.to_string_lossy().into_owned())
        .unwrap_or_else(|| "(unknown)".to_string());
    let log = log_path
        .map(|p| p.to_string_lossy().into_owned())
        .unwrap_or_else(|| "(disabled)".to_string());
    println!("Config: {}", path);
    println!("Log:    {}", log);
    println!();
    println!("[general]");
    println!("  interval_secs = {}", cfg.general.interval_secs);
    println!("  unit          = {} ({})", cfg.general.unit, UnitSpec::from_name(&cfg.general.unit));
    println!();
    println!("[telemetry]");
    println!("  enabled       = {}", cfg.telemetry.enabled);
    println!("  smartctl_path = {}", cfg.telemetry.smartctl_path);
    println!("  timeout_secs  = {}", cfg.telemetry.timeout_secs);
    println!();
    println!("[volumes]");
    println!("  exclude = {:?}", cfg.volumes.exclude);
    Ok(())
}

// ── Logging ───────────────────────────────────────────────────────────

struct LocalTimer;

impl FormatTime for LocalTimer {
    fn format_time(&self, w: &mut tracing_subscriber::fmt::format::Writer<'_>) -> std::fmt::Result {
        write!(w, "{}", chrono::Local::now().format("%Y-%m-%dT%H:%M:%S%.3f%:z"))
    }
}

fn log_path() -> Option<PathBuf> {
    dirs::data_local_dir().map(|p| p.join("diskpulse").join("diskpulse.log"))
}

/// Log to a file; the terminal belongs to the dashboard. Returns the log
/// path, or None when no log file could be opened.
fn init_logging() -> Option<PathBuf> {
    let path = log_path()?;
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).ok()?;
    }
    let file = File::options().create(true).append(true).open(&path).ok()?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_timer(LocalTimer)
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .try_init()
        .ok()?;
    Some(path)
}
