use crate::collectors::{MetricsProvider, TelemetryProvider};
use crate::input::{handle_key, Action};
use crate::models::unit::UnitSpec;
use crate::monitor::{Monitor, Snapshot};
use crate::ui::dashboard::{self, View};
use crate::ui::theme::Theme;
use anyhow::Result;
use crossterm::event::{self, Event};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Longest stretch spent blocked on terminal input before re-checking the
/// interval deadline and the shutdown flag.
const POLL_TIMEOUT: Duration = Duration::from_millis(150);

pub struct App<M, T> {
    pub theme:    Theme,
    pub unit:     UnitSpec,
    pub snapshot: Option<Snapshot>,

    monitor:       Monitor<M, T>,
    interval:      Duration,
    interval_secs: f64,

    // Set from the signal handler
    shutdown:    Arc<AtomicBool>,
    should_quit: bool,
}

impl<M: MetricsProvider, T: TelemetryProvider> App<M, T> {
    pub fn new(
        metrics: M,
        telemetry: T,
        interval_secs: f64,
        unit: UnitSpec,
        shutdown: Arc<AtomicBool>,
    ) -> Self {
        Self {
            theme:    Theme::default(),
            unit,
            snapshot: None,
            monitor:  Monitor::new(metrics, telemetry, interval_secs),
            interval: Duration::from_secs_f64(interval_secs),
            interval_secs,
            shutdown,
            should_quit: false,
        }
    }

    // ── Main loop ─────────────────────────────────────────────────────

    /// Tick, draw, then wait out the interval; repeat until asked to stop.
    /// The first tick seeds the counters and shows zero throughput.
    pub fn run<B: ratatui::backend::Backend>(
        &mut self,
        terminal: &mut ratatui::Terminal<B>,
    ) -> Result<()> {
        loop {
            self.snapshot = Some(self.monitor.tick()?);
            self.draw(terminal)?;

            self.wait_interval(terminal)?;
            if self.should_quit { break; }
        }
        tracing::info!("stopping");
        Ok(())
    }

    fn draw<B: ratatui::backend::Backend>(&self, terminal: &mut ratatui::Terminal<B>) -> Result<()> {
        let view = View { theme: &self.theme, unit: self.unit, interval_secs: self.interval_secs };
        terminal.draw(|f| dashboard::render(f, self.snapshot.as_ref(), &view))?;
        Ok(())
    }

    /// Sleep until the next tick is due, servicing keys and resizes.
    fn wait_interval<B: ratatui::backend::Backend>(
        &mut self,
        terminal: &mut ratatui::Terminal<B>,
    ) -> Result<()> {
        let deadline = Instant::now() + self.interval;
        loop {
            if self.shutdown.load(Ordering::SeqCst) {
                self.should_quit = true;
            }
            if self.should_quit { return Ok(()); }

            let Some(remaining) = deadline.checked_duration_since(Instant::now()) else {
                return Ok(());
            };
            if remaining.is_zero() { return Ok(()); }

            if event::poll(remaining.min(POLL_TIMEOUT))? {
                match event::read()? {
                    Event::Key(key) => {
                        if handle_key(key) == Action::Quit {
                            self.should_quit = true;
                        }
                    }
                    Event::Resize(_, _) => self.draw(terminal)?,
                    _ => {}
                }
            }
        }
    }
}
