use crate::models::smart::SmartAttributes;
use crate::models::volume::Health;
use crate::ui::theme::Theme;
use ratatui::style::Style;

/// Compute a 0-100 health score from SMART counters.
///
/// One point per ten reallocated sectors and one per thousand power-on
/// hours is deducted from 100. Wear leveling does not contribute.
pub fn health_score(attrs: &SmartAttributes) -> f64 {
    let penalty = attrs.reallocated_sectors as f64 / 10.0 + attrs.power_on_hours as f64 / 1000.0;
    (100.0 - penalty).clamp(0.0, 100.0)
}

/// Color style for a health cell.
pub fn health_style(health: &Health, theme: &Theme) -> Style {
    match health {
        Health::Score(s) if *s >= 80.0 => theme.ok,
        Health::Score(s) if *s >= 50.0 => theme.warn,
        Health::Score(_)               => theme.crit,
        Health::Unknown                => theme.text_dim,
    }
}
