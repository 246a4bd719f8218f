use ratatui::style::{Color, Modifier, Style};

#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    pub border:      Style,
    pub title:       Style,
    pub text:        Style,
    pub text_dim:    Style,
    pub header:      Style,
    pub ok:          Style,
    pub warn:        Style,
    pub crit:        Style,
    pub read:        Style,
    pub write:       Style,
    pub footer_bg:   Style,
    pub footer_key:  Style,
    pub footer_text: Style,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            border:      Style::default().fg(Color::DarkGray),
            title:       Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            text:        Style::default().fg(Color::White),
            text_dim:    Style::default().fg(Color::DarkGray),
            header:      Style::default().fg(Color::Black).bg(Color::Blue).add_modifier(Modifier::BOLD),
            ok:          Style::default().fg(Color::Green),
            warn:        Style::default().fg(Color::Yellow),
            crit:        Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            read:        Style::default().fg(Color::Cyan),
            write:       Style::default().fg(Color::Yellow),
            footer_bg:   Style::default().bg(Color::DarkGray).fg(Color::White),
            footer_key:  Style::default().bg(Color::DarkGray).fg(Color::Cyan).add_modifier(Modifier::BOLD),
            footer_text: Style::default().bg(Color::DarkGray).fg(Color::Gray),
        }
    }
}

impl Theme {
    /// Color for a filesystem usage percentage.
    pub fn usage_style(&self, pct: f64) -> Style {
        if pct >= 95.0 { self.crit }
        else if pct >= 85.0 { self.warn }
        else { self.text }
    }
}
