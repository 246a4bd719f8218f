use crate::models::unit::UnitSpec;
use crate::models::volume::VolumeReport;
use crate::monitor::Snapshot;
use crate::ui::theme::Theme;
use crate::util::health_score::health_style;
use crate::util::human::{fmt_bytes, fmt_pct, fmt_rate};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
    Frame,
};

pub const COLUMNS: [&str; 6] = ["Device", "Total", "Used", "Free", "Usage(%)", "Health"];

/// What the dashboard needs besides the latest snapshot.
pub struct View<'a> {
    pub theme:         &'a Theme,
    pub unit:          UnitSpec,
    pub interval_secs: f64,
}

/// Display strings for one volume, in `COLUMNS` order.
pub fn volume_cells(v: &VolumeReport) -> [String; 6] {
    [
        v.device_id.clone(),
        fmt_bytes(v.total_bytes as f64),
        fmt_bytes(v.used_bytes as f64),
        fmt_bytes(v.free_bytes as f64),
        fmt_pct(v.used_percent),
        v.health.label(),
    ]
}

pub fn render(f: &mut Frame, snapshot: Option<&Snapshot>, view: &View) {
    let theme = view.theme;
    let root = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),   // header
            Constraint::Length(4),   // throughput
            Constraint::Min(3),      // volumes
            Constraint::Length(1),   // footer
        ])
        .split(f.area());

    let stamp = snapshot
        .map(|s| s.taken_at.format("%H:%M:%S").to_string())
        .unwrap_or_else(|| "--:--:--".to_string());
    let title = format!(" diskpulse   {}   every {}s", stamp, view.interval_secs);
    f.render_widget(
        Paragraph::new(Line::from(Span::styled(title, theme.title))).style(theme.header),
        root[0],
    );

    render_throughput(f, root[1], snapshot, view);
    render_volumes(f, root[2], snapshot.map(|s| s.volumes.as_slice()).unwrap_or(&[]), theme);
    render_footer(f, root[3], theme);
}

fn render_throughput(f: &mut Frame, area: Rect, snapshot: Option<&Snapshot>, view: &View) {
    let theme = view.theme;
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.border)
        .title(Span::styled("Disk I/O", theme.title));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let (read, write) = snapshot
        .map(|s| (s.rates.read_bytes_per_sec, s.rates.write_bytes_per_sec))
        .unwrap_or((0.0, 0.0));

    let lines = vec![
        Line::from(vec![
            Span::styled("Disk Read Speed:  ", theme.read),
            Span::styled(fmt_rate(read, view.unit), theme.text),
        ]),
        Line::from(vec![
            Span::styled("Disk Write Speed: ", theme.write),
            Span::styled(fmt_rate(write, view.unit), theme.text),
        ]),
    ];
    f.render_widget(Paragraph::new(lines), inner);
}

fn render_volumes(f: &mut Frame, area: Rect, volumes: &[VolumeReport], theme: &Theme) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.border)
        .title(Span::styled("Disk Health", theme.title));

    let header = Row::new(COLUMNS.iter().map(|h| Cell::from(*h).style(theme.text_dim)))
        .style(Style::default().add_modifier(Modifier::BOLD))
        .height(1);

    let rows: Vec<Row> = volumes.iter().map(|v| {
        let [device, total, used, free, pct, health] = volume_cells(v);
        Row::new(vec![
            Cell::from(device).style(theme.text),
            Cell::from(total).style(theme.text),
            Cell::from(used).style(theme.text),
            Cell::from(free).style(theme.text),
            Cell::from(pct).style(theme.usage_style(v.used_percent)),
            Cell::from(health).style(health_style(&v.health, theme)),
        ])
    }).collect();

    let widths = [
        Constraint::Min(15),
        Constraint::Length(12),
        Constraint::Length(12),
        Constraint::Length(12),
        Constraint::Length(10),
        Constraint::Length(10),
    ];

    let table = Table::new(rows, widths)
        .header(header)
        .block(block)
        .column_spacing(1);
    f.render_widget(table, area);
}

fn render_footer(f: &mut Frame, area: Rect, theme: &Theme) {
    let line = Line::from(vec![
        Span::styled(" ", theme.footer_bg),
        Span::styled(" q ", theme.footer_key),
        Span::styled("Quit  ", theme.footer_text),
        Span::styled(" Ctrl+C ", theme.footer_key),
        Span::styled("Stop  ", theme.footer_text),
    ]);
    f.render_widget(Paragraph::new(line).style(theme.footer_bg), area);
}
