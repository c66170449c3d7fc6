//! Alert feed panel.

use std::time::Instant;

use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use crate::alerts::{AlertEntry, AlertLog, AlertStyle};
use crate::types::AlertKind;
use crate::ui::layout::inner;
use crate::ui::theme;

pub const PLACEHOLDER_TEXT: &str = "No alerts yet.";

fn style_color(s: AlertStyle) -> Color {
    match s {
        AlertStyle::Red => theme::ALERT_RED,
        AlertStyle::Amber => theme::ALERT_AMBER,
        AlertStyle::Blue => theme::ALERT_BLUE,
    }
}

fn icon(kind: &AlertKind) -> &'static str {
    match kind {
        AlertKind::HighCpu => "⚠️",
        _ => "🚨",
    }
}

fn entry_line(e: &AlertEntry, now: Instant) -> Line<'static> {
    let mut style = Style::default().fg(style_color(e.style));
    // Enter transition: slide in from the right, highlighted.
    let lead = if e.entering(now) {
        style = style.add_modifier(Modifier::BOLD | Modifier::REVERSED);
        "  "
    } else {
        ""
    };
    Line::from(vec![
        Span::raw(lead),
        Span::raw(format!("{} ", icon(&e.kind))),
        Span::styled(e.message.clone(), style),
        Span::styled(
            format!("  {}", e.time),
            Style::default().fg(theme::AXIS),
        ),
    ])
}

pub fn draw_alerts(
    f: &mut ratatui::Frame<'_>,
    area: Rect,
    log: &AlertLog,
    scroll: usize,
    now: Instant,
) {
    let title = if log.is_empty() {
        "Alerts".to_string()
    } else {
        format!("Alerts ({})", log.len())
    };
    f.render_widget(Block::default().borders(Borders::ALL).title(title), area);
    let inner = inner(area);
    if inner.height == 0 {
        return;
    }

    if log.shows_placeholder() {
        let p = Paragraph::new(PLACEHOLDER_TEXT)
            .style(Style::default().fg(theme::PLACEHOLDER))
            .alignment(Alignment::Center);
        f.render_widget(p, inner);
        return;
    }

    let offset = scroll.min(log.len().saturating_sub(1));
    let lines: Vec<Line> = log
        .entries()
        .skip(offset)
        .take(inner.height as usize)
        .map(|e| entry_line(e, now))
        .collect();
    f.render_widget(Paragraph::new(lines), inner);
}
