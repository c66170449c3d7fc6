//! Top status line: app title and the connection indicator.

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::status::{ConnectionStatusView, Indicator};
use crate::ui::theme;

pub fn indicator_colors(i: Indicator) -> (Color, Color) {
    match i {
        Indicator::Connected => (Color::Black, theme::OK),
        Indicator::Disconnected | Indicator::AlertDetected => (Color::White, theme::BAD),
    }
}

pub fn draw_header(f: &mut ratatui::Frame<'_>, area: Rect, status: &ConnectionStatusView) {
    let ind = status.indicator();
    let (fg, bg) = indicator_colors(ind);
    let line = Line::from(vec![
        Span::styled(
            format!(" ● {} ", ind.text()),
            Style::default().fg(fg).bg(bg).add_modifier(Modifier::BOLD),
        ),
        Span::raw("  sentineltop  (q quit, s sort, a ack, ←/→ inspect)"),
    ]);
    f.render_widget(Paragraph::new(line), area);
}
