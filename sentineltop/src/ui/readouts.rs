//! Current-value text above each mini chart.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use crate::history::Metric;
use crate::ui::util::fmt_metric;

/// Latest readouts; `None` until the first good snapshot.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Readouts {
    pub cpu: Option<String>,
    pub memory: Option<String>,
    pub network: Option<String>,
}

impl Readouts {
    pub fn update(&mut self, cpu: f64, memory: f64, network: f64) {
        self.cpu = Some(fmt_metric(Metric::Cpu, cpu));
        self.memory = Some(fmt_metric(Metric::Memory, memory));
        self.network = Some(fmt_metric(Metric::NetworkRx, network));
    }

    pub fn get(&self, metric: Metric) -> Option<&str> {
        match metric {
            Metric::Cpu => self.cpu.as_deref(),
            Metric::Memory => self.memory.as_deref(),
            Metric::NetworkRx => self.network.as_deref(),
        }
    }
}

pub fn card_title(metric: Metric) -> &'static str {
    match metric {
        Metric::Cpu => "CPU",
        Metric::Memory => "Memory",
        Metric::NetworkRx => "Network",
    }
}

pub fn draw_card(f: &mut ratatui::Frame<'_>, area: Rect, metric: Metric) {
    f.render_widget(
        Block::default()
            .borders(Borders::ALL)
            .title(card_title(metric)),
        area,
    );
}

pub fn draw_readout(f: &mut ratatui::Frame<'_>, area: Rect, metric: Metric, r: &Readouts) {
    let text = r.get(metric).unwrap_or("--");
    let line = Line::from(Span::styled(
        text.to_string(),
        Style::default().add_modifier(Modifier::BOLD),
    ));
    f.render_widget(Paragraph::new(line), area);
}
