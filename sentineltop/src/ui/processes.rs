//! Top processes as a ranked bar list.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Gauge, Paragraph},
};
use std::cmp::Ordering;

use crate::types::ProcessSample;
use crate::ui::layout::inner;
use crate::ui::theme;
use crate::ui::util::{fmt_pct, truncate_middle};

pub const EMPTY_TEXT: &str = "No processes data available.";

const NAME_COLS: u16 = 16;
const VALUE_COLS: u16 = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProcessOrder {
    /// Keep the producer's ranking.
    #[default]
    Producer,
    CpuDesc,
}

impl ProcessOrder {
    pub fn toggled(self) -> Self {
        match self {
            ProcessOrder::Producer => ProcessOrder::CpuDesc,
            ProcessOrder::CpuDesc => ProcessOrder::Producer,
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "producer" | "none" => Some(ProcessOrder::Producer),
            "cpu" => Some(ProcessOrder::CpuDesc),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProcessRow {
    pub name: String,
    /// Bar width in percent, capped at 100.
    pub bar: f64,
    /// The raw value, uncapped, e.g. "150.0%".
    pub value: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ProcessListing {
    Empty,
    Rows(Vec<ProcessRow>),
}

#[derive(Debug, Default, Clone, Copy)]
pub struct ProcessListView {
    pub order: ProcessOrder,
}

impl ProcessListView {
    pub fn new(order: ProcessOrder) -> Self {
        Self { order }
    }

    /// Pure mapping from samples to display rows.
    pub fn render(&self, processes: &[ProcessSample]) -> ProcessListing {
        if processes.is_empty() {
            return ProcessListing::Empty;
        }
        let mut idxs: Vec<usize> = (0..processes.len()).collect();
        if self.order == ProcessOrder::CpuDesc {
            // stable: ties keep producer order
            idxs.sort_by(|&a, &b| {
                processes[b]
                    .cpu
                    .partial_cmp(&processes[a].cpu)
                    .unwrap_or(Ordering::Equal)
            });
        }
        ProcessListing::Rows(
            idxs.into_iter()
                .map(|i| {
                    let p = &processes[i];
                    let bar = if p.cpu.is_finite() {
                        p.cpu.clamp(0.0, 100.0)
                    } else {
                        0.0
                    };
                    ProcessRow {
                        name: p.name.clone(),
                        bar,
                        value: fmt_pct(p.cpu),
                    }
                })
                .collect(),
        )
    }

    pub fn draw(&self, f: &mut ratatui::Frame<'_>, area: Rect, processes: &[ProcessSample]) {
        let title = match self.order {
            ProcessOrder::Producer => "Top Processes",
            ProcessOrder::CpuDesc => "Top Processes (CPU •)",
        };
        f.render_widget(Block::default().borders(Borders::ALL).title(title), area);

        let inner = inner(area);
        if inner.height == 0 || inner.width <= NAME_COLS + VALUE_COLS {
            return;
        }

        let rows = match self.render(processes) {
            ProcessListing::Empty => {
                let p = Paragraph::new(Line::from(EMPTY_TEXT))
                    .style(Style::default().fg(theme::PLACEHOLDER))
                    .alignment(ratatui::layout::Alignment::Center);
                f.render_widget(p, inner);
                return;
            }
            ProcessListing::Rows(rows) => rows,
        };

        let show_n = rows.len().min(inner.height as usize);
        let vchunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints(vec![Constraint::Length(1); show_n])
            .split(inner);

        for (row, rect) in rows.iter().take(show_n).zip(vchunks.iter()) {
            let cols = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([
                    Constraint::Length(NAME_COLS),
                    Constraint::Min(4),
                    Constraint::Length(VALUE_COLS),
                ])
                .split(*rect);

            f.render_widget(
                Paragraph::new(truncate_middle(&row.name, NAME_COLS as usize - 1))
                    .style(Style::default().add_modifier(Modifier::BOLD)),
                cols[0],
            );
            let bar = Gauge::default()
                .gauge_style(Style::default().fg(theme::BAR).bg(theme::BAR_TRACK))
                .ratio(row.bar / 100.0)
                .label("");
            f.render_widget(bar, cols[1]);
            f.render_widget(
                Paragraph::new(format!("{:>7}", row.value))
                    .style(Style::default().fg(theme::AXIS)),
                cols[2],
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(name: &str, cpu: f64) -> ProcessSample {
        ProcessSample {
            name: name.into(),
            cpu,
        }
    }

    #[test]
    fn empty_input_gives_placeholder() {
        assert_eq!(ProcessListView::default().render(&[]), ProcessListing::Empty);
    }

    #[test]
    fn bar_capped_label_not() {
        let out = ProcessListView::default().render(&[p("chrome", 150.0)]);
        assert_eq!(
            out,
            ProcessListing::Rows(vec![ProcessRow {
                name: "chrome".into(),
                bar: 100.0,
                value: "150.0%".into(),
            }])
        );
    }

    #[test]
    fn producer_order_is_kept() {
        let out = ProcessListView::default().render(&[p("a", 1.0), p("b", 9.0)]);
        let ProcessListing::Rows(rows) = out else {
            panic!("expected rows");
        };
        let names: Vec<_> = rows.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, ["a", "b"]);
    }

    #[test]
    fn cpu_order_sorts_descending() {
        let view = ProcessListView::new(ProcessOrder::CpuDesc);
        let ProcessListing::Rows(rows) = view.render(&[p("a", 1.0), p("b", 9.0), p("c", 5.0)])
        else {
            panic!("expected rows");
        };
        let names: Vec<_> = rows.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, ["b", "c", "a"]);
    }
}
