//! Main activity chart plus the three summary mini charts.
//!
//! All four views hold `Rc` handles into the same [`TimeSeriesModel`]
//! buffers, so a model update is visible to every view at the next draw.

use std::rc::Rc;

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    symbols,
    text::{Line, Span},
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, LegendPosition},
};

use crate::history::{Metric, SharedLabels, SharedSeries, TimeSeriesModel};
use crate::ui::layout::Region;
use crate::ui::theme;
use crate::ui::util::{fmt_metric, wrap_label};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayMode {
    /// Axes, legend and cursor tooltip.
    Detailed,
    /// Line only.
    Minimal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum YScale {
    /// Fixed 0..100.
    Percent,
    /// 0..100, grown to fit anything above 100 (network on the main chart).
    PercentOrAuto,
    /// 0..peak, no upper bound.
    AutoFromZero,
}

pub struct ChartView {
    region: Region,
    mode: DisplayMode,
    y: YScale,
    labels: SharedLabels,
    series: Vec<(Metric, SharedSeries)>,
    redraws: u64,
}

fn metric_color(m: Metric) -> Color {
    match m {
        Metric::Cpu => theme::CPU,
        Metric::Memory => theme::MEMORY,
        Metric::NetworkRx => theme::NETWORK,
    }
}

impl ChartView {
    fn new(
        model: &TimeSeriesModel,
        region: Region,
        mode: DisplayMode,
        y: YScale,
        metrics: &[Metric],
    ) -> Self {
        Self {
            region,
            mode,
            y,
            labels: model.labels(),
            series: metrics.iter().map(|&m| (m, model.series(m))).collect(),
            redraws: 0,
        }
    }

    pub fn region(&self) -> Region {
        self.region
    }

    pub fn mode(&self) -> DisplayMode {
        self.mode
    }

    pub fn redraws(&self) -> u64 {
        self.redraws
    }

    pub fn series(&self) -> impl Iterator<Item = (Metric, &SharedSeries)> {
        self.series.iter().map(|(m, s)| (*m, s))
    }

    fn peak(&self) -> f64 {
        self.series
            .iter()
            .map(|(_, s)| {
                s.borrow()
                    .iter()
                    .copied()
                    .filter(|v| v.is_finite())
                    .fold(0.0_f64, f64::max)
            })
            .fold(0.0_f64, f64::max)
    }

    pub fn y_bounds(&self) -> [f64; 2] {
        match self.y {
            YScale::Percent => [0.0, 100.0],
            YScale::PercentOrAuto => [0.0, self.peak().max(100.0)],
            YScale::AutoFromZero => [0.0, self.peak().max(1.0) * 1.1],
        }
    }

    /// One line describing every series at `idx`, e.g.
    /// `12:00:00  CPU Usage: 42.3% | Network Activity (KB/s): 512.7 KB/s`.
    pub fn tooltip(&self, idx: usize) -> Option<String> {
        let labels = self.labels.borrow();
        let label = labels.get(idx)?;
        let parts: Vec<String> = self
            .series
            .iter()
            .filter_map(|(m, s)| {
                s.borrow()
                    .get(idx)
                    .map(|v| format!("{}: {}", m.label(), fmt_metric(*m, *v)))
            })
            .collect();
        Some(format!("{label}  {}", parts.join(" | ")))
    }

    pub fn render(&self, f: &mut ratatui::Frame<'_>, area: Rect, cursor: Option<usize>) {
        let n = self.labels.borrow().len();
        let x_max = n.saturating_sub(1).max(1) as f64;
        let [y_min, y_max] = self.y_bounds();

        let mut points: Vec<Vec<(f64, f64)>> = self
            .series
            .iter()
            .map(|(_, s)| {
                s.borrow()
                    .iter()
                    .enumerate()
                    .map(|(i, v)| (i as f64, *v))
                    .collect()
            })
            .collect();
        let cursor = cursor
            .filter(|_| self.mode == DisplayMode::Detailed && n > 0)
            .map(|c| c.min(n - 1));
        if let Some(c) = cursor {
            points.push(vec![(c as f64, y_min), (c as f64, y_max)]);
        }

        let mut datasets: Vec<Dataset> = self
            .series
            .iter()
            .zip(points.iter())
            .map(|((m, _), pts)| {
                let ds = Dataset::default()
                    .marker(symbols::Marker::Braille)
                    .graph_type(GraphType::Line)
                    .style(Style::default().fg(metric_color(*m)))
                    .data(pts);
                match self.mode {
                    DisplayMode::Detailed => ds.name(m.label()),
                    DisplayMode::Minimal => ds,
                }
            })
            .collect();
        if cursor.is_some() {
            if let Some(pts) = points.last() {
                datasets.push(
                    Dataset::default()
                        .graph_type(GraphType::Line)
                        .style(Style::default().fg(Color::DarkGray))
                        .data(pts),
                );
            }
        }

        let chart = match self.mode {
            DisplayMode::Minimal => Chart::new(datasets)
                .x_axis(Axis::default().bounds([0.0, x_max]))
                .y_axis(Axis::default().bounds([y_min, y_max]))
                .legend_position(None),
            DisplayMode::Detailed => {
                let (first, last) = {
                    let labels = self.labels.borrow();
                    let wrapped = |l: Option<&String>| {
                        l.map(|l| wrap_label(l).join(" ")).unwrap_or_default()
                    };
                    (wrapped(labels.first()), wrapped(labels.last()))
                };
                let axis_style = Style::default().fg(theme::AXIS);
                let mut block = Block::default()
                    .borders(Borders::ALL)
                    .title("System Activity");
                if let Some(tip) = cursor.and_then(|c| self.tooltip(c)) {
                    block = block.title_bottom(Line::from(tip));
                }
                Chart::new(datasets)
                    .block(block)
                    .x_axis(
                        Axis::default()
                            .style(axis_style)
                            .bounds([0.0, x_max])
                            .labels(vec![Span::raw(first), Span::raw(last)]),
                    )
                    .y_axis(
                        Axis::default()
                            .style(axis_style)
                            .bounds([y_min, y_max])
                            .labels(vec![
                                Span::raw(format!("{y_min:.0}")),
                                Span::raw(format!("{:.0}", y_max / 2.0)),
                                Span::raw(format!("{y_max:.0}")),
                            ]),
                    )
                    .legend_position(Some(LegendPosition::TopRight))
            }
        };
        f.render_widget(chart, area);
    }
}

/// The four chart surfaces bound to one model.
pub struct ChartViewSet {
    views: [ChartView; 4],
}

impl ChartViewSet {
    pub fn bind(model: &TimeSeriesModel) -> Self {
        Self {
            views: [
                ChartView::new(
                    model,
                    Region::PrimaryChart,
                    DisplayMode::Detailed,
                    YScale::PercentOrAuto,
                    &[Metric::Cpu, Metric::Memory, Metric::NetworkRx],
                ),
                ChartView::new(
                    model,
                    Region::CpuSummary,
                    DisplayMode::Minimal,
                    YScale::Percent,
                    &[Metric::Cpu],
                ),
                ChartView::new(
                    model,
                    Region::MemorySummary,
                    DisplayMode::Minimal,
                    YScale::Percent,
                    &[Metric::Memory],
                ),
                ChartView::new(
                    model,
                    Region::NetworkSummary,
                    DisplayMode::Minimal,
                    YScale::AutoFromZero,
                    &[Metric::NetworkRx],
                ),
            ],
        }
    }

    /// Called once per applied snapshot; marks every view for redraw and
    /// returns how many were marked.
    pub fn refresh_all(&mut self) -> usize {
        for v in self.views.iter_mut() {
            v.redraws += 1;
        }
        self.views.len()
    }

    pub fn views(&self) -> &[ChartView] {
        &self.views
    }

    pub fn view(&self, region: Region) -> Option<&ChartView> {
        self.views.iter().find(|v| v.region == region)
    }

    pub fn primary(&self) -> &ChartView {
        &self.views[0]
    }

    /// True when every view aliases the model's buffers rather than a copy.
    pub fn shares_model(&self, model: &TimeSeriesModel) -> bool {
        self.views.iter().all(|v| {
            Rc::ptr_eq(&v.labels, &model.labels())
                && v.series.iter().all(|(m, s)| Rc::ptr_eq(s, &model.series(*m)))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ChartHistory;

    fn model_with(net: Vec<f64>) -> TimeSeriesModel {
        let m = TimeSeriesModel::new(0);
        let n = net.len();
        m.apply_snapshot(&ChartHistory {
            labels: (0..n).map(|i| format!("t{i}")).collect(),
            cpu: vec![42.3; n],
            memory: vec![60.1; n],
            network_rx: net,
        })
        .unwrap();
        m
    }

    #[test]
    fn views_alias_model() {
        let model = TimeSeriesModel::default();
        let set = ChartViewSet::bind(&model);
        assert!(set.shares_model(&model));
        assert_eq!(set.views().len(), 4);
    }

    #[test]
    fn refresh_touches_all_four_once() {
        let model = TimeSeriesModel::default();
        let mut set = ChartViewSet::bind(&model);
        set.refresh_all();
        assert!(set.views().iter().all(|v| v.redraws() == 1));
    }

    #[test]
    fn y_scales() {
        let model = model_with(vec![10.0, 512.7]);
        let set = ChartViewSet::bind(&model);
        let cpu = set.view(Region::CpuSummary).unwrap();
        assert_eq!(cpu.y_bounds(), [0.0, 100.0]);
        assert_eq!(set.primary().y_bounds(), [0.0, 512.7]);
        let net = set.view(Region::NetworkSummary).unwrap().y_bounds();
        assert_eq!(net[0], 0.0);
        assert!(net[1] > 512.7);
    }

    #[test]
    fn primary_stays_at_percent_range_for_small_network() {
        let model = model_with(vec![3.0, 4.0]);
        let set = ChartViewSet::bind(&model);
        assert_eq!(set.primary().y_bounds(), [0.0, 100.0]);
    }

    #[test]
    fn tooltip_formats_units() {
        let model = model_with(vec![512.66]);
        let set = ChartViewSet::bind(&model);
        assert_eq!(
            set.primary().tooltip(0).unwrap(),
            "t0  CPU Usage: 42.3% | Memory Usage: 60.1% | Network Activity (KB/s): 512.7 KB/s"
        );
        assert!(set.primary().tooltip(1).is_none());
    }
}
