//! Dashboard state: everything the screen shows, mutated only by channel
//! events and key presses. No terminal access here, so it can be driven
//! directly from tests.

use std::time::Instant;

use tracing::{debug, info, warn};

use crate::alerts::{AlertLog, DEFAULT_ALERT_CAP};
use crate::history::{Metric, TimeSeriesModel, DEFAULT_WINDOW};
use crate::status::ConnectionStatusView;
use crate::types::{AlertEvent, ChannelEvent, ProcessSample, RealTimeData};
use crate::ui::alerts::draw_alerts;
use crate::ui::charts::ChartViewSet;
use crate::ui::header::draw_header;
use crate::ui::layout::{self, Region};
use crate::ui::processes::{ProcessListView, ProcessOrder};
use crate::ui::readouts::{draw_card, draw_readout, Readouts};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DashboardConfig {
    pub window: usize,
    pub alert_cap: usize,
    pub order: ProcessOrder,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            window: DEFAULT_WINDOW,
            alert_cap: DEFAULT_ALERT_CAP,
            order: ProcessOrder::Producer,
        }
    }
}

pub struct Dashboard {
    model: TimeSeriesModel,
    charts: ChartViewSet,
    readouts: Readouts,
    processes: Vec<ProcessSample>,
    process_view: ProcessListView,
    alerts: AlertLog,
    status: ConnectionStatusView,

    // Chart inspection cursor (index into the window)
    cursor: Option<usize>,
    alert_scroll: usize,
    malformed: u64,
}

impl Dashboard {
    pub fn new(cfg: DashboardConfig) -> Self {
        let model = TimeSeriesModel::new(cfg.window);
        let charts = ChartViewSet::bind(&model);
        Self {
            model,
            charts,
            readouts: Readouts::default(),
            processes: Vec::new(),
            process_view: ProcessListView::new(cfg.order),
            alerts: AlertLog::new(cfg.alert_cap),
            status: ConnectionStatusView::new(),
            cursor: None,
            alert_scroll: 0,
            malformed: 0,
        }
    }

    /// Apply one channel event. Returns whether anything visible changed,
    /// i.e. whether the caller should redraw.
    pub fn handle(&mut self, ev: ChannelEvent) -> bool {
        match ev {
            ChannelEvent::Connected => {
                info!("connected to producer");
                self.status.connected();
                true
            }
            ChannelEvent::Disconnected(reason) => {
                warn!(%reason, "disconnected from producer");
                self.status.disconnected();
                true
            }
            ChannelEvent::RealTimeData(data) => self.on_real_time_data(data),
            ChannelEvent::NewAlert(alert) => {
                self.on_alert(alert);
                true
            }
            ChannelEvent::Malformed(reason) => {
                self.reject(&reason);
                false
            }
        }
    }

    fn on_real_time_data(&mut self, data: RealTimeData) -> bool {
        let m = &data.metrics;
        let charts = match self.model.apply_snapshot(&m.chart_history) {
            Ok(()) => {
                self.readouts
                    .update(m.cpu_usage, m.memory_usage, m.network_activity);
                self.charts.refresh_all() > 0
            }
            Err(e) => {
                self.reject(&e.to_string());
                false
            }
        };
        let processes = self.processes != data.processes;
        if processes {
            self.processes = data.processes;
        }
        charts || processes
    }

    fn reject(&mut self, reason: &str) {
        self.malformed += 1;
        warn!(%reason, "skipping telemetry update");
    }

    fn on_alert(&mut self, alert: AlertEvent) {
        debug!(kind = alert.kind.as_str(), message = %alert.message, "alert");
        self.alerts.append(alert, &mut self.status);
        self.alert_scroll = 0;
    }

    pub fn model(&self) -> &TimeSeriesModel {
        &self.model
    }

    pub fn charts(&self) -> &ChartViewSet {
        &self.charts
    }

    pub fn readout(&self, metric: Metric) -> Option<&str> {
        self.readouts.get(metric)
    }

    pub fn processes(&self) -> &[ProcessSample] {
        &self.processes
    }

    pub fn process_view(&self) -> &ProcessListView {
        &self.process_view
    }

    pub fn alerts(&self) -> &AlertLog {
        &self.alerts
    }

    pub fn status(&self) -> &ConnectionStatusView {
        &self.status
    }

    pub fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    /// Number of telemetry updates dropped as malformed.
    pub fn malformed(&self) -> u64 {
        self.malformed
    }

    pub fn toggle_order(&mut self) {
        self.process_view.order = self.process_view.order.toggled();
    }

    pub fn acknowledge_alert(&mut self) -> bool {
        self.status.acknowledge()
    }

    /// Move the inspection cursor; stepping right past the newest point
    /// hides it again.
    pub fn move_cursor(&mut self, delta: isize) {
        let n = self.model.len();
        if n == 0 {
            self.cursor = None;
            return;
        }
        self.cursor = match self.cursor {
            None => Some(n - 1),
            Some(c) => {
                let next = c as isize + delta;
                if next >= n as isize {
                    None
                } else {
                    Some(next.max(0) as usize)
                }
            }
        };
    }

    pub fn cursor_home(&mut self) {
        self.cursor = (!self.model.is_empty()).then_some(0);
    }

    pub fn cursor_end(&mut self) {
        self.cursor = self.model.len().checked_sub(1);
    }

    pub fn scroll_alerts(&mut self, delta: isize) {
        let max = self.alerts.len().saturating_sub(1) as isize;
        self.alert_scroll = (self.alert_scroll as isize + delta).clamp(0, max) as usize;
    }

    /// Whether something on screen is still animating.
    pub fn animating(&self, now: Instant) -> bool {
        self.alerts.animating(now)
    }

    pub fn draw(&self, f: &mut ratatui::Frame<'_>) {
        let regions = layout::split(f.area());
        let now = Instant::now();

        let metrics = [Metric::Cpu, Metric::Memory, Metric::NetworkRx];
        for (card, metric) in regions.cards.iter().zip(metrics) {
            if card.area() > 0 {
                draw_card(f, *card, metric);
            }
        }

        for region in Region::ALL {
            let area = regions.get(region);
            if area.width == 0 || area.height == 0 {
                debug!(region = region.name(), "region has no area; skipped this frame");
                continue;
            }
            match region {
                Region::PrimaryChart
                | Region::CpuSummary
                | Region::MemorySummary
                | Region::NetworkSummary => {
                    if let Some(view) = self.charts.view(region) {
                        view.render(f, area, self.cursor);
                    }
                }
                Region::CpuText => draw_readout(f, area, Metric::Cpu, &self.readouts),
                Region::MemText => draw_readout(f, area, Metric::Memory, &self.readouts),
                Region::NetText => draw_readout(f, area, Metric::NetworkRx, &self.readouts),
                Region::ProcessList => self.process_view.draw(f, area, &self.processes),
                Region::AlertList => draw_alerts(f, area, &self.alerts, self.alert_scroll, now),
                Region::StatusIndicator => draw_header(f, area, &self.status),
            }
        }
    }
}

impl Default for Dashboard {
    fn default() -> Self {
        Self::new(DashboardConfig::default())
    }
}
