//! Rolling chart data shared between the chart views.
//!
//! The producer owns windowing: every snapshot carries the full window and
//! replaces what was here before. Series are held behind `Rc<RefCell<_>>` so
//! the main chart and the mini charts read the very same buffers.

use std::{cell::RefCell, collections::VecDeque, rc::Rc};

use crate::error::{DashError, Result};
use crate::types::ChartHistory;

pub const DEFAULT_WINDOW: usize = 30;
/// Largest window accepted from the command line.
pub const MAX_WINDOW: usize = 10_000;

pub type SharedSeries = Rc<RefCell<Vec<f64>>>;
pub type SharedLabels = Rc<RefCell<Vec<String>>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Metric {
    Cpu,
    Memory,
    NetworkRx,
}

impl Metric {
    pub fn label(self) -> &'static str {
        match self {
            Metric::Cpu => "CPU Usage",
            Metric::Memory => "Memory Usage",
            Metric::NetworkRx => "Network Activity (KB/s)",
        }
    }

    pub fn is_percent(self) -> bool {
        !matches!(self, Metric::NetworkRx)
    }
}

pub fn push_capped<T>(dq: &mut VecDeque<T>, v: T, cap: usize) {
    if dq.len() == cap {
        dq.pop_front();
    }
    dq.push_back(v);
}

pub struct TimeSeriesModel {
    labels: SharedLabels,
    cpu: SharedSeries,
    memory: SharedSeries,
    network_rx: SharedSeries,
}

impl TimeSeriesModel {
    /// Start with `window` blank labels and zeroed values, capped at
    /// [`MAX_WINDOW`].
    pub fn new(window: usize) -> Self {
        let window = window.min(MAX_WINDOW);
        Self {
            labels: Rc::new(RefCell::new(vec![String::new(); window])),
            cpu: Rc::new(RefCell::new(vec![0.0; window])),
            memory: Rc::new(RefCell::new(vec![0.0; window])),
            network_rx: Rc::new(RefCell::new(vec![0.0; window])),
        }
    }

    /// Replace labels and all three series with the snapshot's. On a length
    /// mismatch nothing is touched.
    pub fn apply_snapshot(&self, h: &ChartHistory) -> Result<()> {
        let n = h.labels.len();
        if h.cpu.len() != n || h.memory.len() != n || h.network_rx.len() != n {
            return Err(DashError::MalformedSnapshot(format!(
                "series lengths differ: labels={n} cpu={} memory={} network_rx={}",
                h.cpu.len(),
                h.memory.len(),
                h.network_rx.len()
            )));
        }
        // Write in place so every alias observes the update.
        self.labels.borrow_mut().clone_from(&h.labels);
        self.cpu.borrow_mut().clone_from(&h.cpu);
        self.memory.borrow_mut().clone_from(&h.memory);
        self.network_rx.borrow_mut().clone_from(&h.network_rx);
        Ok(())
    }

    pub fn labels(&self) -> SharedLabels {
        Rc::clone(&self.labels)
    }

    pub fn series(&self, metric: Metric) -> SharedSeries {
        match metric {
            Metric::Cpu => Rc::clone(&self.cpu),
            Metric::Memory => Rc::clone(&self.memory),
            Metric::NetworkRx => Rc::clone(&self.network_rx),
        }
    }

    pub fn len(&self) -> usize {
        self.labels.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for TimeSeriesModel {
    fn default() -> Self {
        Self::new(DEFAULT_WINDOW)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn history(n_labels: usize, n_cpu: usize) -> ChartHistory {
        ChartHistory {
            labels: (0..n_labels).map(|i| format!("12:00:{i:02}")).collect(),
            cpu: (0..n_cpu).map(|i| i as f64).collect(),
            memory: vec![50.0; n_labels],
            network_rx: vec![120.5; n_labels],
        }
    }

    #[test]
    fn starts_with_blank_window() {
        let m = TimeSeriesModel::new(30);
        assert_eq!(m.len(), 30);
        assert!(m.labels().borrow().iter().all(String::is_empty));
        assert!(m.series(Metric::Cpu).borrow().iter().all(|v| *v == 0.0));
    }

    #[test]
    fn oversized_window_is_capped() {
        let m = TimeSeriesModel::new(usize::MAX);
        assert_eq!(m.len(), MAX_WINDOW);
    }

    #[test]
    fn apply_replaces_every_series() {
        let m = TimeSeriesModel::new(30);
        let h = history(3, 3);
        m.apply_snapshot(&h).unwrap();
        assert_eq!(*m.labels().borrow(), h.labels);
        assert_eq!(*m.series(Metric::Cpu).borrow(), h.cpu);
        assert_eq!(*m.series(Metric::Memory).borrow(), h.memory);
        assert_eq!(*m.series(Metric::NetworkRx).borrow(), h.network_rx);
    }

    #[test]
    fn aliases_see_updates() {
        let m = TimeSeriesModel::new(2);
        let held = m.series(Metric::Cpu);
        m.apply_snapshot(&history(4, 4)).unwrap();
        assert_eq!(held.borrow().len(), 4);
        assert!(Rc::ptr_eq(&held, &m.series(Metric::Cpu)));
    }

    #[test]
    fn mismatch_is_rejected_and_state_kept() {
        let m = TimeSeriesModel::new(30);
        m.apply_snapshot(&history(3, 3)).unwrap();
        let err = m.apply_snapshot(&history(3, 2)).unwrap_err();
        assert!(matches!(
            err,
            DashError::MalformedSnapshot(ref why) if why.contains("labels=3 cpu=2")
        ));
        assert_eq!(*m.series(Metric::Cpu).borrow(), vec![0.0, 1.0, 2.0]);
    }
}
