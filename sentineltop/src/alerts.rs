//! Alert feed: newest-first, optionally capped.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

use chrono::{DateTime, Local};

use crate::status::ConnectionStatusView;
use crate::types::{AlertEvent, AlertKind};

pub const DEFAULT_ALERT_CAP: usize = 200;

/// How long a fresh entry is drawn with its enter transition.
pub const ENTER_TRANSITION: Duration = Duration::from_millis(600);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertStyle {
    Red,
    Amber,
    Blue,
}

impl From<&AlertKind> for AlertStyle {
    fn from(k: &AlertKind) -> Self {
        match k {
            AlertKind::HighCpu => AlertStyle::Red,
            AlertKind::Warning => AlertStyle::Amber,
            AlertKind::Info(_) => AlertStyle::Blue,
        }
    }
}

#[derive(Debug, Clone)]
pub struct AlertEntry {
    pub time: String,
    pub message: String,
    pub kind: AlertKind,
    pub style: AlertStyle,
    pub arrived: Instant,
}

impl AlertEntry {
    pub fn entering(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.arrived) < ENTER_TRANSITION
    }
}

pub struct AlertLog {
    entries: VecDeque<AlertEntry>,
    // Set by the first append; the placeholder is never shown again.
    received_any: bool,
    // 0 = unbounded
    cap: usize,
}

impl AlertLog {
    pub fn new(cap: usize) -> Self {
        Self {
            entries: VecDeque::new(),
            received_any: false,
            cap,
        }
    }

    pub fn append(&mut self, alert: AlertEvent, status: &mut ConnectionStatusView) {
        self.append_at(alert, Local::now(), Instant::now(), status);
    }

    pub fn append_at(
        &mut self,
        alert: AlertEvent,
        wall: DateTime<Local>,
        now: Instant,
        status: &mut ConnectionStatusView,
    ) {
        self.received_any = true;

        let raises = alert.kind.raises_alarm();
        let entry = AlertEntry {
            time: wall.format("%H:%M:%S").to_string(),
            style: AlertStyle::from(&alert.kind),
            message: alert.message,
            kind: alert.kind,
            arrived: now,
        };
        self.entries.push_front(entry);
        if self.cap > 0 && self.entries.len() > self.cap {
            self.entries.pop_back();
        }

        if raises {
            status.alert_detected();
        }
    }

    /// True until the first alert arrives.
    pub fn shows_placeholder(&self) -> bool {
        !self.received_any
    }

    pub fn entries(&self) -> impl Iterator<Item = &AlertEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether any entry is still mid-transition (the UI keeps redrawing).
    pub fn animating(&self, now: Instant) -> bool {
        self.entries.front().is_some_and(|e| e.entering(now))
    }
}

impl Default for AlertLog {
    fn default() -> Self {
        Self::new(DEFAULT_ALERT_CAP)
    }
}
