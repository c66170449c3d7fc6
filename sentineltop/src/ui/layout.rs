//! Named screen regions. Each component writes to its own region only.

use ratatui::layout::{Constraint, Direction, Layout, Rect};

use crate::error::{DashError, Result};

pub const MIN_WIDTH: u16 = 60;
pub const MIN_HEIGHT: u16 = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Region {
    PrimaryChart,
    CpuSummary,
    MemorySummary,
    NetworkSummary,
    CpuText,
    MemText,
    NetText,
    ProcessList,
    AlertList,
    StatusIndicator,
}

impl Region {
    pub const ALL: [Region; 10] = [
        Region::PrimaryChart,
        Region::CpuSummary,
        Region::MemorySummary,
        Region::NetworkSummary,
        Region::CpuText,
        Region::MemText,
        Region::NetText,
        Region::ProcessList,
        Region::AlertList,
        Region::StatusIndicator,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Region::PrimaryChart => "primary-chart",
            Region::CpuSummary => "cpu-summary",
            Region::MemorySummary => "memory-summary",
            Region::NetworkSummary => "network-summary",
            Region::CpuText => "cpu-usage-text",
            Region::MemText => "mem-usage-text",
            Region::NetText => "net-usage-text",
            Region::ProcessList => "process-list",
            Region::AlertList => "alert-list",
            Region::StatusIndicator => "status-indicator",
        }
    }
}

/// Card frames plus the rect of every region.
#[derive(Debug, Clone, Default)]
pub struct Regions {
    pub cards: [Rect; 3],
    rects: [Rect; 10],
}

impl Regions {
    pub fn get(&self, r: Region) -> Rect {
        self.rects[r as usize]
    }

    fn set(&mut self, r: Region, rect: Rect) {
        self.rects[r as usize] = rect;
    }
}

/// Fails when the terminal cannot host every region; used once at startup.
pub fn check_size(area: Rect) -> Result<()> {
    if area.width < MIN_WIDTH || area.height < MIN_HEIGHT {
        return Err(DashError::TerminalTooSmall {
            width: area.width,
            height: area.height,
            min_width: MIN_WIDTH,
            min_height: MIN_HEIGHT,
        });
    }
    Ok(())
}

pub fn split(area: Rect) -> Regions {
    let mut out = Regions::default();

    // Root rows: status line, summary cards, main chart, processes + alerts
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(6),
            Constraint::Percentage(45),
            Constraint::Min(6),
        ])
        .split(area);

    out.set(Region::StatusIndicator, rows[0]);

    let cards = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
        ])
        .split(rows[1]);
    let slots = [
        (Region::CpuText, Region::CpuSummary),
        (Region::MemText, Region::MemorySummary),
        (Region::NetText, Region::NetworkSummary),
    ];
    for (i, (text, chart)) in slots.into_iter().enumerate() {
        out.cards[i] = cards[i];
        let inner = inner(cards[i]);
        let parts = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(1), Constraint::Min(0)])
            .split(inner);
        out.set(text, parts[0]);
        out.set(chart, parts[1]);
    }

    out.set(Region::PrimaryChart, rows[2]);

    let bottom = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(rows[3]);
    out.set(Region::ProcessList, bottom[0]);
    out.set(Region::AlertList, bottom[1]);

    out
}

pub fn inner(area: Rect) -> Rect {
    Rect {
        x: area.x.saturating_add(1),
        y: area.y.saturating_add(1),
        width: area.width.saturating_sub(2),
        height: area.height.saturating_sub(2),
    }
}
