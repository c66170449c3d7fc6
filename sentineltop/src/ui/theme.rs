//! Shared UI theme constants.

use ratatui::style::Color;

// Series colours (cyan / violet / amber)
pub const CPU: Color = Color::Rgb(8, 145, 178);
pub const MEMORY: Color = Color::Rgb(124, 58, 237);
pub const NETWORK: Color = Color::Rgb(217, 119, 6);

pub const AXIS: Color = Color::Rgb(100, 116, 139);
pub const BAR: Color = Color::Rgb(8, 145, 178);
pub const BAR_TRACK: Color = Color::Rgb(51, 65, 85);
pub const PLACEHOLDER: Color = Color::Rgb(148, 163, 184);

pub const OK: Color = Color::Green;
pub const BAD: Color = Color::Red;
pub const ALERT_RED: Color = Color::Rgb(239, 68, 68);
pub const ALERT_AMBER: Color = Color::Rgb(245, 158, 11);
pub const ALERT_BLUE: Color = Color::Rgb(59, 130, 246);
