//! Live system-metrics dashboard: consumes pushed telemetry over WebSocket
//! and renders charts, gauges, a process list and an alert feed.

pub mod alerts;
pub mod app;
pub mod dashboard;
pub mod demo;
pub mod error;
pub mod history;
pub mod logging;
pub mod profiles;
pub mod status;
pub mod types;
pub mod ui;
pub mod ws;
