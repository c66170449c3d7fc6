//! Types that mirror the producer's JSON schema.

use serde::Deserialize;

#[derive(Debug, Deserialize, Clone, Default, PartialEq)]
pub struct ChartHistory {
    pub labels: Vec<String>,
    pub cpu: Vec<f64>,
    pub memory: Vec<f64>,
    pub network_rx: Vec<f64>,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct TelemetrySnapshot {
    pub cpu_usage: f64,
    pub memory_usage: f64,
    // KB/s received; not bounded by 100
    pub network_activity: f64,
    pub chart_history: ChartHistory,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct ProcessSample {
    pub name: String,
    pub cpu: f64,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct RealTimeData {
    pub metrics: TelemetrySnapshot,
    #[serde(default)]
    pub processes: Vec<ProcessSample>,
}

/// Alert severity. Anything the producer sends that is not `high_cpu` or
/// `warning` is shown as informational.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "String")]
pub enum AlertKind {
    HighCpu,
    Warning,
    Info(String),
}

impl From<String> for AlertKind {
    fn from(s: String) -> Self {
        match s.as_str() {
            "high_cpu" => AlertKind::HighCpu,
            "warning" => AlertKind::Warning,
            _ => AlertKind::Info(s),
        }
    }
}

impl AlertKind {
    pub fn as_str(&self) -> &str {
        match self {
            AlertKind::HighCpu => "high_cpu",
            AlertKind::Warning => "warning",
            AlertKind::Info(s) => s,
        }
    }

    /// Whether this alert flips the status indicator into its alert state.
    pub fn raises_alarm(&self) -> bool {
        matches!(self, AlertKind::HighCpu)
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct AlertEvent {
    pub message: String,
    #[serde(rename = "type")]
    pub kind: AlertKind,
}

/// Everything the realtime channel can deliver to the dashboard.
#[derive(Debug, Clone, PartialEq)]
pub enum ChannelEvent {
    Connected,
    Disconnected(String),
    RealTimeData(RealTimeData),
    NewAlert(AlertEvent),
    /// A `real_time_data` frame whose payload did not decode.
    Malformed(String),
}
