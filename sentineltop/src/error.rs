//! Error taxonomy for the dashboard pipeline.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DashError {
    /// A telemetry update that cannot be applied: series that disagree in
    /// length, or a `real_time_data` payload with missing or mistyped fields.
    /// The update is dropped and the last good state kept.
    #[error("malformed snapshot: {0}")]
    MalformedSnapshot(String),

    #[error("could not decode frame: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("transport error: {0}")]
    Transport(#[from] tokio_tungstenite::tungstenite::Error),

    #[error("invalid url '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("terminal too small: {width}x{height} (need at least {min_width}x{min_height})")]
    TerminalTooSmall {
        width: u16,
        height: u16,
        min_width: u16,
        min_height: u16,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, DashError>;
