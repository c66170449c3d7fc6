//! Connection indicator state: the link state plus an alert override.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConnectionState {
    Connected,
    #[default]
    Disconnected,
}

/// What the indicator shows. `AlertDetected` overrides the link state
/// until the next connect/disconnect (or an explicit acknowledge).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Indicator {
    Connected,
    Disconnected,
    AlertDetected,
}

impl Indicator {
    pub fn text(self) -> &'static str {
        match self {
            Indicator::Connected => "Monitoring Active",
            Indicator::Disconnected => "Disconnected",
            Indicator::AlertDetected => "Alert Detected!",
        }
    }
}

#[derive(Debug, Default)]
pub struct ConnectionStatusView {
    link: ConnectionState,
    alarm: bool,
}

impl ConnectionStatusView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn connected(&mut self) {
        self.link = ConnectionState::Connected;
        self.alarm = false;
    }

    pub fn disconnected(&mut self) {
        self.link = ConnectionState::Disconnected;
        self.alarm = false;
    }

    pub fn alert_detected(&mut self) {
        self.alarm = true;
    }

    /// Drop the alert override; returns false if there was none.
    pub fn acknowledge(&mut self) -> bool {
        std::mem::take(&mut self.alarm)
    }

    pub fn link(&self) -> ConnectionState {
        self.link
    }

    pub fn indicator(&self) -> Indicator {
        if self.alarm {
            return Indicator::AlertDetected;
        }
        match self.link {
            ConnectionState::Connected => Indicator::Connected,
            ConnectionState::Disconnected => Indicator::Disconnected,
        }
    }
}
