//! In-process stand-in for the producer, used by `--demo`.
//!
//! Emits the same events a live server would: a connect, a greeting alert,
//! then one `real_time_data` per tick with a rolling window of synthetic
//! waveforms. Nothing is measured on the host.

use std::collections::VecDeque;
use std::time::Duration;

use chrono::Local;
use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;

use crate::history::push_capped;
use crate::types::{
    AlertEvent, AlertKind, ChannelEvent, ChartHistory, ProcessSample, RealTimeData,
    TelemetrySnapshot,
};

pub const DEMO_TICK: Duration = Duration::from_millis(500);
const HIGH_CPU: f64 = 90.0;
const PROCS: [&str; 5] = ["chrome", "rustc", "postgres", "node", "sshd"];

/// Rolling synthetic producer state.
pub struct DemoFeed {
    tick: u64,
    window: usize,
    labels: VecDeque<String>,
    cpu: VecDeque<f64>,
    memory: VecDeque<f64>,
    net: VecDeque<f64>,
    was_high: bool,
}

impl DemoFeed {
    pub fn new(window: usize) -> Self {
        let window = window.max(1);
        Self {
            tick: 0,
            window,
            labels: std::iter::repeat(String::new()).take(window).collect(),
            cpu: std::iter::repeat(0.0).take(window).collect(),
            memory: std::iter::repeat(0.0).take(window).collect(),
            net: std::iter::repeat(0.0).take(window).collect(),
            was_high: false,
        }
    }

    /// Advance one tick; returns the events a server would push for it.
    pub fn step(&mut self, label: String) -> Vec<ChannelEvent> {
        let t = self.tick as f64;
        self.tick += 1;

        let cpu = (55.0 + 38.0 * (t / 9.0).sin() + 6.0 * (t * 1.3).sin()).clamp(0.0, 100.0);
        let memory = (58.0 + 12.0 * (t / 23.0).sin()).clamp(0.0, 100.0);
        let net = (320.0 + 280.0 * (t / 5.0).sin().abs() + 40.0 * (t * 0.7).cos()).max(0.0);
        let round = |v: f64| (v * 100.0).round() / 100.0;
        let (cpu, memory, net) = (round(cpu), round(memory), round(net));

        push_capped(&mut self.labels, label, self.window);
        push_capped(&mut self.cpu, cpu, self.window);
        push_capped(&mut self.memory, memory, self.window);
        push_capped(&mut self.net, net, self.window);

        let processes = PROCS
            .iter()
            .enumerate()
            .map(|(i, name)| ProcessSample {
                name: (*name).to_string(),
                cpu: round(cpu / (i as f64 + 1.5) + (t / (i as f64 + 2.0)).sin().abs() * 3.0),
            })
            .collect();

        let mut out = vec![ChannelEvent::RealTimeData(RealTimeData {
            metrics: TelemetrySnapshot {
                cpu_usage: cpu,
                memory_usage: memory,
                network_activity: net,
                chart_history: ChartHistory {
                    labels: self.labels.iter().cloned().collect(),
                    cpu: self.cpu.iter().copied().collect(),
                    memory: self.memory.iter().copied().collect(),
                    network_rx: self.net.iter().copied().collect(),
                },
            },
            processes,
        })];

        let high = cpu > HIGH_CPU;
        if high && !self.was_high {
            out.push(ChannelEvent::NewAlert(AlertEvent {
                message: format!("High CPU usage detected: {cpu:.1}%"),
                kind: AlertKind::HighCpu,
            }));
        }
        self.was_high = high;

        if self.tick % 60 == 0 {
            out.push(ChannelEvent::NewAlert(AlertEvent {
                message: format!("Network burst: {net:.1} KB/s"),
                kind: AlertKind::Warning,
            }));
        }
        out
    }
}

pub fn spawn_demo(
    window: usize,
    tick: Duration,
    tx: UnboundedSender<ChannelEvent>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut feed = DemoFeed::new(window);
        let greeting = ChannelEvent::NewAlert(AlertEvent {
            message: "Monitoring session started.".into(),
            kind: AlertKind::Info("info".into()),
        });
        if tx.send(ChannelEvent::Connected).is_err() || tx.send(greeting).is_err() {
            return;
        }
        let mut interval = tokio::time::interval(tick);
        loop {
            interval.tick().await;
            let label = Local::now().format("%H:%M:%S").to_string();
            for ev in feed.step(label) {
                if tx.send(ev).is_err() {
                    return;
                }
            }
        }
    })
}
