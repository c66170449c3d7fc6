//! Small UI helpers: value formatting, label wrapping, truncation.

use crate::history::Metric;

pub fn fmt_pct(v: f64) -> String {
    format!("{v:.1}%")
}

pub fn fmt_rate(v: f64) -> String {
    format!("{v:.1} KB/s")
}

pub fn fmt_metric(metric: Metric, v: f64) -> String {
    if metric.is_percent() {
        fmt_pct(v)
    } else {
        fmt_rate(v)
    }
}

/// Labels longer than 16 chars are broken into 8-char segments.
pub fn wrap_label(s: &str) -> Vec<String> {
    let chars: Vec<char> = s.chars().collect();
    if chars.len() <= 16 {
        return vec![s.to_string()];
    }
    chars.chunks(8).map(|c| c.iter().collect()).collect()
}

pub fn truncate_middle(s: &str, max: usize) -> String {
    let n = s.chars().count();
    if n <= max {
        return s.to_string();
    }
    if max <= 3 {
        return "...".into();
    }
    let keep = max - 3;
    let left = keep / 2;
    let right = keep - left;
    let head: String = s.chars().take(left).collect();
    let tail: String = s.chars().skip(n - right).collect();
    format!("{head}...{tail}")
}
