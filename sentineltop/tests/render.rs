//! Render smoke tests against ratatui's TestBackend.

use ratatui::{backend::TestBackend, Terminal};

use sentineltop::app::handle_key;
use sentineltop::dashboard::Dashboard;
use sentineltop::types::ChannelEvent;
use sentineltop::ws::{decode_frame, Frame};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

fn screen(term: &Terminal<TestBackend>) -> String {
    let buf = term.backend().buffer();
    let mut out = String::new();
    for row in buf.content.chunks(buf.area.width as usize) {
        for cell in row {
            out.push_str(cell.symbol());
        }
        out.push('\n');
    }
    out
}

fn draw(dash: &Dashboard, w: u16, h: u16) -> String {
    let mut term = Terminal::new(TestBackend::new(w, h)).expect("failed to create terminal");
    term.draw(|f| dash.draw(f)).expect("failed to draw");
    screen(&term)
}

fn feed(dash: &mut Dashboard, frame: &str) {
    let Frame::Event(ev) = decode_frame(frame).unwrap() else {
        panic!("not an event frame: {frame}");
    };
    dash.handle(ev);
}

fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

#[test]
fn initial_screen_shows_placeholders() {
    let dash = Dashboard::default();
    let text = draw(&dash, 100, 30);
    assert!(text.contains("Disconnected"), "{text}");
    assert!(text.contains("No processes data available."), "{text}");
    assert!(text.contains("No alerts yet."), "{text}");
    assert!(text.contains("System Activity"), "{text}");
}

#[test]
fn scenario_screen() {
    let mut dash = Dashboard::default();
    dash.handle(ChannelEvent::Connected);
    feed(
        &mut dash,
        r#"{"event":"real_time_data","data":{"metrics":{"cpu_usage":42.3,"memory_usage":60.1,"network_activity":512.7,"chart_history":{"labels":["12:00:00"],"cpu":[42.3],"memory":[60.1],"network_rx":[512.7]}},"processes":[{"name":"chrome","cpu":35.2}]}}"#,
    );
    let text = draw(&dash, 100, 30);
    assert!(text.contains("Monitoring Active"), "{text}");
    assert!(text.contains("42.3%"), "{text}");
    assert!(text.contains("60.1%"), "{text}");
    assert!(text.contains("512.7 KB/s"), "{text}");
    assert!(text.contains("chrome"), "{text}");
    assert!(text.contains("35.2%"), "{text}");

    feed(
        &mut dash,
        r#"{"event":"new_alert","data":{"message":"CPU spike","type":"high_cpu"}}"#,
    );
    let text = draw(&dash, 100, 30);
    assert!(text.contains("Alert Detected!"), "{text}");
    assert!(text.contains("CPU spike"), "{text}");
    assert!(!text.contains("No alerts yet."), "{text}");

    dash.handle(ChannelEvent::Disconnected("gone".into()));
    let text = draw(&dash, 100, 30);
    assert!(text.contains("Disconnected"), "{text}");
    assert!(!text.contains("Alert Detected!"), "{text}");
}

#[test]
fn cursor_shows_tooltip() {
    let mut dash = Dashboard::default();
    feed(
        &mut dash,
        r#"["real_time_data",{"metrics":{"cpu_usage":1,"memory_usage":2,"network_activity":3,"chart_history":{"labels":["12:00:00","12:00:01"],"cpu":[1,5],"memory":[2,6],"network_rx":[3,7]}},"processes":[]}]"#,
    );
    assert!(!handle_key(&mut dash, key(KeyCode::Left)));
    let text = draw(&dash, 120, 30);
    assert!(text.contains("12:00:01"), "{text}");
    assert!(text.contains("CPU Usage: 5.0%"), "{text}");
}

#[test]
fn quit_keys() {
    let mut dash = Dashboard::default();
    assert!(handle_key(&mut dash, key(KeyCode::Char('q'))));
    assert!(handle_key(&mut dash, key(KeyCode::Esc)));
    assert!(handle_key(
        &mut dash,
        KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)
    ));
    assert!(!handle_key(&mut dash, key(KeyCode::Char('s'))));
}

#[test]
fn tiny_terminal_does_not_panic() {
    let mut dash = Dashboard::default();
    dash.handle(ChannelEvent::Connected);
    let _ = draw(&dash, 10, 4);
}
