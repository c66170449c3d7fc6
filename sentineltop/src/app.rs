//! App main loop: terminal setup, input handling, channel events, drawing.

use std::{
    io,
    time::{Duration, Instant},
};

use anyhow::Context;
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, layout::Rect, Terminal};
use tokio::sync::mpsc::{self, UnboundedReceiver};
use tokio::time::sleep;
use tracing::{info, warn};

use crate::dashboard::{Dashboard, DashboardConfig};
use crate::demo::{spawn_demo, DEMO_TICK};
use crate::types::ChannelEvent;
use crate::ui::layout::check_size;
use crate::ws::{spawn_channel, ChannelConfig};

// How long to wait for channel events before checking input again
const INPUT_POLL: Duration = Duration::from_millis(50);

/// Where events come from.
pub enum Source {
    Remote(ChannelConfig),
    Demo,
}

pub struct App {
    dash: Dashboard,
    window: usize,
    should_quit: bool,
}

impl App {
    pub fn new(cfg: DashboardConfig) -> Self {
        Self {
            dash: Dashboard::new(cfg),
            window: cfg.window,
            should_quit: false,
        }
    }

    pub async fn run(&mut self, source: Source) -> anyhow::Result<()> {
        // Fail before touching the terminal if the dashboard cannot fit.
        let (w, h) = crossterm::terminal::size().context("query terminal size")?;
        check_size(Rect::new(0, 0, w, h))?;

        let (tx, mut rx) = mpsc::unbounded_channel();
        let task = match source {
            Source::Remote(cfg) => {
                info!(url = %cfg.url, "starting channel");
                spawn_channel(cfg, tx)
            }
            Source::Demo => {
                info!("starting demo feed");
                spawn_demo(self.window, DEMO_TICK, tx)
            }
        };

        // Terminal setup
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;
        terminal.clear()?;

        // Main loop
        let res = self.event_loop(&mut terminal, &mut rx).await;

        // Teardown
        task.abort();
        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;

        res
    }

    async fn event_loop<B: ratatui::backend::Backend>(
        &mut self,
        terminal: &mut Terminal<B>,
        rx: &mut UnboundedReceiver<ChannelEvent>,
    ) -> anyhow::Result<()> {
        let mut dirty = true;
        let mut channel_open = true;
        loop {
            // Input (non-blocking)
            while event::poll(Duration::ZERO)? {
                match event::read()? {
                    Event::Key(k) if k.kind == KeyEventKind::Press => {
                        if handle_key(&mut self.dash, k) {
                            self.should_quit = true;
                        }
                        dirty = true;
                    }
                    Event::Resize(_, _) => dirty = true,
                    _ => {}
                }
            }
            if self.should_quit {
                break;
            }

            // Draw
            if dirty || self.dash.animating(Instant::now()) {
                terminal.draw(|f| self.dash.draw(f))?;
                dirty = false;
            }

            // Wait for the next pushed event (or the input poll interval)
            tokio::select! {
                ev = rx.recv(), if channel_open => match ev {
                    Some(ev) => {
                        dirty |= self.dash.handle(ev);
                        // Handlers run to completion in arrival order.
                        while let Ok(ev) = rx.try_recv() {
                            dirty |= self.dash.handle(ev);
                        }
                    }
                    None => {
                        warn!("event source stopped");
                        channel_open = false;
                    }
                },
                _ = sleep(INPUT_POLL) => {}
            }
        }

        Ok(())
    }
}

/// Apply one key press. Returns true when the user asked to quit.
pub fn handle_key(dash: &mut Dashboard, k: KeyEvent) -> bool {
    match k.code {
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => return true,
        KeyCode::Char('c') if k.modifiers.contains(KeyModifiers::CONTROL) => return true,
        KeyCode::Left => dash.move_cursor(-1),
        KeyCode::Right => dash.move_cursor(1),
        KeyCode::Home => dash.cursor_home(),
        KeyCode::End => dash.cursor_end(),
        KeyCode::Char('s') => dash.toggle_order(),
        KeyCode::Char('a') => {
            dash.acknowledge_alert();
        }
        KeyCode::Up => dash.scroll_alerts(-1),
        KeyCode::Down => dash.scroll_alerts(1),
        KeyCode::PageUp => dash.scroll_alerts(-10),
        KeyCode::PageDown => dash.scroll_alerts(10),
        _ => {}
    }
    false
}
