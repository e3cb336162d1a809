//! TUI Runner - main event loop.
//!
//! The `TuiRunner` owns the terminal, app, event handler and the receiver the
//! polling loop publishes to. It runs the main loop:
//! render → handle terminal event → drain poll events → sync → repeat.

use log::info;
use tokio::sync::mpsc;

use super::Tui;
use super::app::App;
use super::events::{Event, EventHandler};
use super::views::render;
use crate::poller::PollEvent;
use eyre::Result;

/// Main TUI runner that owns the event loop.
pub struct TuiRunner {
    terminal: Tui,
    app: App,
    event_handler: EventHandler,
    poll_events: mpsc::UnboundedReceiver<PollEvent>,
}

impl TuiRunner {
    pub fn new(
        terminal: Tui,
        app: App,
        poll_events: mpsc::UnboundedReceiver<PollEvent>,
        tick_rate_ms: u64,
    ) -> Self {
        Self {
            terminal,
            app,
            event_handler: EventHandler::new(tick_rate_ms),
            poll_events,
        }
    }

    /// Run the main TUI loop until the user quits.
    pub async fn run(&mut self) -> Result<()> {
        info!("Starting TUI main loop");

        loop {
            self.terminal.draw(|f| render(self.app.state(), f))?;

            match self.event_handler.next().await? {
                Event::Key(key) => {
                    if self.app.handle_key(key) {
                        break;
                    }
                }
                Event::Tick | Event::Resize(_, _) => {}
            }

            drain_poll_events(&mut self.app, &mut self.poll_events);
            self.app.sync();

            if self.app.state().should_quit {
                break;
            }
        }

        self.app.shutdown().await;
        info!("TUI main loop ended");
        Ok(())
    }
}

/// Apply every poll event that is already waiting
fn drain_poll_events(app: &mut App, events: &mut mpsc::UnboundedReceiver<PollEvent>) -> usize {
    let mut applied = 0;
    while let Ok(event) = events.try_recv() {
        app.handle_poll_event(event);
        applied += 1;
    }
    applied
}
