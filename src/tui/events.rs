//! Terminal event source for the TUI.
//!
//! Key presses and resizes come from crossterm; when nothing happens within
//! the tick interval a `Tick` is produced so poll results still get drawn.

use crossterm::event::{self, Event as CrosstermEvent, KeyEvent, KeyEventKind};
use eyre::Result;
use std::time::Duration;

/// Unified terminal event
#[derive(Debug, Clone)]
pub enum Event {
    /// Key press
    Key(KeyEvent),
    /// Nothing happened within the tick interval
    Tick,
    /// Terminal resize
    Resize(u16, u16),
}

impl Event {
    /// Collapse a raw crossterm event; releases and other noise become ticks
    fn from_crossterm(raw: CrosstermEvent) -> Self {
        match raw {
            CrosstermEvent::Key(key) if key.kind == KeyEventKind::Press => Event::Key(key),
            CrosstermEvent::Resize(w, h) => Event::Resize(w, h),
            _ => Event::Tick,
        }
    }
}

/// Produces terminal events, one per call
pub struct EventHandler {
    tick_rate: Duration,
}

impl EventHandler {
    pub fn new(tick_rate_ms: u64) -> Self {
        Self {
            tick_rate: Duration::from_millis(tick_rate_ms),
        }
    }

    /// Wait at most one tick for the next event.
    ///
    /// crossterm polling blocks, so it runs on the blocking pool.
    pub async fn next(&self) -> Result<Event> {
        let tick_rate = self.tick_rate;

        let event = tokio::task::spawn_blocking(move || -> Result<Event> {
            if event::poll(tick_rate)? {
                Ok(Event::from_crossterm(event::read()?))
            } else {
                Ok(Event::Tick)
            }
        })
        .await??;

        Ok(event)
    }
}

impl Default for EventHandler {
    fn default() -> Self {
        Self::new(100)
    }
}
