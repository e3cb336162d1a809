//! TUI Application
//!
//! Main application struct: owns the `Poller` and the view state, and applies
//! key actions and poll events to them.

use chrono::Local;
use crossterm::event::KeyEvent;
use log::info;
use tokio::sync::watch;

use super::input::{Action, action_for};
use super::state::AppState;
use crate::domain::LoopState;
use crate::poller::{PollEvent, Poller};

/// Main TUI application
pub struct App {
    /// Application state
    pub state: AppState,
    poller: Poller,
    loop_state: watch::Receiver<LoopState>,
    page_size: usize,
}

impl App {
    /// Create a new application around a stopped poller
    pub fn new(poller: Poller, page_size: usize) -> Self {
        let mut state = AppState::new(poller.source_description());
        state.formatter = poller.formatter();
        state.loop_state = poller.state();
        state.set_info("Press s to start polling");
        let loop_state = poller.subscribe_state();

        Self {
            state,
            poller,
            loop_state,
            page_size: page_size.max(1),
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn poller(&self) -> &Poller {
        &self.poller
    }

    /// Handle a key press. Returns true when quit was requested.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        if let Some(action) = action_for(&key) {
            self.apply(action);
        }
        self.state.should_quit
    }

    pub fn apply(&mut self, action: Action) {
        match action {
            Action::Toggle => self.toggle(),
            Action::CycleFormatter => {
                let choice = self.poller.cycle_formatter();
                self.state.formatter = choice;
                self.state.set_info(format!("Output format: {}", choice));
            }
            Action::ScrollUp => self.state.scroll = self.state.scroll.saturating_sub(1),
            Action::ScrollDown => self.state.scroll = (self.state.scroll + 1).min(self.state.max_scroll()),
            Action::PageUp => self.state.scroll = self.state.scroll.saturating_sub(self.page_size),
            Action::PageDown => {
                self.state.scroll = (self.state.scroll + self.page_size).min(self.state.max_scroll())
            }
            Action::Top => self.state.scroll = 0,
            Action::Quit => self.quit(),
        }
    }

    fn toggle(&mut self) {
        let state = self.poller.toggle();
        self.state.loop_state = state;
        if state.is_running() {
            self.state.set_info(format!("Polling {}", self.state.source));
        } else {
            self.state.set_info("Polling stopped");
        }
    }

    /// Apply an event published by the polling loop
    pub fn handle_poll_event(&mut self, event: PollEvent) {
        match event {
            PollEvent::Published(published) => {
                self.state.results.publish(published.text);
                // Keep a scrolled view anchored on the same entries
                if self.state.scroll > 0 {
                    self.state.scroll += 1;
                }
                self.state.last_update = Some(Local::now());
            }
            PollEvent::Failed(message) => {
                self.state.set_error(format!("Polling stopped: {}", message));
            }
        }
    }

    /// Pull the poller's state into the view state
    pub fn sync(&mut self) {
        self.poller.reap();
        if self.loop_state.has_changed().unwrap_or(false) {
            self.state.loop_state = *self.loop_state.borrow_and_update();
        }
        self.state.formatter = self.poller.formatter();
    }

    /// Request to quit; stops polling first
    pub fn quit(&mut self) {
        if self.poller.stop() {
            info!("Stopped polling on quit");
        }
        self.state.loop_state = self.poller.state();
        self.state.should_quit = true;
    }

    /// Stop polling and wait for the loop to exit
    pub async fn shutdown(&mut self) {
        self.poller.shutdown().await;
        self.state.loop_state = self.poller.state();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{FormatterChoice, OperationRecord};
    use crate::poller::{PollerConfig, Published};
    use crate::source::ScriptedSource;
    use crate::tui::state::StatusKind;
    use crossterm::event::{KeyCode, KeyModifiers};
    use std::sync::Arc;
    use std::time::Duration;
    use tokio::sync::mpsc::UnboundedReceiver;

    // The receiver must outlive the test or the loop ends on its first publish
    fn app() -> (App, UnboundedReceiver<PollEvent>) {
        let source = Arc::new(ScriptedSource::new().with_record(OperationRecord::new(6, 3, "+")));
        let (poller, events) = Poller::new(
            source,
            PollerConfig {
                interval: Duration::from_secs(30),
                format: FormatterChoice::Arithmetic,
            },
        );
        (App::new(poller, 5), events)
    }

    fn published(text: &str) -> PollEvent {
        PollEvent::Published(Published {
            record: OperationRecord::new(0, 0, "+"),
            text: text.to_string(),
        })
    }

    fn key(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE)
    }

    #[tokio::test]
    async fn test_app_creation() {
        let (app, _events) = app();
        assert_eq!(app.state().loop_state, LoopState::Stopped);
        assert_eq!(app.state().source, "scripted");
        assert!(!app.state().should_quit);
    }

    #[tokio::test]
    async fn test_toggle_key_starts_and_stops() {
        let (mut app, _events) = app();
        assert!(!app.handle_key(key('s')));
        assert_eq!(app.state().loop_state, LoopState::Running);
        assert_eq!(app.state().loop_state.button_label(), "STOP");

        app.handle_key(key('s'));
        assert_eq!(app.state().loop_state, LoopState::Stopped);
        assert_eq!(app.state().loop_state.button_label(), "START");
    }

    #[tokio::test]
    async fn test_formatter_key() {
        let (mut app, _events) = app();
        app.handle_key(key('f'));
        assert_eq!(app.state().formatter, FormatterChoice::Hex);
        assert_eq!(app.poller().formatter(), FormatterChoice::Hex);
    }

    #[tokio::test]
    async fn test_results_are_newest_first() {
        let (mut app, _events) = app();
        app.handle_poll_event(published("9"));
        app.handle_poll_event(published("0xFF"));
        assert_eq!(app.state().results.iter().collect::<Vec<_>>(), vec!["0xFF", "9"]);
        assert!(app.state().last_update.is_some());
    }

    #[tokio::test]
    async fn test_failure_sets_error_status() {
        let (mut app, _events) = app();
        app.handle_poll_event(PollEvent::Failed("Fetch failed: timeout".to_string()));
        let status = app.state().status.clone().unwrap();
        assert_eq!(status.kind, StatusKind::Error);
        assert!(status.text.contains("timeout"));
    }

    #[tokio::test]
    async fn test_scroll_is_clamped_and_anchored() {
        let (mut app, _events) = app();
        for i in 0..3 {
            app.handle_poll_event(published(&i.to_string()));
        }

        app.apply(Action::PageDown);
        assert_eq!(app.state().scroll, 2);
        app.apply(Action::ScrollDown);
        assert_eq!(app.state().scroll, 2);

        app.apply(Action::ScrollUp);
        assert_eq!(app.state().scroll, 1);
        app.handle_poll_event(published("3"));
        assert_eq!(app.state().scroll, 2);

        app.apply(Action::Top);
        assert_eq!(app.state().scroll, 0);
        app.apply(Action::PageUp);
        assert_eq!(app.state().scroll, 0);
    }

    #[tokio::test]
    async fn test_sync_follows_loop_that_stopped_on_its_own() {
        let source = Arc::new(ScriptedSource::new().with_failure("unreachable"));
        let (poller, mut events) = Poller::new(source, PollerConfig::default());
        let mut app = App::new(poller, 5);

        app.handle_key(key('s'));
        assert_eq!(app.state().loop_state, LoopState::Running);

        match tokio::time::timeout(Duration::from_secs(5), events.recv()).await.unwrap() {
            Some(PollEvent::Failed(message)) => assert!(message.contains("unreachable")),
            other => panic!("Expected Failed, got {:?}", other),
        }

        for _ in 0..100 {
            app.sync();
            if app.state().loop_state == LoopState::Stopped {
                break;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        assert_eq!(app.state().loop_state, LoopState::Stopped);
        assert_eq!(app.state().loop_state.button_label(), "START");
    }

    #[tokio::test]
    async fn test_quit_stops_polling() {
        let (mut app, _events) = app();
        app.handle_key(key('s'));
        assert!(app.handle_key(key('q')));
        assert_eq!(app.state().loop_state, LoopState::Stopped);
        app.shutdown().await;
    }
}
