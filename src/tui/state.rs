//! Application state for the TUI.
//!
//! `AppState` is everything the views need to draw a frame. It is owned by
//! `App` and updated from key presses and poll events.

use chrono::{DateTime, Local};

use crate::domain::{FormatterChoice, LoopState};
use crate::poller::ResultList;

/// The primary application state.
#[derive(Debug, Default)]
pub struct AppState {
    /// Published results, newest first
    pub results: ResultList,
    /// Mirror of the poller's state, drives the toggle label
    pub loop_state: LoopState,
    /// Mirror of the selected formatter
    pub formatter: FormatterChoice,
    /// Number of newest results scrolled past
    pub scroll: usize,
    /// Where records come from
    pub source: String,
    /// When the last result arrived
    pub last_update: Option<DateTime<Local>>,
    /// Status line contents
    pub status: Option<StatusMessage>,
    /// Whether the application should quit
    pub should_quit: bool,
}

impl AppState {
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            ..Default::default()
        }
    }

    /// Formatted last-update time for the header
    pub fn last_update_string(&self) -> String {
        match self.last_update {
            Some(at) => at.format("%H:%M:%S").to_string(),
            None => "never".to_string(),
        }
    }

    pub fn set_info(&mut self, text: impl Into<String>) {
        self.status = Some(StatusMessage::info(text));
    }

    pub fn set_error(&mut self, text: impl Into<String>) {
        self.status = Some(StatusMessage::error(text));
    }

    /// Largest valid scroll offset
    pub fn max_scroll(&self) -> usize {
        self.results.len().saturating_sub(1)
    }
}

/// A line for the status bar
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    pub kind: StatusKind,
    pub text: String,
}

impl StatusMessage {
    pub fn info(text: impl Into<String>) -> Self {
        Self {
            kind: StatusKind::Info,
            text: text.into(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            kind: StatusKind::Error,
            text: text.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Info,
    Error,
}
