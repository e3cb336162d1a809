//! Polling module - the cancellable fetch/evaluate/publish loop.
//!
//! This module provides:
//! - PollingLoop: one interval-driven loop bound to a cancellation token
//! - Poller: start/stop/toggle control guaranteeing a single active loop
//! - ResultList: newest-first display sink

mod controller;
mod polling_loop;
mod results;

pub use controller::{Poller, PollerConfig};
pub use polling_loop::{DEFAULT_INTERVAL, PollEvent, PollingLoop, Published};
pub use results::ResultList;
