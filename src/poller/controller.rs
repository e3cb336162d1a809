//! Start/stop controller for the polling loop.
//!
//! `Poller` owns at most one running `PollingLoop`. Starting creates a fresh
//! cancellation token and spawns the loop; stopping cancels the token and
//! discards it. Loop state and formatter choice are published through
//! `watch` channels so views can observe them.

use std::sync::Arc;
use std::time::Duration;

use log::{debug, error, info};
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use super::polling_loop::{DEFAULT_INTERVAL, PollEvent, PollingLoop};
use crate::domain::{FormatterChoice, LoopState};
use crate::source::OperationSource;

/// Configuration for the Poller
#[derive(Debug, Clone)]
pub struct PollerConfig {
    /// Delay between poll cycles
    pub interval: Duration,
    /// Formatter selected at startup
    pub format: FormatterChoice,
}

impl Default for PollerConfig {
    fn default() -> Self {
        Self {
            interval: DEFAULT_INTERVAL,
            format: FormatterChoice::default(),
        }
    }
}

/// The loop currently in flight
struct ActiveLoop {
    cancel: CancellationToken,
    handle: JoinHandle<()>,
}

/// Starts, stops and observes the single polling loop
pub struct Poller {
    source: Arc<dyn OperationSource>,
    interval: Duration,
    formatter_tx: watch::Sender<FormatterChoice>,
    state_tx: watch::Sender<LoopState>,
    events_tx: mpsc::UnboundedSender<PollEvent>,
    active: Option<ActiveLoop>,
}

impl Poller {
    /// Create a stopped poller and the receiver its loops publish to.
    pub fn new(
        source: Arc<dyn OperationSource>,
        config: PollerConfig,
    ) -> (Self, mpsc::UnboundedReceiver<PollEvent>) {
        let (formatter_tx, _) = watch::channel(config.format);
        let (state_tx, _) = watch::channel(LoopState::Stopped);
        let (events_tx, events_rx) = mpsc::unbounded_channel();

        let poller = Self {
            source,
            interval: config.interval,
            formatter_tx,
            state_tx,
            events_tx,
            active: None,
        };
        (poller, events_rx)
    }

    pub fn state(&self) -> LoopState {
        *self.state_tx.borrow()
    }

    /// Observe state changes
    pub fn subscribe_state(&self) -> watch::Receiver<LoopState> {
        self.state_tx.subscribe()
    }

    pub fn formatter(&self) -> FormatterChoice {
        *self.formatter_tx.borrow()
    }

    /// Select the formatter; applies from the next cycle on
    pub fn set_formatter(&self, choice: FormatterChoice) {
        info!("Formatter set to {}", choice);
        self.formatter_tx.send_replace(choice);
    }

    /// Advance to the next formatter and return it
    pub fn cycle_formatter(&self) -> FormatterChoice {
        let next = self.formatter().next();
        self.set_formatter(next);
        next
    }

    pub fn source_description(&self) -> String {
        self.source.describe()
    }

    /// Launch the loop. Returns false if one is already running.
    ///
    /// Must be called from within a tokio runtime.
    pub fn start(&mut self) -> bool {
        self.reap();
        if self.active.is_some() {
            debug!("Start requested while already running, ignoring");
            return false;
        }

        let cancel = CancellationToken::new();
        let polling = PollingLoop::new(
            Arc::clone(&self.source),
            self.formatter_tx.subscribe(),
            self.events_tx.clone(),
            self.interval,
        );
        let events = self.events_tx.clone();
        let token = cancel.clone();

        let handle = tokio::spawn(async move {
            if let Err(e) = polling.run(token).await {
                error!("Polling loop stopped: {}", e);
                let _ = events.send(PollEvent::Failed(e.to_string()));
            }
        });

        self.active = Some(ActiveLoop { cancel, handle });
        self.state_tx.send_replace(LoopState::Running);
        info!("Polling started");
        true
    }

    /// Signal the loop to stop. Returns false if nothing was running.
    pub fn stop(&mut self) -> bool {
        let Some(active) = self.active.take() else {
            return false;
        };
        active.cancel.cancel();
        self.state_tx.send_replace(LoopState::Stopped);
        info!("Polling stopped");
        true
    }

    /// Alternate between running and stopped; returns the new state
    pub fn toggle(&mut self) -> LoopState {
        self.reap();
        match self.state() {
            LoopState::Stopped => {
                self.start();
            }
            LoopState::Running => {
                self.stop();
            }
        }
        self.state()
    }

    /// Clear a loop that ended on its own (after a failure).
    ///
    /// Returns true if a finished loop was cleared.
    pub fn reap(&mut self) -> bool {
        let finished = self
            .active
            .as_ref()
            .is_some_and(|active| active.handle.is_finished());
        if finished {
            self.active = None;
            self.state_tx.send_replace(LoopState::Stopped);
            debug!("Reaped finished polling loop");
        }
        finished
    }

    /// Stop and wait for the loop task to exit
    pub async fn shutdown(&mut self) {
        if let Some(active) = self.active.take() {
            active.cancel.cancel();
            let _ = active.handle.await;
            self.state_tx.send_replace(LoopState::Stopped);
        }
    }
}

impl Drop for Poller {
    fn drop(&mut self) {
        if let Some(active) = &self.active {
            active.cancel.cancel();
        }
    }
}
