//! The poll-evaluate-publish loop.
//!
//! Each cycle fetches one record, evaluates it, renders it with the formatter
//! selected at that moment, and publishes the text. Cycles are separated by a
//! fixed interval. The cancellation token is observed at the top of every
//! cycle, during the fetch, and during the interval wait; a cancelled cycle
//! never publishes.

use std::sync::Arc;
use std::time::Duration;

use log::{debug, info};
use tokio::sync::{mpsc, watch};
use tokio_util::sync::CancellationToken;

use crate::domain::{FormatterChoice, OperationRecord};
use crate::error::{Result, ZephyrError};
use crate::source::OperationSource;

/// Delay between cycles when none is configured
pub const DEFAULT_INTERVAL: Duration = Duration::from_millis(1000);

/// Something the loop reports to its listener
#[derive(Debug, Clone, PartialEq)]
pub enum PollEvent {
    /// A cycle produced a result
    Published(Published),
    /// The loop stopped because of a non-cancellation error
    Failed(String),
}

/// A single published result
#[derive(Debug, Clone, PartialEq)]
pub struct Published {
    /// The record that was evaluated
    pub record: OperationRecord,
    /// The value rendered with the formatter selected for this cycle
    pub text: String,
}

/// A cancellable fetch → evaluate → format → publish loop
pub struct PollingLoop {
    source: Arc<dyn OperationSource>,
    formatter: watch::Receiver<FormatterChoice>,
    events: mpsc::UnboundedSender<PollEvent>,
    interval: Duration,
}

impl PollingLoop {
    pub fn new(
        source: Arc<dyn OperationSource>,
        formatter: watch::Receiver<FormatterChoice>,
        events: mpsc::UnboundedSender<PollEvent>,
        interval: Duration,
    ) -> Self {
        Self {
            source,
            formatter,
            events,
            interval,
        }
    }

    /// Run until cancelled or until a cycle fails.
    ///
    /// Cancellation returns `Ok(())`; every other error is returned unchanged.
    pub async fn run(self, cancel: CancellationToken) -> Result<()> {
        info!("Polling {} every {:?}", self.source.describe(), self.interval);

        let outcome = self.run_until_error(&cancel).await;
        match outcome {
            Err(e) if e.is_cancelled() => {
                info!("Polling loop cancelled");
                Ok(())
            }
            Err(e) => Err(e),
            Ok(()) => Ok(()),
        }
    }

    async fn run_until_error(&self, cancel: &CancellationToken) -> Result<()> {
        loop {
            self.poll_once(cancel).await?;
            self.wait(cancel).await?;
        }
    }

    /// One cycle without the trailing wait.
    pub async fn poll_once(&self, cancel: &CancellationToken) -> Result<Published> {
        if cancel.is_cancelled() {
            return Err(ZephyrError::Cancelled);
        }

        let record = tokio::select! {
            biased;
            _ = cancel.cancelled() => return Err(ZephyrError::Cancelled),
            fetched = self.source.fetch() => fetched?,
        };

        let value = record.evaluate()?;
        let choice = *self.formatter.borrow();
        let text = choice.format(value);
        debug!("{} = {} ({})", record, text, choice);

        let published = Published { record, text };

        // Last check before the result becomes visible
        if cancel.is_cancelled() {
            return Err(ZephyrError::Cancelled);
        }

        // Nobody listening any more means nobody can ask us to stop either
        self.events
            .send(PollEvent::Published(published.clone()))
            .map_err(|_| ZephyrError::Cancelled)?;

        Ok(published)
    }

    async fn wait(&self, cancel: &CancellationToken) -> Result<()> {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => Err(ZephyrError::Cancelled),
            _ = tokio::time::sleep(self.interval) => Ok(()),
        }
    }
}
