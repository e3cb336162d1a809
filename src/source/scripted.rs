//! In-memory operation source.
//!
//! Replays a fixed script of replies, cycling back to the start once the
//! script is exhausted. Counts fetches so callers can assert how many polls
//! actually happened.

use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;

use super::OperationSource;
use crate::domain::OperationRecord;
use crate::error::{Result, ZephyrError};

/// One scripted reply
#[derive(Debug, Clone)]
enum Reply {
    Record(OperationRecord),
    Fail(String),
}

/// Source that replays scripted replies
#[derive(Debug, Default)]
pub struct ScriptedSource {
    replies: Mutex<Vec<Reply>>,
    fetches: AtomicUsize,
    latency: Option<Duration>,
}

impl ScriptedSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a record to the script
    pub fn with_record(self, record: OperationRecord) -> Self {
        self.push(Reply::Record(record))
    }

    /// Append a fetch failure to the script
    pub fn with_failure(self, message: impl Into<String>) -> Self {
        self.push(Reply::Fail(message.into()))
    }

    /// Delay every fetch by `latency`
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    /// Number of fetches started so far
    pub fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }

    fn push(self, reply: Reply) -> Self {
        if let Ok(mut replies) = self.replies.lock() {
            replies.push(reply);
        }
        self
    }

    fn reply_for(&self, index: usize) -> Option<Reply> {
        let replies = self.replies.lock().ok()?;
        if replies.is_empty() {
            return None;
        }
        Some(replies[index % replies.len()].clone())
    }
}

#[async_trait]
impl OperationSource for ScriptedSource {
    async fn fetch(&self) -> Result<OperationRecord> {
        let index = self.fetches.fetch_add(1, Ordering::SeqCst);

        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }

        match self.reply_for(index) {
            Some(Reply::Record(record)) => Ok(record),
            Some(Reply::Fail(message)) => Err(ZephyrError::Fetch(message)),
            None => Err(ZephyrError::Fetch("script is empty".to_string())),
        }
    }

    fn describe(&self) -> String {
        "scripted".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_replays_in_order_and_cycles() {
        let source = ScriptedSource::new()
            .with_record(OperationRecord::new(1, 2, "+"))
            .with_record(OperationRecord::new(3, 4, "*"));

        assert_eq!(source.fetch().await.unwrap(), OperationRecord::new(1, 2, "+"));
        assert_eq!(source.fetch().await.unwrap(), OperationRecord::new(3, 4, "*"));
        assert_eq!(source.fetch().await.unwrap(), OperationRecord::new(1, 2, "+"));
        assert_eq!(source.fetch_count(), 3);
    }

    #[tokio::test]
    async fn test_scripted_failure() {
        let source = ScriptedSource::new().with_failure("boom");
        let err = source.fetch().await.unwrap_err();
        assert!(matches!(err, ZephyrError::Fetch(ref m) if m == "boom"));
    }

    #[tokio::test]
    async fn test_empty_script_fails() {
        let source = ScriptedSource::new();
        assert!(source.fetch().await.is_err());
        assert_eq!(source.fetch_count(), 1);
    }
}
