//! Operation sources - where each poll cycle gets its record from.
//!
//! This module provides:
//! - OperationSource trait for fetch abstraction
//! - HttpSource backed by reqwest
//! - ScriptedSource, an in-memory source for tests and offline runs

pub mod http;
pub mod scripted;

use async_trait::async_trait;

use crate::domain::OperationRecord;
use crate::error::Result;

pub use http::{DEFAULT_URL, HttpSource, HttpSourceConfig};
pub use scripted::ScriptedSource;

/// Produces one operation record per call
#[async_trait]
pub trait OperationSource: Send + Sync {
    /// Fetch the next record
    async fn fetch(&self) -> Result<OperationRecord>;

    /// Short description for logs and the status line
    fn describe(&self) -> String;
}
