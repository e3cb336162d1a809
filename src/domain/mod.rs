//! Domain types for Zephyr
//!
//! This module contains the core domain types:
//! - OperationRecord: The two-operand, one-operator payload and its evaluator
//! - FormatterChoice: How an evaluated result is rendered
//! - LoopState: Whether the polling loop is running

pub mod format;
pub mod operation;
pub mod state;

pub use format::FormatterChoice;
pub use operation::OperationRecord;
pub use state::LoopState;
