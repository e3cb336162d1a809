//! Operation record and evaluator.
//!
//! An `OperationRecord` is the payload fetched on every poll cycle: two integer
//! operands and an operator symbol. Evaluation is pure and always produces an
//! `f64`; integer operands are promoted before the operator is applied.

use serde::{Deserialize, Serialize};

use crate::error::{Result, ZephyrError};

/// Two operands and an operator symbol, as delivered by the remote endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperationRecord {
    /// Left operand
    #[serde(rename = "parm1")]
    pub a: i32,
    /// Right operand
    #[serde(rename = "parm2")]
    pub b: i32,
    /// Operator symbol: one of `+`, `-`, `*`, `/`
    pub op: String,
}

impl OperationRecord {
    pub fn new(a: i32, b: i32, op: impl Into<String>) -> Self {
        Self { a, b, op: op.into() }
    }

    /// Evaluate the record.
    ///
    /// Division by zero yields an IEEE-754 infinity or NaN rather than an error.
    pub fn evaluate(&self) -> Result<f64> {
        let (a, b) = (f64::from(self.a), f64::from(self.b));
        match self.op.as_str() {
            "+" => Ok(a + b),
            "-" => Ok(a - b),
            "*" => Ok(a * b),
            "/" => Ok(a / b),
            other => Err(ZephyrError::InvalidOperator(other.to_string())),
        }
    }
}

impl std::fmt::Display for OperationRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {} {}", self.a, self.op, self.b)
    }
}
