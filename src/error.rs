//! Error kinds for the stack core.
//!
//! None of these are fatal: callers recover by treating the input as empty,
//! skipping the offending reference, or keeping the previous value.

use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum StackError {
    /// The durable slot holds data that is not a valid serialized stack.
    #[error("stored stack is corrupt: {reason}")]
    CorruptState { reason: String },

    /// A synergy, template or stack entry names a food the catalog lacks.
    #[error("food '{food_id}' is not in the catalog")]
    MissingReference { food_id: String },

    /// Multiplier outside [0.5, 5] or not a finite number.
    #[error("multiplier {value} is outside [0.5, 5]")]
    InvalidMultiplier { value: f64 },
}

impl StackError {
    pub fn corrupt(reason: impl Into<String>) -> Self {
        StackError::CorruptState {
            reason: reason.into(),
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ExportError {
    #[error("your food stack is empty")]
    EmptyStack,
}
