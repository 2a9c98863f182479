//! The module contains the errors the engine can throw.
//!
//! The errors are:
//!
//! - [`MissingFields`] thrown when a new transaction lacks required fields.
//! - [`InvalidAmount`] thrown when an amount cannot be read as an integer.
//! - [`KeyNotFound`] thrown when no transaction has the requested id.
//! - [`IdsExhausted`] thrown when no id is left above the largest one used.
//!
//!  [`MissingFields`]: EngineError::MissingFields
//!  [`InvalidAmount`]: EngineError::InvalidAmount
//!  [`KeyNotFound`]: EngineError::KeyNotFound
//!  [`IdsExhausted`]: EngineError::IdsExhausted
use thiserror::Error;

/// Engine custom errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("Missing required fields: {}", .0.join(", "))]
    MissingFields(Vec<String>),
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),
    #[error("Transaction with ID {0} not found")]
    KeyNotFound(i64),
    #[error("No transaction ID available")]
    IdsExhausted,
}
