//! Core arithmetic for the selection popup
//!
//! Everything in here is pure: no DOM, no controller state. The popup
//! controller and the quick form both route through [`Evaluator`].

pub mod numeric;
mod operations;

pub use operations::{calculate, calculate_symbol, DivisionPolicy, Evaluator, Operation};

use thiserror::Error;

/// Result type for calculator operations
pub type CalcResult<T> = Result<T, CalcError>;

/// Calculator error types
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CalcError {
    /// Operator symbol outside `+ - * / %`
    #[error("Invalid operator")]
    InvalidOperator(String),
    /// Division by zero under [`DivisionPolicy::Error`]
    #[error("Division by zero")]
    DivisionByZero,
    /// A field did not hold a number
    #[error("Invalid input.")]
    InvalidInput,
}

impl CalcError {
    /// Text shown in the result line for this error.
    ///
    /// Field errors are shown bare, everything else is prefixed with `Error: `.
    #[must_use]
    pub fn display_message(&self) -> String {
        match self {
            Self::InvalidInput => self.to_string(),
            _ => format!("Error: {self}"),
        }
    }
}
