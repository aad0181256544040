//! Toolbar popup form
//!
//! The extension's own popup page has two number inputs, an operator
//! dropdown, a button and an output line. It shares the evaluator with the
//! selection popup, so `/` rounds and handles zero the same way in both.

use crate::core::numeric::{format_number, parse_float};
use crate::core::{CalcError, Evaluator};

/// ID of the first number input
pub const NUM1_ID: &str = "num1";
/// ID of the second number input
pub const NUM2_ID: &str = "num2";
/// ID of the operator dropdown
pub const OPERATION_ID: &str = "operation";
/// ID of the calculate button
pub const CALC_BUTTON_ID: &str = "calcBtn";
/// ID of the output line
pub const OUTPUT_ID: &str = "output";

/// Snapshot of the form's inputs
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuickForm {
    /// First number as typed
    pub num1: String,
    /// Second number as typed
    pub num2: String,
    /// Selected operator symbol
    pub operation: String,
}

impl QuickForm {
    /// Creates a form snapshot
    #[must_use]
    pub fn new(num1: &str, num2: &str, operation: &str) -> Self {
        Self {
            num1: num1.to_string(),
            num2: num2.to_string(),
            operation: operation.to_string(),
        }
    }

    /// Computes the text for the output line
    #[must_use]
    pub fn compute(&self, evaluator: &Evaluator) -> String {
        let (Some(a), Some(b)) = (parse_float(&self.num1), parse_float(&self.num2)) else {
            return CalcError::InvalidInput.display_message();
        };
        match evaluator.calculate_symbol(a, b, &self.operation) {
            Ok(value) => format!("=: {}", format_number(value)),
            Err(err) => err.display_message(),
        }
    }
}
