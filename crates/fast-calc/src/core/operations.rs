//! Two-operand arithmetic behind every operator button
//!
//! `+ - *` are plain IEEE arithmetic. `/` rounds to cents and maps a zero
//! divisor to `+Infinity` unless the evaluator is told otherwise. `%` is
//! "A percent of B", not a remainder.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::core::{CalcError, CalcResult};

/// Type-safe operation enum, one variant per popup button
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    /// Addition (+)
    Add,
    /// Subtraction (-)
    Subtract,
    /// Multiplication (*)
    Multiply,
    /// Division (/), rounded to two decimals
    Divide,
    /// Percentage (%): `a * b / 100`
    Percent,
}

impl Operation {
    /// All operations in button order
    pub const ALL: [Self; 5] = [
        Self::Add,
        Self::Subtract,
        Self::Multiply,
        Self::Divide,
        Self::Percent,
    ];

    /// Returns the operator symbol, also used as the button's `data-op`
    #[must_use]
    pub const fn symbol(&self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Subtract => "-",
            Self::Multiply => "*",
            Self::Divide => "/",
            Self::Percent => "%",
        }
    }

    /// Looks up an operation by its symbol
    pub fn from_symbol(symbol: &str) -> CalcResult<Self> {
        Self::ALL
            .into_iter()
            .find(|op| op.symbol() == symbol)
            .ok_or_else(|| CalcError::InvalidOperator(symbol.to_string()))
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// What `/` does with a zero divisor
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DivisionPolicy {
    /// Return `+Infinity`
    #[default]
    Infinity,
    /// Fail with [`CalcError::DivisionByZero`]
    Error,
}

/// Evaluator for a single `a op b` step
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Evaluator {
    division: DivisionPolicy,
}

impl Evaluator {
    /// Creates an evaluator with the default (`+Infinity`) division policy
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an evaluator with an explicit division policy
    #[must_use]
    pub fn with_division_policy(division: DivisionPolicy) -> Self {
        Self { division }
    }

    /// Returns the division policy
    #[must_use]
    pub fn division_policy(&self) -> DivisionPolicy {
        self.division
    }

    /// Performs an operation on two operands
    pub fn calculate(&self, a: f64, b: f64, op: Operation) -> CalcResult<f64> {
        match op {
            Operation::Add => Ok(a + b),
            Operation::Subtract => Ok(a - b),
            Operation::Multiply => Ok(a * b),
            Operation::Divide => self.divide(a, b),
            Operation::Percent => Ok((a * b) / 100.0),
        }
    }

    /// Performs an operation given by its raw symbol
    pub fn calculate_symbol(&self, a: f64, b: f64, symbol: &str) -> CalcResult<f64> {
        self.calculate(a, b, Operation::from_symbol(symbol)?)
    }

    fn divide(&self, a: f64, b: f64) -> CalcResult<f64> {
        // -0.0 == 0.0, so a negative zero divisor takes this branch too
        if b == 0.0 {
            return match self.division {
                DivisionPolicy::Infinity => Ok(f64::INFINITY),
                DivisionPolicy::Error => Err(CalcError::DivisionByZero),
            };
        }
        Ok(round_to_cents(a / b))
    }
}

/// `calculate` with the default division policy
pub fn calculate(a: f64, b: f64, op: Operation) -> CalcResult<f64> {
    Evaluator::new().calculate(a, b, op)
}

/// `calculate_symbol` with the default division policy
pub fn calculate_symbol(a: f64, b: f64, symbol: &str) -> CalcResult<f64> {
    Evaluator::new().calculate_symbol(a, b, symbol)
}

/// Rounds to two decimals, ties away from zero.
///
/// Fixed-precision formatting rounds exact ties to even, so those are
/// handled separately. A value sits exactly on a cent boundary only when
/// it is an odd multiple of 1/8.
fn round_to_cents(value: f64) -> f64 {
    if !value.is_finite() {
        return value;
    }
    let eighths = value * 8.0;
    if eighths.fract() == 0.0 && eighths % 2.0 != 0.0 {
        return (value * 100.0).round() / 100.0;
    }
    format!("{value:.2}").parse().unwrap_or(value)
}
