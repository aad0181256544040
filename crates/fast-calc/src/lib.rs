//! Fast Calc - arithmetic on selected page text
//!
//! Select a number on any page and a small popup appears next to the
//! pointer with that number as the first operand. Type or select a second
//! number, click an operator, and the rounded result is shown in place.
//!
//! The popup logic is a headless state machine ([`popup::PopupController`])
//! that renders to a declarative element tree. The browser glue (feature
//! `wasm`) mounts that tree into the page; tests mount it into
//! [`wasm::MockDom`] instead.
//!
//! # Example
//!
//! ```rust
//! use fast_calc::prelude::*;
//!
//! assert_eq!(calculate(10.0, 3.0, Operation::Divide).unwrap(), 3.33);
//! assert_eq!(calculate_symbol(50.0, 30.0, "%").unwrap(), 15.0);
//! assert!(calculate_symbol(1.0, 2.0, "^").is_err());
//!
//! let mut driver = WasmDriver::new();
//! driver.select_text("Total: $1,234.50", 40, 40);
//! assert_eq!(driver.field_value(Field::First).as_deref(), Some("1234.5"));
//! ```

#![cfg_attr(
    test,
    allow(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::panic,
        clippy::float_cmp
    )
)]
#![deny(missing_docs)]
#![deny(missing_debug_implementations)]

pub mod config;
pub mod core;
pub mod driver;
pub mod popup;
pub mod quick;

/// DOM layer - always available for testing
/// (Mock DOM allows driving the popup without browser bindings)
pub mod wasm;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::config::{ConfigError, PopupConfig};
    pub use crate::core::numeric::{extract_selection_number, format_number, parse_float};
    pub use crate::core::{
        calculate, calculate_symbol, CalcError, CalcResult, DivisionPolicy, Evaluator, Operation,
    };
    pub use crate::driver::PopupDriver;
    pub use crate::popup::{Field, Outcome, PopupController, PopupEvent, Position};
    pub use crate::quick::QuickForm;
    pub use crate::wasm::{DomElement, DomEvent, MockDom, WasmDriver};
}
