//! Popup configuration
//!
//! Every field has a default, so an empty JSON object is a valid config and
//! a host page only needs to spell out what it changes.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::{DivisionPolicy, Evaluator};

/// Errors raised while loading a [`PopupConfig`]
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The JSON could not be parsed
    #[error("Invalid popup config: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Configuration for the floating popup
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PopupConfig {
    /// Header title
    pub title: String,
    /// Distance in pixels between the pointer and the popup's top-left corner
    pub offset_px: i32,
    /// Stacking order of the overlay
    pub z_index: i32,
    /// Overlay opacity
    pub opacity: f64,
    /// Background of the active operator button
    pub active_background: String,
    /// What `/` does with a zero divisor
    pub division_by_zero: DivisionPolicy,
}

impl Default for PopupConfig {
    fn default() -> Self {
        Self {
            title: "Fast Calc".to_string(),
            offset_px: 10,
            z_index: 99999,
            opacity: 0.9,
            active_background: "#cde".to_string(),
            division_by_zero: DivisionPolicy::Infinity,
        }
    }
}

impl PopupConfig {
    /// Create a new config
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads a config from JSON, filling missing fields with defaults
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Set the header title
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Set the pointer offset
    #[must_use]
    pub fn with_offset(mut self, offset_px: i32) -> Self {
        self.offset_px = offset_px;
        self
    }

    /// Set the active button background
    #[must_use]
    pub fn with_active_background(mut self, color: impl Into<String>) -> Self {
        self.active_background = color.into();
        self
    }

    /// Set the division-by-zero policy
    #[must_use]
    pub fn with_division_policy(mut self, policy: DivisionPolicy) -> Self {
        self.division_by_zero = policy;
        self
    }

    /// Builds the evaluator this config asks for
    #[must_use]
    pub fn evaluator(&self) -> Evaluator {
        Evaluator::with_division_policy(self.division_by_zero)
    }
}
