//! Core types for spam scoring

use crate::error::Result;
use serde::{Deserialize, Serialize};

/// Threshold applied when a caller does not supply one
pub const DEFAULT_THRESHOLD: f64 = 0.5;

/// Outcome of scoring one text.
///
/// `prediction` is always `propensity >= threshold` for the threshold the
/// score was produced with.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Score {
    /// Whether the text is classified as spam
    pub prediction: bool,

    /// Probability of the spam class (0.0-1.0)
    pub propensity: f64,
}

impl Score {
    /// Build a score by applying an inclusive threshold to a propensity
    pub fn from_propensity(propensity: f64, threshold: f64) -> Self {
        Self {
            prediction: propensity >= threshold,
            propensity,
        }
    }

    /// Render as the JSON response body
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}
