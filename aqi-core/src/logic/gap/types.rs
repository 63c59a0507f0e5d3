//! Gap Finding Types

use serde::{Deserialize, Serialize};

use crate::logic::features::Pollutant;

/// Result of comparing one reading to its optimal ceiling
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GapFinding {
    pub pollutant: Pollutant,
    pub current: f64,
    pub threshold: f64,
    pub exceeds: bool,
    /// `max(0, current - threshold)`
    pub excess: f64,
    /// Rendered report line
    pub message: String,
    /// Mitigation hint, only for exceeding pollutants
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
}
