//! Features Module - Pollutant feature schema and request readings
//!
//! `layout` is the contract with the training collaborator,
//! `readings` is the per-request input built on top of it.

pub mod layout;
pub mod readings;

// Re-export common types
pub use layout::{
    Pollutant, FEATURE_COUNT, FEATURE_LAYOUT, FEATURE_VERSION, OPTIMAL_THRESHOLDS,
};
pub use readings::{PollutantReading, PollutantReadings};
