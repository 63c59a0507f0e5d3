//! Gap Module - per-pollutant comparison against optimal ceilings
//!
//! Depends only on the request's own readings, never on model artifacts.

pub mod types;
pub mod analyzer;

pub use types::GapFinding;
pub use analyzer::{analyze, EMISSIONS_SUGGESTION};
