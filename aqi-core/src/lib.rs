//! AQI Estimator - Core
//!
//! Per-city ensemble inference over pollutant readings, AQI banding,
//! advisory lookup, and pollutant gap analysis.

pub mod constants;
pub mod error;
pub mod logic;

#[cfg(test)]
pub(crate) mod test_support;

pub use error::{AqiError, AqiResult};
pub use logic::artifacts::{ArtifactStore, FsArtifactSource, ModelArtifactSet};
pub use logic::catalog::{audit, BatchReport, CityOutcome, CityStatus};
pub use logic::category::{categorize, resolve, AqiCategory};
pub use logic::features::{Pollutant, PollutantReadings};
pub use logic::gap::{analyze, GapFinding};
pub use logic::pipeline::{assess, assess_with, AqiReport, AssessmentRequest};
