//! Logic Module - Inference pipeline & engines
//!
//! - `features/` - Pollutant layout and request readings
//! - `model/` - Scaler, regressors, and the averaging ensemble
//! - `artifacts/` - Per-city artifact loading and cache
//! - `category/` - AQI bands and advisories
//! - `gap/` - Per-pollutant gap analysis
//! - `pipeline` - One request end to end
//! - `catalog` - Batch artifact audit

pub mod features;
pub mod model;
pub mod artifacts;
pub mod category;
pub mod gap;
pub mod pipeline;
pub mod catalog;
