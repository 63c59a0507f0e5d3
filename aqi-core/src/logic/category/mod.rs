//! Category Module
//!
//! Maps an ensemble AQI to a severity band and the band to an advisory.
//!
//! ## Structure
//! - `types`: `AqiCategory`
//! - `rules`: breakpoints and advisory texts
//! - `classifier`: `categorize` and `resolve`
//!
//! ## Usage
//! ```
//! use aqi_core::logic::category::{categorize, resolve, AqiCategory};
//!
//! let category = categorize(72.5).unwrap();
//! assert_eq!(category, AqiCategory::Moderate);
//! assert!(resolve(category).starts_with("Air quality is acceptable"));
//! ```

pub mod types;
pub mod rules;
pub mod classifier;

// Re-export main types for convenience
pub use types::AqiCategory;
pub use rules::{
    AQI_BREAKPOINTS, GOOD_MAX, MODERATE_MAX, SENSITIVE_MAX, UNHEALTHY_MAX, VERY_UNHEALTHY_MAX,
};
pub use classifier::{categorize, resolve};
