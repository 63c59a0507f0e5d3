//! Central Configuration Constants
//!
//! Single source of truth for all configuration defaults.
//! Environment variables override these at startup.

use std::path::PathBuf;

/// Default artifacts directory (relative to the working directory)
pub const DEFAULT_ARTIFACTS_DIR: &str = "models";

/// Cities the training collaborator produces artifacts for
pub const DEFAULT_CITIES: &[&str] = &["warangal", "palwancha", "rajendranagar"];

/// Artifact file extension
pub const ARTIFACT_EXTENSION: &str = "json";

/// Maximum accepted city identifier length
pub const MAX_CITY_LEN: usize = 64;

// ============================================
// Helper functions to read from env with fallback
// ============================================

/// Get artifacts directory from environment or use default
pub fn get_artifacts_dir() -> PathBuf {
    std::env::var("AQI_ARTIFACTS_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(DEFAULT_ARTIFACTS_DIR))
}

/// Get known cities from environment (comma separated) or use default
///
/// An empty value disables the known-city check.
pub fn get_known_cities() -> Vec<String> {
    match std::env::var("AQI_CITIES") {
        Ok(raw) => parse_city_list(&raw),
        Err(_) => DEFAULT_CITIES.iter().map(|c| c.to_string()).collect(),
    }
}

/// Split a comma separated list, lowercasing and dropping blanks
pub fn parse_city_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|c| c.trim().to_lowercase())
        .filter(|c| !c.is_empty())
        .collect()
}
