//! Artifact addressing
//!
//! A city name never reaches the filesystem as raw text. It is normalized
//! and checked against a strict pattern first, which rules out separators
//! and `..` segments.

use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::constants::{ARTIFACT_EXTENSION, MAX_CITY_LEN};
use crate::error::{AqiError, AqiResult};
use crate::logic::model::ModelKind;

static CITY_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-z0-9][a-z0-9_-]*$").expect("city pattern is a valid regex")
});

/// Normalized city identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ArtifactKey {
    city: String,
}

impl ArtifactKey {
    /// Trim, lowercase, and validate a city name
    pub fn parse(raw: &str) -> AqiResult<Self> {
        let city = raw.trim().to_lowercase();

        if city.is_empty() {
            return Err(AqiError::invalid_input("city must not be empty"));
        }
        if city.chars().count() > MAX_CITY_LEN {
            return Err(AqiError::invalid_input(format!(
                "city must be at most {} characters",
                MAX_CITY_LEN
            )));
        }
        if !CITY_PATTERN.is_match(&city) {
            return Err(AqiError::invalid_input(format!(
                "city '{}' contains unsupported characters",
                raw.trim()
            )));
        }

        Ok(Self { city })
    }

    pub fn city(&self) -> &str {
        &self.city
    }

    /// File name of one artifact for this city
    pub fn file_name(&self, slot: ArtifactSlot) -> String {
        format!("{}_{}.{}", self.city, slot.suffix(), ARTIFACT_EXTENSION)
    }
}

impl fmt::Display for ArtifactKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.city)
    }
}

/// One of the five files that make up a city's artifact set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArtifactSlot {
    Scaler,
    Model(ModelKind),
}

impl ArtifactSlot {
    pub const ALL: [ArtifactSlot; 5] = [
        ArtifactSlot::Scaler,
        ArtifactSlot::Model(ModelKind::RandomForest),
        ArtifactSlot::Model(ModelKind::XgBoost),
        ArtifactSlot::Model(ModelKind::GradientBoosting),
        ArtifactSlot::Model(ModelKind::Svr),
    ];

    pub fn suffix(&self) -> &'static str {
        match self {
            ArtifactSlot::Scaler => "scaler",
            ArtifactSlot::Model(kind) => kind.file_suffix(),
        }
    }
}

impl fmt::Display for ArtifactSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArtifactSlot::Scaler => write!(f, "scaler"),
            ArtifactSlot::Model(kind) => write!(f, "{}", kind),
        }
    }
}
