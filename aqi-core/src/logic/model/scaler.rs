//! Feature Normalizer
//!
//! Applies the per-city standardization fitted at training time:
//! `(x - mean) / scale`, feature by feature, in layout order.

use serde::{Deserialize, Serialize};

use crate::logic::features::layout::{self, FEATURE_COUNT, FEATURE_LAYOUT};

/// Fitted standard scaler (mean / standard deviation per feature)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StandardScaler {
    pub mean: Vec<f64>,
    pub scale: Vec<f64>,

    /// Column names the scaler was fitted on, if the exporter recorded them
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feature_names: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feature_version: Option<u8>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub layout_hash: Option<u32>,
}

impl StandardScaler {
    pub fn new(mean: [f64; FEATURE_COUNT], scale: [f64; FEATURE_COUNT]) -> Self {
        Self {
            mean: mean.to_vec(),
            scale: scale.to_vec(),
            feature_names: Some(FEATURE_LAYOUT.iter().map(|s| s.to_string()).collect()),
            feature_version: Some(layout::FEATURE_VERSION),
            layout_hash: Some(layout::layout_hash()),
        }
    }

    /// Identity transform, for tests and unscaled models
    pub fn identity() -> Self {
        Self::new([0.0; FEATURE_COUNT], [1.0; FEATURE_COUNT])
    }

    /// Structural checks run once at load
    pub fn validate(&self) -> Result<(), String> {
        if self.mean.len() != FEATURE_COUNT || self.scale.len() != FEATURE_COUNT {
            return Err(format!(
                "expected {} features, got mean={} scale={}",
                FEATURE_COUNT,
                self.mean.len(),
                self.scale.len()
            ));
        }

        if self.mean.iter().chain(self.scale.iter()).any(|v| !v.is_finite()) {
            return Err("non-finite mean or scale".to_string());
        }

        if let Some(names) = &self.feature_names {
            if !layout::matches_layout(names) {
                return Err(format!(
                    "feature order {:?} does not match {:?}",
                    names, FEATURE_LAYOUT
                ));
            }
        }

        if self.feature_version.is_some() || self.layout_hash.is_some() {
            let version = self.feature_version.unwrap_or(layout::FEATURE_VERSION);
            let hash = self.layout_hash.unwrap_or_else(layout::layout_hash);
            layout::validate_layout(version, hash).map_err(|e| e.to_string())?;
        }

        Ok(())
    }

    /// Scale a raw feature vector
    ///
    /// Zero scale entries (constant training columns) divide by 1.
    pub fn transform(&self, raw: &[f64; FEATURE_COUNT]) -> [f64; FEATURE_COUNT] {
        let mut scaled = [0.0f64; FEATURE_COUNT];

        for i in 0..FEATURE_COUNT {
            let mean = self.mean.get(i).copied().unwrap_or(0.0);
            let scale = match self.scale.get(i).copied() {
                Some(s) if s != 0.0 => s,
                _ => 1.0,
            };
            scaled[i] = (raw[i] - mean) / scale;
        }

        scaled
    }
}

/// Normalize raw readings with a city's fitted scaler
pub fn normalize(scaler: &StandardScaler, raw: &[f64; FEATURE_COUNT]) -> [f64; FEATURE_COUNT] {
    scaler.transform(raw)
}
