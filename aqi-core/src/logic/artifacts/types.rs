//! Artifact Types
//!
//! Data structures only, loading lives in `source` and `store`.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::key::ArtifactKey;
use crate::logic::model::{
    GradientBoostingRegressor, RandomForestRegressor, Regressor, StandardScaler, SvrRegressor,
    XgbRegressor, MODEL_COUNT,
};

/// Provenance of a loaded artifact set
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArtifactMetadata {
    pub city: String,
    /// SHA-256 of each file, keyed by file name
    pub fingerprints: BTreeMap<String, String>,
    /// Feature layout hash the set is served with
    pub layout_hash: u32,
    /// Where the files came from (directory, memory, ...)
    pub source: String,
    pub loaded_at: DateTime<Utc>,
}

/// Scaler plus the four regressors of one city
///
/// Immutable once loaded; shared read-only between requests.
#[derive(Debug, Clone)]
pub struct ModelArtifactSet {
    pub key: ArtifactKey,
    pub scaler: StandardScaler,
    pub random_forest: RandomForestRegressor,
    pub xgboost: XgbRegressor,
    pub gradient_boosting: GradientBoostingRegressor,
    pub svr: SvrRegressor,
    pub metadata: ArtifactMetadata,
}

impl ModelArtifactSet {
    /// Regressors in ensemble order (rf, xgb, gb, svr)
    pub fn regressors(&self) -> [&dyn Regressor; MODEL_COUNT] {
        [
            &self.random_forest as &dyn Regressor,
            &self.xgboost,
            &self.gradient_boosting,
            &self.svr,
        ]
    }
}
