//! Regressors - the four model families of a city's ensemble
//!
//! Each file on disk carries a `kind` tag; the loader checks that the tag
//! matches the slot the file was read for.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::svr::SvrRegressor;
use super::tree::{RegressionTree, SplitRule};
use crate::error::{AqiError, AqiResult};
use crate::logic::features::FEATURE_COUNT;

// ============================================================================
// MODEL KIND
// ============================================================================

/// Ensemble slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModelKind {
    RandomForest,
    GradientBoosting,
    #[serde(rename = "xgboost")]
    XgBoost,
    Svr,
}

impl ModelKind {
    /// Ensemble evaluation order
    pub const ALL: [ModelKind; 4] = [
        ModelKind::RandomForest,
        ModelKind::XgBoost,
        ModelKind::GradientBoosting,
        ModelKind::Svr,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ModelKind::RandomForest => "random_forest",
            ModelKind::GradientBoosting => "gradient_boosting",
            ModelKind::XgBoost => "xgboost",
            ModelKind::Svr => "svr",
        }
    }

    /// File name suffix agreed with the training collaborator
    pub fn file_suffix(&self) -> &'static str {
        match self {
            ModelKind::RandomForest => "model",
            ModelKind::GradientBoosting => "gb_model",
            ModelKind::XgBoost => "xgb_model",
            ModelKind::Svr => "svm_model",
        }
    }
}

impl fmt::Display for ModelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ============================================================================
// REGRESSOR TRAIT
// ============================================================================

/// Trait for fitted regressors
pub trait Regressor: Send + Sync {
    fn kind(&self) -> ModelKind;

    /// Number of input features the model was fitted on
    fn n_features(&self) -> usize;

    /// Highest feature index the model reads
    fn max_feature(&self) -> Option<usize>;

    /// Raw prediction, `None` if `features` is too short for the model
    fn predict_raw(&self, features: &[f64]) -> Option<f64>;

    /// Structural checks run once at load
    fn validate(&self) -> Result<(), String>;

    /// Checked prediction on a scaled feature vector
    fn predict(&self, features: &[f64; FEATURE_COUNT]) -> AqiResult<f64> {
        let model = self.kind().as_str();

        if self.n_features() != FEATURE_COUNT {
            return Err(AqiError::inference(
                model,
                format!("expects {} features, got {}", self.n_features(), FEATURE_COUNT),
            ));
        }
        if let Some(max) = self.max_feature() {
            if max >= FEATURE_COUNT {
                return Err(AqiError::inference(
                    model,
                    format!("reads feature {} of {}", max, FEATURE_COUNT),
                ));
            }
        }

        let out = self
            .predict_raw(features)
            .ok_or_else(|| AqiError::inference(model, "input shorter than model features"))?;
        if !out.is_finite() {
            return Err(AqiError::inference(model, format!("non-finite output {}", out)));
        }
        Ok(out)
    }
}

fn validate_trees(trees: &[RegressionTree], n_features: usize) -> Result<(), String> {
    if trees.is_empty() {
        return Err("no trees".into());
    }
    for (i, tree) in trees.iter().enumerate() {
        if let Some(max) = tree.max_feature() {
            if max >= n_features {
                return Err(format!("tree {} splits on feature {} of {}", i, max, n_features));
            }
        }
    }
    Ok(())
}

fn trees_max_feature(trees: &[RegressionTree]) -> Option<usize> {
    trees.iter().filter_map(|t| t.max_feature()).max()
}

// ============================================================================
// RANDOM FOREST
// ============================================================================

/// Bagged regression trees; output is the mean of all trees
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RandomForestRegressor {
    pub n_features: usize,
    pub trees: Vec<RegressionTree>,
}

impl Regressor for RandomForestRegressor {
    fn kind(&self) -> ModelKind {
        ModelKind::RandomForest
    }

    fn n_features(&self) -> usize {
        self.n_features
    }

    fn max_feature(&self) -> Option<usize> {
        trees_max_feature(&self.trees)
    }

    fn predict_raw(&self, features: &[f64]) -> Option<f64> {
        let sum: f64 = self
            .trees
            .iter()
            .map(|t| t.predict(features, SplitRule::LessOrEqual))
            .sum::<Option<f64>>()?;
        Some(sum / self.trees.len() as f64)
    }

    fn validate(&self) -> Result<(), String> {
        validate_trees(&self.trees, self.n_features)
    }
}

// ============================================================================
// GRADIENT BOOSTING
// ============================================================================

/// Sequential boosted trees: `init + learning_rate * Σ tree`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradientBoostingRegressor {
    pub n_features: usize,
    pub init_prediction: f64,
    pub learning_rate: f64,
    pub trees: Vec<RegressionTree>,
}

impl Regressor for GradientBoostingRegressor {
    fn kind(&self) -> ModelKind {
        ModelKind::GradientBoosting
    }

    fn n_features(&self) -> usize {
        self.n_features
    }

    fn max_feature(&self) -> Option<usize> {
        trees_max_feature(&self.trees)
    }

    fn predict_raw(&self, features: &[f64]) -> Option<f64> {
        let boost: f64 = self
            .trees
            .iter()
            .map(|t| t.predict(features, SplitRule::LessOrEqual))
            .sum::<Option<f64>>()?;
        Some(self.init_prediction + self.learning_rate * boost)
    }

    fn validate(&self) -> Result<(), String> {
        if !self.init_prediction.is_finite() || !self.learning_rate.is_finite() {
            return Err("non-finite init_prediction or learning_rate".into());
        }
        validate_trees(&self.trees, self.n_features)
    }
}

// ============================================================================
// XGBOOST
// ============================================================================

/// Extreme gradient boosted trees: `base_score + Σ tree`
///
/// Leaf values already include the learning rate; splits use strict `<`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct XgbRegressor {
    pub n_features: usize,
    pub base_score: f64,
    pub trees: Vec<RegressionTree>,
}

impl Regressor for XgbRegressor {
    fn kind(&self) -> ModelKind {
        ModelKind::XgBoost
    }

    fn n_features(&self) -> usize {
        self.n_features
    }

    fn max_feature(&self) -> Option<usize> {
        trees_max_feature(&self.trees)
    }

    fn predict_raw(&self, features: &[f64]) -> Option<f64> {
        let boost: f64 = self
            .trees
            .iter()
            .map(|t| t.predict(features, SplitRule::Less))
            .sum::<Option<f64>>()?;
        Some(self.base_score + boost)
    }

    fn validate(&self) -> Result<(), String> {
        if !self.base_score.is_finite() {
            return Err("non-finite base_score".into());
        }
        validate_trees(&self.trees, self.n_features)
    }
}

// ============================================================================
// ARTIFACT ENVELOPE
// ============================================================================

/// On-disk regressor document, tagged by `kind`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RegressorArtifact {
    RandomForest(RandomForestRegressor),
    GradientBoosting(GradientBoostingRegressor),
    #[serde(rename = "xgboost")]
    XgBoost(XgbRegressor),
    Svr(SvrRegressor),
}

impl RegressorArtifact {
    pub fn kind(&self) -> ModelKind {
        self.as_regressor().kind()
    }

    pub fn as_regressor(&self) -> &dyn Regressor {
        match self {
            RegressorArtifact::RandomForest(m) => m,
            RegressorArtifact::GradientBoosting(m) => m,
            RegressorArtifact::XgBoost(m) => m,
            RegressorArtifact::Svr(m) => m,
        }
    }
}
