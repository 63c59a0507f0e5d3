//! Ensemble Predictor
//!
//! Runs the four regressors of a city on the same scaled vector and takes
//! the unweighted arithmetic mean. No model is authoritative.

use serde::{Deserialize, Serialize};

use super::regressors::ModelKind;
use crate::error::AqiResult;
use crate::logic::artifacts::ModelArtifactSet;
use crate::logic::features::FEATURE_COUNT;

/// Number of models in a city's ensemble
pub const MODEL_COUNT: usize = 4;

/// One regressor's raw output
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ModelOutput {
    pub model: ModelKind,
    pub aqi: f64,
}

/// Raw outputs plus their mean
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EnsemblePrediction {
    pub outputs: [ModelOutput; MODEL_COUNT],
    pub average: f64,
}

impl EnsemblePrediction {
    /// Output of a given model
    pub fn output(&self, model: ModelKind) -> Option<f64> {
        self.outputs.iter().find(|o| o.model == model).map(|o| o.aqi)
    }
}

/// Predict AQI from an already scaled feature vector
pub fn predict(
    artifacts: &ModelArtifactSet,
    scaled: &[f64; FEATURE_COUNT],
) -> AqiResult<EnsemblePrediction> {
    let regressors = artifacts.regressors();

    let mut outputs = [ModelOutput { model: ModelKind::RandomForest, aqi: 0.0 }; MODEL_COUNT];
    for (slot, regressor) in outputs.iter_mut().zip(regressors.iter()) {
        *slot = ModelOutput {
            model: regressor.kind(),
            aqi: regressor.predict(scaled)?,
        };
    }

    let average = outputs.iter().map(|o| o.aqi).sum::<f64>() / MODEL_COUNT as f64;

    log::debug!(
        "Ensemble for {}: rf={:.3} xgb={:.3} gb={:.3} svr={:.3} -> {:.3}",
        artifacts.key,
        outputs[0].aqi,
        outputs[1].aqi,
        outputs[2].aqi,
        outputs[3].aqi,
        average
    );

    Ok(EnsemblePrediction { outputs, average })
}
