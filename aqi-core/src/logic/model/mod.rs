//! Model Module - Inference Engine
//!
//! Pure-Rust inference for the artifacts the training side exports:
//! scaler, tree ensembles, SVR, and the averaging ensemble on top.

pub mod scaler;
pub mod tree;
pub mod regressors;
pub mod svr;
pub mod ensemble;

// Re-export common types
pub use scaler::{normalize, StandardScaler};
pub use tree::{RegressionTree, SplitRule, TreeArrays};
pub use regressors::{
    GradientBoostingRegressor, ModelKind, RandomForestRegressor, Regressor, RegressorArtifact,
    XgbRegressor,
};
pub use svr::{Kernel, SvrRegressor};
pub use ensemble::{predict, EnsemblePrediction, ModelOutput, MODEL_COUNT};
