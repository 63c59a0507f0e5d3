//! Shared fixtures for unit tests

use std::fs;
use std::path::Path;

use tempfile::TempDir;

use crate::logic::artifacts::{
    ArtifactKey, ArtifactMetadata, ArtifactSlot, ArtifactStore, FsArtifactSource,
    MemoryArtifactSource, ModelArtifactSet,
};
use crate::logic::features::layout::layout_hash;
use crate::logic::model::{
    GradientBoostingRegressor, Kernel, ModelKind, RandomForestRegressor, RegressionTree,
    RegressorArtifact, StandardScaler, SvrRegressor, TreeArrays, XgbRegressor,
};

const N: usize = 6;

fn metadata(key: &ArtifactKey) -> ArtifactMetadata {
    ArtifactMetadata {
        city: key.city().to_string(),
        fingerprints: Default::default(),
        layout_hash: layout_hash(),
        source: "<fixture>".to_string(),
        loaded_at: chrono::Utc::now(),
    }
}

/// Set whose four models return fixed values `[rf, xgb, gb, svr]`
pub fn constant_set(city: &str, values: [f64; 4]) -> ModelArtifactSet {
    let key = ArtifactKey::parse(city).unwrap();
    let [rf, xgb, gb, svr] = values;

    ModelArtifactSet {
        scaler: StandardScaler::identity(),
        random_forest: RandomForestRegressor {
            n_features: N,
            trees: vec![RegressionTree::leaf(rf), RegressionTree::leaf(rf)],
        },
        xgboost: XgbRegressor {
            n_features: N,
            base_score: 0.0,
            trees: vec![RegressionTree::leaf(xgb)],
        },
        gradient_boosting: GradientBoostingRegressor {
            n_features: N,
            init_prediction: gb,
            learning_rate: 0.1,
            trees: vec![RegressionTree::leaf(0.0)],
        },
        svr: SvrRegressor {
            n_features: N,
            support_vectors: vec![vec![0.0; N]],
            dual_coef: vec![0.0],
            intercept: svr,
            kernel: Kernel::Linear,
        },
        metadata: metadata(&key),
        key,
    }
}

/// Small but non-trivial models, roughly shaped like a trained city
pub fn sample_set(city: &str) -> ModelArtifactSet {
    let key = ArtifactKey::parse(city).unwrap();

    // f0 (PM2.5) <= 0.5 ? (f1 (PM10) <= -0.2 ? 62 : 88) : 154
    let deep = RegressionTree::try_from(TreeArrays {
        feature: vec![0, 1, -2, -2, -2],
        threshold: vec![0.5, -0.2, -2.0, -2.0, -2.0],
        left_child: vec![1, 2, -1, -1, -1],
        right_child: vec![4, 3, -1, -1, -1],
        value: vec![0.0, 0.0, 62.0, 88.0, 154.0],
    })
    .unwrap();

    ModelArtifactSet {
        scaler: StandardScaler::new(
            [58.0, 96.0, 28.0, 11.5, 0.95, 42.0],
            [31.0, 44.0, 14.5, 6.2, 0.55, 21.0],
        ),
        random_forest: RandomForestRegressor {
            n_features: N,
            trees: vec![
                deep.clone(),
                RegressionTree::stump(0, 0.1, 70.0, 140.0),
                RegressionTree::stump(2, 0.0, 80.0, 120.0),
            ],
        },
        xgboost: XgbRegressor {
            n_features: N,
            base_score: 0.5,
            trees: vec![
                RegressionTree::stump(0, 0.3, 45.0, 90.0),
                RegressionTree::stump(1, 0.0, 25.0, 40.0),
                RegressionTree::stump(5, 1.0, 4.0, 12.0),
            ],
        },
        gradient_boosting: GradientBoostingRegressor {
            n_features: N,
            init_prediction: 104.0,
            learning_rate: 0.1,
            trees: vec![
                deep,
                RegressionTree::stump(0, 0.0, -180.0, 210.0),
                RegressionTree::stump(4, 0.4, -40.0, 35.0),
            ],
        },
        svr: SvrRegressor {
            n_features: N,
            support_vectors: vec![
                vec![-1.0, -1.0, -0.5, -0.5, -0.8, -0.3],
                vec![0.0, 0.1, 0.0, 0.2, 0.0, 0.1],
                vec![1.5, 1.2, 0.9, 0.6, 1.1, 0.4],
            ],
            dual_coef: vec![-38.0, 12.0, 45.0],
            intercept: 98.0,
            kernel: Kernel::Rbf { gamma: 1.0 / 6.0 },
        },
        metadata: metadata(&key),
        key,
    }
}

/// Serialized artifact files of a set, as the exporter writes them
pub fn artifact_files(set: &ModelArtifactSet) -> Vec<(String, Vec<u8>)> {
    let key = &set.key;
    let models = [
        RegressorArtifact::RandomForest(set.random_forest.clone()),
        RegressorArtifact::XgBoost(set.xgboost.clone()),
        RegressorArtifact::GradientBoosting(set.gradient_boosting.clone()),
        RegressorArtifact::Svr(set.svr.clone()),
    ];

    let mut files = vec![(
        key.file_name(ArtifactSlot::Scaler),
        serde_json::to_vec_pretty(&set.scaler).unwrap(),
    )];
    for (kind, model) in ModelKind::ALL.iter().zip(models.iter()) {
        files.push((
            key.file_name(ArtifactSlot::Model(*kind)),
            serde_json::to_vec_pretty(model).unwrap(),
        ));
    }
    files
}

pub fn write_memory_city(source: &MemoryArtifactSource, city: &str) {
    for (name, bytes) in artifact_files(&sample_set(city)) {
        source.insert(name, bytes);
    }
}

pub fn write_fs_city(dir: &Path, city: &str) {
    for (name, bytes) in artifact_files(&sample_set(city)) {
        fs::write(dir.join(name), bytes).unwrap();
    }
}

/// Unrestricted filesystem store over a fresh temp dir holding `cities`
pub fn fs_store(cities: &[&str]) -> (ArtifactStore, TempDir) {
    let dir = tempfile::tempdir().unwrap();
    for city in cities {
        write_fs_city(dir.path(), city);
    }
    let store = ArtifactStore::new(FsArtifactSource::new(dir.path()));
    (store, dir)
}
