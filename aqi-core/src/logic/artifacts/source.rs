//! Artifact Sources & Loader
//!
//! `ArtifactSource` abstracts where the five files of a city come from.
//! `load_set` turns them into a validated `ModelArtifactSet`, checking that
//! every file exists before reading any of them.

use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use parking_lot::RwLock;
use serde::de::DeserializeOwned;
use sha2::{Digest, Sha256};

use super::key::{ArtifactKey, ArtifactSlot};
use super::types::{ArtifactMetadata, ModelArtifactSet};
use crate::error::{AqiError, AqiResult};
use crate::logic::features::layout::layout_hash;
use crate::logic::model::{ModelKind, RegressorArtifact, StandardScaler};

// ============================================================================
// SOURCE TRAIT
// ============================================================================

/// Trait for artifact backends (directory, memory, ...)
pub trait ArtifactSource: Send + Sync {
    /// Slots that have no artifact for this key
    fn missing(&self, key: &ArtifactKey) -> Vec<ArtifactSlot>;

    /// Raw bytes of one artifact
    fn read(&self, key: &ArtifactKey, slot: ArtifactSlot) -> AqiResult<Vec<u8>>;

    /// Human readable location, for logs and metadata
    fn describe(&self) -> String;
}

impl<T: ArtifactSource + ?Sized> ArtifactSource for Arc<T> {
    fn missing(&self, key: &ArtifactKey) -> Vec<ArtifactSlot> {
        (**self).missing(key)
    }

    fn read(&self, key: &ArtifactKey, slot: ArtifactSlot) -> AqiResult<Vec<u8>> {
        (**self).read(key, slot)
    }

    fn describe(&self) -> String {
        (**self).describe()
    }
}

// ============================================================================
// FILESYSTEM SOURCE
// ============================================================================

/// Artifacts stored as `<city>_<suffix>.json` in one directory
#[derive(Debug, Clone)]
pub struct FsArtifactSource {
    root: PathBuf,
}

impl FsArtifactSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn path_for(&self, key: &ArtifactKey, slot: ArtifactSlot) -> PathBuf {
        self.root.join(key.file_name(slot))
    }
}

impl ArtifactSource for FsArtifactSource {
    fn missing(&self, key: &ArtifactKey) -> Vec<ArtifactSlot> {
        ArtifactSlot::ALL
            .iter()
            .copied()
            .filter(|slot| !self.path_for(key, *slot).is_file())
            .collect()
    }

    fn read(&self, key: &ArtifactKey, slot: ArtifactSlot) -> AqiResult<Vec<u8>> {
        let path = self.path_for(key, slot);
        fs::read(&path).map_err(|e| match e.kind() {
            // removed between the existence check and the read
            ErrorKind::NotFound => AqiError::not_found(key.city()),
            _ => AqiError::corrupt(key.file_name(slot), e),
        })
    }

    fn describe(&self) -> String {
        self.root.display().to_string()
    }
}

// ============================================================================
// MEMORY SOURCE
// ============================================================================

/// In-memory artifacts keyed by file name
#[derive(Debug, Default)]
pub struct MemoryArtifactSource {
    files: RwLock<HashMap<String, Vec<u8>>>,
    reads: AtomicUsize,
}

impl MemoryArtifactSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, file_name: impl Into<String>, bytes: impl Into<Vec<u8>>) {
        self.files.write().insert(file_name.into(), bytes.into());
    }

    /// Number of successful reads so far
    pub fn read_count(&self) -> usize {
        self.reads.load(Ordering::Relaxed)
    }
}

impl ArtifactSource for MemoryArtifactSource {
    fn missing(&self, key: &ArtifactKey) -> Vec<ArtifactSlot> {
        let files = self.files.read();
        ArtifactSlot::ALL
            .iter()
            .copied()
            .filter(|slot| !files.contains_key(&key.file_name(*slot)))
            .collect()
    }

    fn read(&self, key: &ArtifactKey, slot: ArtifactSlot) -> AqiResult<Vec<u8>> {
        let bytes = self
            .files
            .read()
            .get(&key.file_name(slot))
            .cloned()
            .ok_or_else(|| AqiError::not_found(key.city()))?;
        self.reads.fetch_add(1, Ordering::Relaxed);
        Ok(bytes)
    }

    fn describe(&self) -> String {
        "<memory>".to_string()
    }
}

// ============================================================================
// LOADER
// ============================================================================

/// SHA-256 of an artifact file, hex encoded
pub fn fingerprint(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    hex::encode(hasher.finalize())
}

/// Load and validate all five artifacts of a city
pub fn load_set(source: &dyn ArtifactSource, key: &ArtifactKey) -> AqiResult<ModelArtifactSet> {
    let missing = source.missing(key);
    if !missing.is_empty() {
        let names: Vec<String> = missing.iter().map(|s| key.file_name(*s)).collect();
        log::warn!(
            "Artifacts for '{}' incomplete in {}: missing {}",
            key,
            source.describe(),
            names.join(", ")
        );
        return Err(AqiError::not_found(key.city()));
    }

    let mut fingerprints = BTreeMap::new();

    let scaler: StandardScaler = read_json(source, key, ArtifactSlot::Scaler, &mut fingerprints)?;
    scaler
        .validate()
        .map_err(|e| AqiError::corrupt(key.file_name(ArtifactSlot::Scaler), e))?;

    let random_forest = match read_model(source, key, ModelKind::RandomForest, &mut fingerprints)? {
        RegressorArtifact::RandomForest(m) => m,
        other => return Err(kind_mismatch(key, ModelKind::RandomForest, other.kind())),
    };
    let xgboost = match read_model(source, key, ModelKind::XgBoost, &mut fingerprints)? {
        RegressorArtifact::XgBoost(m) => m,
        other => return Err(kind_mismatch(key, ModelKind::XgBoost, other.kind())),
    };
    let gradient_boosting =
        match read_model(source, key, ModelKind::GradientBoosting, &mut fingerprints)? {
            RegressorArtifact::GradientBoosting(m) => m,
            other => {
                return Err(kind_mismatch(key, ModelKind::GradientBoosting, other.kind()))
            }
        };
    let svr = match read_model(source, key, ModelKind::Svr, &mut fingerprints)? {
        RegressorArtifact::Svr(m) => m,
        other => return Err(kind_mismatch(key, ModelKind::Svr, other.kind())),
    };

    Ok(ModelArtifactSet {
        key: key.clone(),
        scaler,
        random_forest,
        xgboost,
        gradient_boosting,
        svr,
        metadata: ArtifactMetadata {
            city: key.city().to_string(),
            fingerprints,
            layout_hash: layout_hash(),
            source: source.describe(),
            loaded_at: chrono::Utc::now(),
        },
    })
}

fn read_json<T: DeserializeOwned>(
    source: &dyn ArtifactSource,
    key: &ArtifactKey,
    slot: ArtifactSlot,
    fingerprints: &mut BTreeMap<String, String>,
) -> AqiResult<T> {
    let file = key.file_name(slot);
    let bytes = source.read(key, slot)?;
    let value = serde_json::from_slice(&bytes).map_err(|e| AqiError::corrupt(file.clone(), e))?;
    fingerprints.insert(file, fingerprint(&bytes));
    Ok(value)
}

fn read_model(
    source: &dyn ArtifactSource,
    key: &ArtifactKey,
    kind: ModelKind,
    fingerprints: &mut BTreeMap<String, String>,
) -> AqiResult<RegressorArtifact> {
    let slot = ArtifactSlot::Model(kind);
    let artifact: RegressorArtifact = read_json(source, key, slot, fingerprints)?;
    artifact
        .as_regressor()
        .validate()
        .map_err(|e| AqiError::corrupt(key.file_name(slot), e))?;
    Ok(artifact)
}

fn kind_mismatch(key: &ArtifactKey, expected: ModelKind, found: ModelKind) -> AqiError {
    AqiError::corrupt(
        key.file_name(ArtifactSlot::Model(expected)),
        format!("expected a {} model, found {}", expected, found),
    )
}
