//! Artifact Store - per-city cache over an `ArtifactSource`
//!
//! Loaded sets live for the whole process and are never invalidated:
//! artifacts only change through offline retraining and a restart.
//! The cache lock is never held across I/O, and a failed load leaves the
//! cache untouched.

use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;

use parking_lot::RwLock;

use super::key::ArtifactKey;
use super::source::{load_set, ArtifactSource};
use super::types::ModelArtifactSet;
use crate::error::{AqiError, AqiResult};

pub struct ArtifactStore {
    source: Box<dyn ArtifactSource>,
    known_cities: Option<BTreeSet<String>>,
    cache: RwLock<HashMap<ArtifactKey, Arc<ModelArtifactSet>>>,
}

impl ArtifactStore {
    /// Store with no known-city restriction
    pub fn new(source: impl ArtifactSource + 'static) -> Self {
        Self {
            source: Box::new(source),
            known_cities: None,
            cache: RwLock::new(HashMap::new()),
        }
    }

    /// Restrict lookups to a configured set of cities
    ///
    /// An empty list lifts the restriction.
    pub fn with_known_cities<I, S>(mut self, cities: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let set: BTreeSet<String> = cities
            .into_iter()
            .map(|c| c.as_ref().trim().to_lowercase())
            .filter(|c| !c.is_empty())
            .collect();
        self.known_cities = if set.is_empty() { None } else { Some(set) };
        self
    }

    /// Known cities, if restricted
    pub fn known_cities(&self) -> Option<Vec<String>> {
        self.known_cities
            .as_ref()
            .map(|set| set.iter().cloned().collect())
    }

    /// Parse a city and check it against the known set
    pub fn key_for(&self, city: &str) -> AqiResult<ArtifactKey> {
        let key = ArtifactKey::parse(city)?;
        if let Some(known) = &self.known_cities {
            if !known.contains(key.city()) {
                log::warn!("Rejected unknown city '{}'", key);
                return Err(AqiError::not_found(key.city()));
            }
        }
        Ok(key)
    }

    /// Load a city's artifacts, from cache when possible
    pub fn load(&self, city: &str) -> AqiResult<Arc<ModelArtifactSet>> {
        let key = self.key_for(city)?;

        if let Some(hit) = self.cache.read().get(&key) {
            return Ok(Arc::clone(hit));
        }

        let set = load_set(self.source.as_ref(), &key)?;
        log::info!(
            "Loaded artifacts for '{}' from {}",
            key,
            self.source.describe()
        );

        // another request may have loaded the same city meanwhile, keep the first
        let mut cache = self.cache.write();
        let entry = cache.entry(key).or_insert_with(|| Arc::new(set));
        Ok(Arc::clone(entry))
    }

    pub fn is_cached(&self, city: &str) -> bool {
        match ArtifactKey::parse(city) {
            Ok(key) => self.cache.read().contains_key(&key),
            Err(_) => false,
        }
    }

    /// Cities currently in cache, sorted
    pub fn cached_cities(&self) -> Vec<String> {
        let mut cities: Vec<String> = self
            .cache
            .read()
            .keys()
            .map(|k| k.city().to_string())
            .collect();
        cities.sort();
        cities
    }
}

impl std::fmt::Debug for ArtifactStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ArtifactStore")
            .field("source", &self.source.describe())
            .field("known_cities", &self.known_cities)
            .field("cached", &self.cached_cities())
            .finish()
    }
}
