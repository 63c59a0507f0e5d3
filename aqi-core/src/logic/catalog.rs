//! Artifact Catalog - batch audit over many cities
//!
//! One city's failure never stops the batch; each outcome is recorded and
//! the caller decides what to do with it.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::logic::artifacts::ArtifactStore;

/// Outcome for a single city
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum CityStatus {
    Ready {
        /// SHA-256 per artifact file
        fingerprints: BTreeMap<String, String>,
    },
    Failed {
        code: String,
        error: String,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CityOutcome {
    pub city: String,
    #[serde(flatten)]
    pub status: CityStatus,
}

impl CityOutcome {
    pub fn is_ready(&self) -> bool {
        matches!(self.status, CityStatus::Ready { .. })
    }
}

/// Collected outcomes of one batch
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BatchReport {
    pub outcomes: Vec<CityOutcome>,
}

impl BatchReport {
    pub fn ready_count(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_ready()).count()
    }

    pub fn failed_count(&self) -> usize {
        self.outcomes.len() - self.ready_count()
    }

    pub fn all_ready(&self) -> bool {
        self.failed_count() == 0
    }

    pub fn failed(&self) -> impl Iterator<Item = &CityOutcome> {
        self.outcomes.iter().filter(|o| !o.is_ready())
    }
}

/// Load every city through the store (warming its cache) and report per city
pub fn audit<I, S>(store: &ArtifactStore, cities: I) -> BatchReport
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut report = BatchReport::default();

    for city in cities {
        let city = city.as_ref();
        log::info!("Checking artifacts for {}...", city);

        let status = match store.load(city) {
            Ok(set) => {
                log::info!("{} artifacts ready", city);
                CityStatus::Ready {
                    fingerprints: set.metadata.fingerprints.clone(),
                }
            }
            Err(e) => {
                log::warn!("Error loading {}: {}", city, e);
                CityStatus::Failed {
                    code: e.code().to_string(),
                    error: e.to_string(),
                }
            }
        };

        report.outcomes.push(CityOutcome {
            city: city.to_string(),
            status,
        });
    }

    log::info!(
        "Artifact audit finished: {} ready, {} failed",
        report.ready_count(),
        report.failed_count()
    );

    report
}

/// Audit the store's configured cities (or the ones already cached, if unrestricted)
pub fn audit_known(store: &ArtifactStore) -> BatchReport {
    let cities = store.known_cities().unwrap_or_else(|| store.cached_cities());
    audit(store, cities)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support;

    #[test]
    fn test_partial_failure_continues() {
        let (store, _dir) = test_support::fs_store(&["warangal", "rajendranagar"]);

        let report = audit(&store, ["warangal", "palwancha", "rajendranagar"]);

        assert_eq!(report.outcomes.len(), 3);
        assert_eq!(report.ready_count(), 2);
        assert_eq!(report.failed_count(), 1);
        assert!(!report.all_ready());

        let failed: Vec<&str> = report.failed().map(|o| o.city.as_str()).collect();
        assert_eq!(failed, vec!["palwancha"]);
        match &report.outcomes[1].status {
            CityStatus::Failed { code, .. } => assert_eq!(code, "artifact_not_found"),
            other => panic!("unexpected: {:?}", other),
        }

        assert!(store.is_cached("warangal"));
        assert!(store.is_cached("rajendranagar"));
    }

    #[test]
    fn test_ready_outcome_has_fingerprints() {
        let (store, _dir) = test_support::fs_store(&["warangal"]);
        let report = audit(&store, ["warangal"]);

        match &report.outcomes[0].status {
            CityStatus::Ready { fingerprints } => {
                assert_eq!(fingerprints.len(), 5);
                assert!(fingerprints.contains_key("warangal_scaler.json"));
            }
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn test_audit_known_uses_configured_cities() {
        let (store, _dir) = test_support::fs_store(&["warangal"]);
        let store = store.with_known_cities(["warangal", "palwancha"]);

        let report = audit_known(&store);
        let cities: Vec<&str> = report.outcomes.iter().map(|o| o.city.as_str()).collect();
        assert_eq!(cities, vec!["palwancha", "warangal"]);
        assert_eq!(report.ready_count(), 1);
    }

    #[test]
    fn test_outcome_json_shape() {
        let outcome = CityOutcome {
            city: "palwancha".into(),
            status: CityStatus::Failed {
                code: "artifact_not_found".into(),
                error: "No trained models found for city 'palwancha'".into(),
            },
        };
        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(json["city"], "palwancha");
        assert_eq!(json["status"], "failed");
        assert_eq!(json["code"], "artifact_not_found");
    }
}
