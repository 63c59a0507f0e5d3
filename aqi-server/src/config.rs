//! Configuration module

use std::env;
use std::path::PathBuf;

use aqi_core::constants;
use aqi_core::{ArtifactStore, FsArtifactSource};

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Server port
    pub port: u16,

    /// Directory holding `<city>_*.json` artifacts
    pub artifacts_dir: PathBuf,

    /// Cities accepted by the predict endpoints (empty = any city with artifacts)
    pub cities: Vec<String>,

    /// Load every configured city at startup
    pub preload: bool,

    /// Environment (development, production)
    pub environment: String,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self {
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),

            artifacts_dir: constants::get_artifacts_dir(),

            cities: constants::get_known_cities(),

            preload: env::var("AQI_PRELOAD")
                .map(|v| parse_flag(&v))
                .unwrap_or(true),

            environment: env::var("ENVIRONMENT")
                .unwrap_or_else(|_| "development".to_string()),
        }
    }

    /// Check if running in production
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    /// Filesystem artifact store for this configuration
    pub fn build_store(&self) -> ArtifactStore {
        ArtifactStore::new(FsArtifactSource::new(&self.artifacts_dir))
            .with_known_cities(&self.cities)
    }
}

fn parse_flag(raw: &str) -> bool {
    !matches!(
        raw.trim().to_lowercase().as_str(),
        "0" | "false" | "no" | "off"
    )
}
