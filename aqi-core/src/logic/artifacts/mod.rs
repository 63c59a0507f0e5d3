//! Artifacts Module - per-city model artifacts
//!
//! - `key` - validated city addressing and file naming
//! - `source` - where artifacts come from, and the validating loader
//! - `store` - process-lifetime cache shared by all requests

pub mod key;
pub mod source;
pub mod store;
pub mod types;

// Re-export common types
pub use key::{ArtifactKey, ArtifactSlot};
pub use source::{fingerprint, load_set, ArtifactSource, FsArtifactSource, MemoryArtifactSource};
pub use store::ArtifactStore;
pub use types::{ArtifactMetadata, ModelArtifactSet};
