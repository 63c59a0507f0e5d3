//! Data models

pub mod predict;

pub use predict::*;
