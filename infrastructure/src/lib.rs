//! Infrastructure layer for triad
//!
//! This crate contains adapters that implement the ports defined in the
//! application layer: the two model backends, configuration file loading,
//! and the JSONL audit logger.

pub mod backends;
pub mod config;
pub mod logging;

// Re-export commonly used types
pub use backends::{
    fixture::{FixtureBackend, FixtureRule},
    openai::{OpenAiBackend, OpenAiBackendConfig},
};
pub use config::{BackendMode, ConfigLoader, FileBackendConfig, FileConfig};
pub use logging::JsonlSolveLogger;
