//! Configuration file loading

mod file_config;
mod loader;

pub use file_config::{
    BackendMode, FileBackendConfig, FileConfig, FileLoggingConfig, FileOutputConfig,
    FileSolveConfig,
};
pub use loader::ConfigLoader;
