//! Application layer for triad
//!
//! This crate contains the solve use case, port definitions, and
//! application configuration. It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::BehaviorConfig;
pub use ports::{
    model_backend::{BackendError, ModelBackend},
    progress::{NoProgress, SolveProgressNotifier},
    solve_logger::{NoSolveLogger, SolveEvent, SolveLogger},
};
pub use use_cases::run_solve::{RunSolveUseCase, SolveError, SolveInput};
