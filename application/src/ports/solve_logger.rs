//! Port for structured solve-audit logging.
//!
//! This is separate from `tracing`-based operation logs: tracing handles
//! human-readable diagnostics, while this port captures solve outcomes in a
//! machine-readable format (JSONL).

use serde_json::Value;

/// A structured solve event for logging.
pub struct SolveEvent {
    /// Event type identifier (e.g., "solve_started", "solve_outcome").
    pub event_type: &'static str,
    /// JSON payload with event-specific data.
    pub payload: Value,
}

impl SolveEvent {
    pub fn new(event_type: &'static str, payload: Value) -> Self {
        Self {
            event_type,
            payload,
        }
    }
}

/// Port for logging solve events to a structured log.
///
/// The `log` method is intentionally synchronous and non-fallible to avoid
/// disrupting the loop - logging failures are silently ignored.
pub trait SolveLogger: Send + Sync {
    /// Record a solve event.
    fn log(&self, event: SolveEvent);
}

/// No-op implementation for tests and when audit logging is disabled.
pub struct NoSolveLogger;

impl SolveLogger for NoSolveLogger {
    fn log(&self, _event: SolveEvent) {}
}
