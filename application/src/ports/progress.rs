//! Progress notification port
//!
//! Defines the interface for reporting progress during a solve.
//! Implementations live in the presentation layer.

use triad_domain::Phase;

/// Callback for progress updates during solve execution
pub trait SolveProgressNotifier: Send + Sync {
    /// Called when an attempt starts (1-based)
    fn on_attempt_start(&self, attempt: u32, max_attempts: u32);

    /// Called when a phase starts within an attempt
    fn on_phase_start(&self, phase: &Phase);

    /// Called when a phase completes within an attempt
    fn on_phase_complete(&self, phase: &Phase);

    /// Called when an attempt's consistency check is recorded
    fn on_check_complete(&self, attempt: u32, passed: bool);
}

/// No-op progress notifier for when progress reporting is not needed
pub struct NoProgress;

impl SolveProgressNotifier for NoProgress {
    fn on_attempt_start(&self, _attempt: u32, _max_attempts: u32) {}
    fn on_phase_start(&self, _phase: &Phase) {}
    fn on_phase_complete(&self, _phase: &Phase) {}
    fn on_check_complete(&self, _attempt: u32, _passed: bool) {}
}
