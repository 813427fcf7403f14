//! Progress reporting for solve execution

use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::Mutex;
use std::time::Duration;
use triad_application::SolveProgressNotifier;
use triad_domain::Phase;

/// Reports solve progress with a spinner per attempt
pub struct ProgressReporter {
    spinner: Mutex<Option<ProgressBar>>,
}

impl ProgressReporter {
    pub fn new() -> Self {
        Self {
            spinner: Mutex::new(None),
        }
    }

    fn spinner_style() -> ProgressStyle {
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {prefix:.bold.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl SolveProgressNotifier for ProgressReporter {
    fn on_attempt_start(&self, attempt: u32, max_attempts: u32) {
        let pb = ProgressBar::new_spinner();
        pb.set_style(Self::spinner_style());
        pb.set_prefix(format!("Attempt {}/{}", attempt, max_attempts));
        pb.enable_steady_tick(Duration::from_millis(100));

        let mut spinner = self.spinner.lock().unwrap();
        if let Some(old) = spinner.take() {
            old.finish_and_clear();
        }
        *spinner = Some(pb);
    }

    fn on_phase_start(&self, phase: &Phase) {
        if let Some(pb) = self.spinner.lock().unwrap().as_ref() {
            pb.set_message(format!("{}...", phase.display_name()));
        }
    }

    fn on_phase_complete(&self, phase: &Phase) {
        if let Some(pb) = self.spinner.lock().unwrap().as_ref() {
            pb.set_message(format!("{} done", phase.display_name()));
        }
    }

    fn on_check_complete(&self, attempt: u32, passed: bool) {
        if let Some(pb) = self.spinner.lock().unwrap().take() {
            let marker = if passed {
                "check passed".green().to_string()
            } else {
                "check failed".red().to_string()
            };
            pb.finish_with_message(format!("attempt {} {}", attempt, marker));
        }
    }
}
