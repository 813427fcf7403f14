//! Output formatter trait

use triad_domain::Outcome;

/// Trait for formatting solve outcomes
pub trait OutputFormatter {
    /// Format the complete outcome with audit panels
    fn format(&self, outcome: &Outcome) -> String;

    /// Format as JSON
    fn format_json(&self, outcome: &Outcome) -> String;

    /// Format only the verified answer (concise output)
    fn format_answer_only(&self, outcome: &Outcome) -> String;
}
