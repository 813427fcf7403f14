//! Console output formatter for solve outcomes

use crate::output::formatter::OutputFormatter;
use colored::Colorize;
use triad_domain::Outcome;

/// Formats solve outcomes for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Format the complete outcome: answer, explanation, and audit panels.
    pub fn format(outcome: &Outcome) -> String {
        let mut output = String::new();

        let status = if outcome.is_success() {
            "success".green().bold()
        } else {
            "failed".red().bold()
        };
        output.push_str(&format!("{} {}\n", "Status:".cyan().bold(), status));

        output.push_str(&Self::section_header("Final Answer"));
        output.push_str(&format!(
            "{}\n",
            outcome.answer.as_deref().unwrap_or("(no verified answer)")
        ));

        output.push_str(&Self::section_header("Explanation"));
        output.push_str(&format!("{}\n", outcome.reasoning_visible_to_user));

        output.push_str(&Self::section_header("Verification Trail"));
        for (index, check) in outcome.metadata.checks.iter().enumerate() {
            let marker = if check.passed {
                "[PASS]".green().to_string()
            } else {
                "[FAIL]".red().to_string()
            };
            output.push_str(&format!(
                "{} attempt {}: {} - {}\n",
                marker,
                index + 1,
                check.check_name,
                check.details
            ));
        }
        output.push_str(&format!("Retries: {}\n", outcome.metadata.retries));

        if !outcome.metadata.plan.is_empty() {
            output.push_str(&Self::section_header("Plan"));
            output.push_str(&format!("{}\n", outcome.metadata.plan));
        }

        output
    }

    /// Format as pretty-printed JSON (the REPL's per-line output).
    pub fn format_json(outcome: &Outcome) -> String {
        serde_json::to_string_pretty(outcome)
            .unwrap_or_else(|e| format!("{{\"error\": \"serialization failed: {e}\"}}"))
    }

    /// Format only the verified answer.
    pub fn format_answer_only(outcome: &Outcome) -> String {
        outcome
            .answer
            .clone()
            .unwrap_or_else(|| "(no verified answer)".to_string())
    }

    fn section_header(title: &str) -> String {
        format!("\n{}\n", format!("== {} ==", title).yellow().bold())
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format(&self, outcome: &Outcome) -> String {
        Self::format(outcome)
    }

    fn format_json(&self, outcome: &Outcome) -> String {
        Self::format_json(outcome)
    }

    fn format_answer_only(&self, outcome: &Outcome) -> String {
        Self::format_answer_only(outcome)
    }
}
