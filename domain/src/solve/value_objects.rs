//! Solve value objects - immutable records exchanged by the loop.
//!
//! These types represent the outputs of each phase and the terminal result:
//! - [`Plan`] - Planner output, carried as provenance only
//! - [`ExecutionResult`] - Executor output (answer + explanation)
//! - [`VerificationResult`] - Verifier output (consistency check)
//! - [`CheckRecord`] - One audit entry per attempt
//! - [`Outcome`] - Terminal record returned to callers

use serde::{Deserialize, Serialize};

/// Name of the verification check appended once per attempt.
pub const CONSISTENCY_CHECK: &str = "consistency_check";

/// A plan produced by the planner phase (Value Object)
///
/// Never structurally parsed or validated: the executor reasons over the
/// original question, so the plan is observable provenance metadata only.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Plan {
    text: String,
}

impl Plan {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is_empty(&self) -> bool {
        self.text.trim().is_empty()
    }
}

impl From<String> for Plan {
    fn from(s: String) -> Self {
        Plan::new(s)
    }
}

impl std::fmt::Display for Plan {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.text)
    }
}

/// Executor output: a proposed answer with its explanation
///
/// `final_answer` is `None` when the model could not produce a confident
/// answer; `explanation` is always present, possibly describing the failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionResult {
    /// The proposed answer, absent when the model declined to answer
    pub final_answer: Option<String>,
    /// Human-readable reasoning behind the answer (or the failure)
    pub explanation: String,
}

impl ExecutionResult {
    /// Creates a result carrying a confident answer.
    pub fn answered(final_answer: impl Into<String>, explanation: impl Into<String>) -> Self {
        Self {
            final_answer: Some(final_answer.into()),
            explanation: explanation.into(),
        }
    }

    /// Creates a result for a question the model declined to answer.
    pub fn unanswered(explanation: impl Into<String>) -> Self {
        Self {
            final_answer: None,
            explanation: explanation.into(),
        }
    }

    /// Returns `true` if the executor produced an answer.
    pub fn has_answer(&self) -> bool {
        self.final_answer.is_some()
    }
}

/// Verifier output for one attempt
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationResult {
    /// Whether the consistency check passed
    pub passed: bool,
    /// Verifier commentary on the decision
    pub details: String,
}

impl VerificationResult {
    /// Creates a passing verification.
    pub fn pass(details: impl Into<String>) -> Self {
        Self {
            passed: true,
            details: details.into(),
        }
    }

    /// Creates a failing verification.
    pub fn fail(details: impl Into<String>) -> Self {
        Self {
            passed: false,
            details: details.into(),
        }
    }

    /// The verification synthesized locally when the executor produced no
    /// answer. Never involves a backend call.
    pub fn missing_answer() -> Self {
        Self::fail("Executor did not produce a valid answer.")
    }
}

/// One audit entry, appended per attempt in attempt order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckRecord {
    /// Name of the check; currently always [`CONSISTENCY_CHECK`]
    pub check_name: String,
    /// Whether the check passed
    pub passed: bool,
    /// Verifier details for this attempt
    pub details: String,
}

impl CheckRecord {
    /// Creates the consistency-check record for one attempt.
    pub fn consistency(passed: bool, details: impl Into<String>) -> Self {
        Self {
            check_name: CONSISTENCY_CHECK.to_string(),
            passed,
            details: details.into(),
        }
    }
}

impl From<&VerificationResult> for CheckRecord {
    fn from(verification: &VerificationResult) -> Self {
        CheckRecord::consistency(verification.passed, verification.details.clone())
    }
}

/// Terminal status of a solve invocation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SolveStatus {
    Success,
    Failed,
}

impl SolveStatus {
    pub fn as_str(&self) -> &str {
        match self {
            SolveStatus::Success => "success",
            SolveStatus::Failed => "failed",
        }
    }
}

impl std::fmt::Display for SolveStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Audit metadata carried on every outcome
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SolveMetadata {
    /// Plan from the terminal attempt (recomputed every attempt)
    pub plan: Plan,
    /// One check record per attempt, in attempt order
    pub checks: Vec<CheckRecord>,
    /// Count of failed attempts before the terminal one
    pub retries: u32,
}

impl SolveMetadata {
    pub fn new(plan: Plan, checks: Vec<CheckRecord>, retries: u32) -> Self {
        Self {
            plan,
            checks,
            retries,
        }
    }

    /// Number of attempts made (always `retries + 1` on a well-formed outcome)
    pub fn attempts(&self) -> usize {
        self.checks.len()
    }
}

/// Terminal record returned to any caller of the solve loop
///
/// Invariant: `status == Success` exactly when the most recent check passed,
/// and exactly when `answer` is present.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Outcome {
    /// The verified answer; absent on failure
    pub answer: Option<String>,
    /// Terminal status of the invocation
    pub status: SolveStatus,
    /// Explanation surfaced to the end user
    pub reasoning_visible_to_user: String,
    /// Full audit trail of the invocation
    pub metadata: SolveMetadata,
}

impl Outcome {
    /// Creates a success outcome carrying the verified answer.
    pub fn success(
        answer: impl Into<String>,
        reasoning: impl Into<String>,
        metadata: SolveMetadata,
    ) -> Self {
        Self {
            answer: Some(answer.into()),
            status: SolveStatus::Success,
            reasoning_visible_to_user: reasoning.into(),
            metadata,
        }
    }

    /// Creates a failure outcome with no answer.
    pub fn failed(reasoning: impl Into<String>, metadata: SolveMetadata) -> Self {
        Self {
            answer: None,
            status: SolveStatus::Failed,
            reasoning_visible_to_user: reasoning.into(),
            metadata,
        }
    }

    /// Returns `true` if the solve produced a verified answer.
    pub fn is_success(&self) -> bool {
        self.status == SolveStatus::Success
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_execution_result_constructors() {
        let answered = ExecutionResult::answered("9 apples", "Counted them.");
        assert!(answered.has_answer());
        assert_eq!(answered.final_answer.as_deref(), Some("9 apples"));

        let unanswered = ExecutionResult::unanswered("Out of scope.");
        assert!(!unanswered.has_answer());
        assert_eq!(unanswered.explanation, "Out of scope.");
    }

    #[test]
    fn test_missing_answer_verification() {
        let verification = VerificationResult::missing_answer();
        assert!(!verification.passed);
        assert_eq!(
            verification.details,
            "Executor did not produce a valid answer."
        );
    }

    #[test]
    fn test_check_record_name_is_fixed() {
        let check = CheckRecord::consistency(true, "Looks right.");
        assert_eq!(check.check_name, CONSISTENCY_CHECK);

        let from_verification = CheckRecord::from(&VerificationResult::fail("Off by one."));
        assert_eq!(from_verification.check_name, CONSISTENCY_CHECK);
        assert!(!from_verification.passed);
    }

    #[test]
    fn test_outcome_invariants() {
        let metadata = SolveMetadata::new(
            Plan::new("1. Count"),
            vec![CheckRecord::consistency(true, "ok")],
            0,
        );
        let success = Outcome::success("9 apples", "Counted.", metadata.clone());
        assert!(success.is_success());
        assert!(success.answer.is_some());
        assert_eq!(metadata.attempts(), 1);

        let failed = Outcome::failed("Unable to verify the solution.", metadata);
        assert!(!failed.is_success());
        assert!(failed.answer.is_none());
    }

    #[test]
    fn test_outcome_serialization_shape() {
        let outcome = Outcome::failed(
            "Unable to verify the solution.",
            SolveMetadata::new(Plan::default(), vec![], 2),
        );
        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(json["status"], "failed");
        assert_eq!(json["answer"], serde_json::Value::Null);
        assert_eq!(json["metadata"]["retries"], 2);
    }
}
