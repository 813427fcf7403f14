//! Deterministic offline stand-in for the model backend.
//!
//! Replaces model reasoning with a rule table: the lower-cased executor
//! input is scanned for lexical cues and the first matching rule's canned
//! payload is returned. Planner and verifier responses are fixed per phase.
//! The fixture never fails, never blocks, and holds no hidden state, so
//! identical calls always yield identical output.

use async_trait::async_trait;
use triad_application::{BackendError, ModelBackend};
use triad_domain::Phase;

/// One recognized input pattern mapped to a canned executor payload.
#[derive(Debug, Clone)]
pub struct FixtureRule {
    cue: String,
    payload: String,
}

impl FixtureRule {
    /// Map inputs containing `cue` (case-insensitive) to a canned answer.
    pub fn answer(
        cue: impl Into<String>,
        final_answer: impl Into<String>,
        explanation: impl Into<String>,
    ) -> Self {
        let final_answer: String = final_answer.into();
        let explanation: String = explanation.into();
        Self {
            cue: cue.into().to_lowercase(),
            payload: serde_json::json!({
                "final_answer": final_answer,
                "explanation": explanation,
            })
            .to_string(),
        }
    }

    fn matches(&self, lowercased_input: &str) -> bool {
        lowercased_input.contains(&self.cue)
    }
}

/// Offline deterministic backend with a pluggable rule table.
pub struct FixtureBackend {
    rules: Vec<FixtureRule>,
}

impl FixtureBackend {
    /// Fixture with the stock rule table ("apple" and "train" cues).
    pub fn new() -> Self {
        Self {
            rules: vec![
                FixtureRule::answer(
                    "apple",
                    "9 apples",
                    "Calculated total apples based on given quantities.",
                ),
                FixtureRule::answer(
                    "train",
                    "3 hours 35 minutes",
                    "Computed time difference between departure and arrival.",
                ),
            ],
        }
    }

    /// Fixture with an explicit rule table (test and offline modes).
    pub fn with_rules(rules: Vec<FixtureRule>) -> Self {
        Self { rules }
    }

    /// Append a rule to the table.
    pub fn with_rule(mut self, rule: FixtureRule) -> Self {
        self.rules.push(rule);
        self
    }

    fn planner_response() -> String {
        "1. Read the problem\n\
         2. Extract relevant quantities\n\
         3. Perform calculations\n\
         4. Format final answer"
            .to_string()
    }

    fn executor_response(&self, input: &str) -> String {
        let lowercased = input.to_lowercase();
        for rule in &self.rules {
            if rule.matches(&lowercased) {
                return rule.payload.clone();
            }
        }
        serde_json::json!({
            "final_answer": null,
            "explanation": "Unable to confidently solve this problem.",
        })
        .to_string()
    }

    fn verifier_response(input: &str) -> String {
        if input.trim().is_empty() {
            serde_json::json!({
                "passed": false,
                "details": "Answer is missing or invalid.",
            })
            .to_string()
        } else {
            serde_json::json!({
                "passed": true,
                "details": "Answer appears consistent with the problem.",
            })
            .to_string()
        }
    }
}

impl Default for FixtureBackend {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ModelBackend for FixtureBackend {
    async fn invoke(&self, phase: Phase, input: &str) -> Result<String, BackendError> {
        Ok(match phase {
            Phase::Planner => Self::planner_response(),
            Phase::Executor => self.executor_response(input),
            Phase::Verifier => Self::verifier_response(input),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use triad_application::{RunSolveUseCase, SolveInput};
    use triad_domain::SolveStatus;

    #[tokio::test]
    async fn test_fixture_is_idempotent() {
        let backend = FixtureBackend::new();
        for phase in Phase::all() {
            let first = backend.invoke(phase, "Alice has 3 apples").await.unwrap();
            let second = backend.invoke(phase, "Alice has 3 apples").await.unwrap();
            assert_eq!(first, second);
        }
    }

    #[tokio::test]
    async fn test_cue_matching_is_case_insensitive() {
        let backend = FixtureBackend::new();
        let response = backend.invoke(Phase::Executor, "APPLES everywhere").await.unwrap();
        assert!(response.contains("9 apples"));
    }

    #[tokio::test]
    async fn test_unrecognized_input_declines_to_answer() {
        let backend = FixtureBackend::new();
        let response = backend
            .invoke(Phase::Executor, "What color is the sky?")
            .await
            .unwrap();
        let value: serde_json::Value = serde_json::from_str(&response).unwrap();
        assert!(value["final_answer"].is_null());
    }

    #[tokio::test]
    async fn test_custom_rule() {
        let backend = FixtureBackend::new().with_rule(FixtureRule::answer(
            "candies",
            "6 candies",
            "Subtracted the ones given away.",
        ));
        let response = backend
            .invoke(Phase::Executor, "Bob has 10 candies and gives away 4")
            .await
            .unwrap();
        assert!(response.contains("6 candies"));
    }

    // ==================== End-to-end scenarios ====================

    async fn solve(question: &str) -> triad_domain::Outcome {
        RunSolveUseCase::new(Arc::new(FixtureBackend::new()))
            .execute(SolveInput::new(question))
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_apple_question_succeeds_first_try() {
        let outcome = solve(
            "Alice has 3 red apples and twice as many green apples as red. \
             How many apples does she have?",
        )
        .await;

        assert_eq!(outcome.status, SolveStatus::Success);
        assert_eq!(outcome.answer.as_deref(), Some("9 apples"));
        assert_eq!(outcome.metadata.retries, 0);
        assert_eq!(outcome.metadata.checks.len(), 1);
        assert!(outcome.metadata.checks[0].passed);
        assert!(!outcome.metadata.plan.is_empty());
    }

    #[tokio::test]
    async fn test_train_question_succeeds_first_try() {
        let outcome =
            solve("If a train leaves at 14:30 and arrives at 18:05, how long is the journey?")
                .await;

        assert_eq!(outcome.status, SolveStatus::Success);
        assert_eq!(outcome.answer.as_deref(), Some("3 hours 35 minutes"));
        assert_eq!(outcome.metadata.retries, 0);
    }

    #[tokio::test]
    async fn test_unrecognized_question_exhausts_retries() {
        let outcome = solve("What color is the sky?").await;

        assert_eq!(outcome.status, SolveStatus::Failed);
        assert!(outcome.answer.is_none());
        assert_eq!(outcome.metadata.retries, 2);
        assert_eq!(outcome.metadata.checks.len(), 3);
        assert_eq!(
            outcome.reasoning_visible_to_user,
            "Unable to verify the solution."
        );
        // Every attempt is identical: same missing-answer details each time.
        for check in &outcome.metadata.checks {
            assert_eq!(check.details, "Executor did not produce a valid answer.");
        }
    }
}
