//! Run Solve use case
//!
//! Drives the plan → execute → verify loop: three phase invokers wrapped
//! around the model backend, a bounded-retry policy, and an append-only
//! audit trail of verification attempts. Every semantic result - success,
//! failed verification, missing answer, exhausted retries, unreadable
//! executor output - terminates as an [`Outcome`]; only backend transport
//! failures surface as [`SolveError`].

use crate::config::BehaviorConfig;
use crate::ports::model_backend::{BackendError, ModelBackend};
use crate::ports::progress::{NoProgress, SolveProgressNotifier};
use crate::ports::solve_logger::{NoSolveLogger, SolveEvent, SolveLogger};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};
use triad_domain::util::truncate_str;
use triad_domain::{
    parse_execution_response, parse_verification_response, CheckRecord, Outcome, Phase, Plan,
    Question, ResponseParseError, SolveMetadata, VerificationResult,
};

/// Errors that can occur during solve execution
///
/// Semantic failures never appear here - they are folded into the returned
/// [`Outcome`]. Only transport-level backend failures abort the invocation.
#[derive(Error, Debug)]
pub enum SolveError {
    #[error("Backend error: {0}")]
    Backend(#[from] BackendError),
}

/// Input for the [`RunSolveUseCase`].
#[derive(Debug, Clone)]
pub struct SolveInput {
    /// The question to solve.
    pub question: Question,
    /// Behavior knobs - retry budget.
    pub behavior: BehaviorConfig,
}

impl SolveInput {
    pub fn new(question: impl Into<Question>) -> Self {
        Self {
            question: question.into(),
            behavior: BehaviorConfig::default(),
        }
    }

    pub fn with_behavior(mut self, behavior: BehaviorConfig) -> Self {
        self.behavior = behavior;
        self
    }
}

/// Result of one complete plan → execute → verify attempt.
enum AttemptOutcome {
    /// The consistency check passed; the answer is final.
    Passed {
        answer: String,
        explanation: String,
        verification: VerificationResult,
    },
    /// The consistency check failed; the attempt may be retried.
    Failed(VerificationResult),
    /// Executor output did not match the expected shape; terminal.
    ExecutorUnreadable(String),
}

/// Use case for running a self-verified solve
pub struct RunSolveUseCase {
    backend: Arc<dyn ModelBackend>,
    solve_logger: Arc<dyn SolveLogger>,
}

impl Clone for RunSolveUseCase {
    fn clone(&self) -> Self {
        Self {
            backend: self.backend.clone(),
            solve_logger: self.solve_logger.clone(),
        }
    }
}

impl RunSolveUseCase {
    pub fn new(backend: Arc<dyn ModelBackend>) -> Self {
        Self {
            backend,
            solve_logger: Arc::new(NoSolveLogger),
        }
    }

    /// Attach an audit logger.
    pub fn with_solve_logger(mut self, logger: Arc<dyn SolveLogger>) -> Self {
        self.solve_logger = logger;
        self
    }

    /// Execute the solve with default (no-op) progress
    pub async fn execute(&self, input: SolveInput) -> Result<Outcome, SolveError> {
        self.execute_with_progress(input, &NoProgress).await
    }

    /// Execute the solve with progress callbacks
    pub async fn execute_with_progress(
        &self,
        input: SolveInput,
        progress: &dyn SolveProgressNotifier,
    ) -> Result<Outcome, SolveError> {
        let question = &input.question;
        let max_retries = input.behavior.max_retries;
        let max_attempts = input.behavior.max_attempts();

        info!("Starting solve: {}", truncate_str(question.content(), 100));
        self.solve_logger.log(SolveEvent::new(
            "solve_started",
            serde_json::json!({ "question": question.content() }),
        ));

        let mut checks: Vec<CheckRecord> = Vec::new();
        let mut retries: u32 = 0;
        // Recomputed every attempt; the failure outcome carries the plan
        // from the final attempt.
        let mut plan = Plan::default();

        loop {
            let attempt = retries + 1;
            debug!("Attempt {}/{}", attempt, max_attempts);
            progress.on_attempt_start(attempt, max_attempts);

            match self.run_attempt(question, &mut plan, progress).await? {
                AttemptOutcome::Passed {
                    answer,
                    explanation,
                    verification,
                } => {
                    checks.push(CheckRecord::from(&verification));
                    progress.on_check_complete(attempt, true);
                    info!("Verification passed on attempt {}", attempt);

                    let outcome = Outcome::success(
                        answer,
                        explanation,
                        SolveMetadata::new(plan, checks, retries),
                    );
                    self.log_outcome(question, &outcome);
                    return Ok(outcome);
                }
                AttemptOutcome::Failed(verification) => {
                    warn!(
                        "Verification failed on attempt {}: {}",
                        attempt, verification.details
                    );
                    checks.push(CheckRecord::from(&verification));
                    progress.on_check_complete(attempt, false);

                    // retries counts the failed attempts before the terminal
                    // one, so the exhausted outcome reports max_retries, not
                    // max_retries + 1.
                    if retries >= max_retries {
                        info!("Retry budget exhausted after {} attempts", attempt);
                        let outcome = Outcome::failed(
                            "Unable to verify the solution.",
                            SolveMetadata::new(plan, checks, retries),
                        );
                        self.log_outcome(question, &outcome);
                        return Ok(outcome);
                    }
                    retries += 1;
                    // Retries are immediate; no backoff between attempts.
                }
                AttemptOutcome::ExecutorUnreadable(diagnostic) => {
                    // Protocol fault, not a wrong answer: terminal, never
                    // retried within the budget.
                    warn!("Attempt {} aborted: {}", attempt, diagnostic);
                    checks.push(CheckRecord::consistency(false, diagnostic.clone()));
                    progress.on_check_complete(attempt, false);

                    let outcome =
                        Outcome::failed(diagnostic, SolveMetadata::new(plan, checks, retries));
                    self.log_outcome(question, &outcome);
                    return Ok(outcome);
                }
            }
        }
    }

    /// Run one plan → execute → verify cycle.
    ///
    /// A timed-out backend call is folded into a failed verification so it
    /// consumes a retry like any other failed check; all other transport
    /// errors abort the solve.
    async fn run_attempt(
        &self,
        question: &Question,
        plan: &mut Plan,
        progress: &dyn SolveProgressNotifier,
    ) -> Result<AttemptOutcome, SolveError> {
        // Plan
        progress.on_phase_start(&Phase::Planner);
        match self.run_planner(question).await {
            Ok(new_plan) => *plan = new_plan,
            Err(BackendError::Timeout) => {
                return Ok(AttemptOutcome::Failed(Self::timed_out(Phase::Planner)));
            }
            Err(e) => return Err(e.into()),
        }
        progress.on_phase_complete(&Phase::Planner);

        // Execute
        progress.on_phase_start(&Phase::Executor);
        let execution = match self.run_executor(question, plan).await {
            Ok(Ok(execution)) => execution,
            Ok(Err(parse_err)) => {
                return Ok(AttemptOutcome::ExecutorUnreadable(format!(
                    "Executor returned an unreadable result: {parse_err}"
                )));
            }
            Err(BackendError::Timeout) => {
                return Ok(AttemptOutcome::Failed(Self::timed_out(Phase::Executor)));
            }
            Err(e) => return Err(e.into()),
        };
        progress.on_phase_complete(&Phase::Executor);

        // Verify
        progress.on_phase_start(&Phase::Verifier);
        let verification = match self.run_verifier(execution.final_answer.as_deref()).await {
            Ok(verification) => verification,
            Err(BackendError::Timeout) => {
                return Ok(AttemptOutcome::Failed(Self::timed_out(Phase::Verifier)));
            }
            Err(e) => return Err(e.into()),
        };
        progress.on_phase_complete(&Phase::Verifier);

        if verification.passed
            && let Some(answer) = execution.final_answer
        {
            return Ok(AttemptOutcome::Passed {
                answer,
                explanation: execution.explanation,
                verification,
            });
        }
        if verification.passed {
            // Cannot happen through run_verifier: an absent answer is failed
            // locally without a backend call. Guard anyway so the outcome
            // invariant (success implies answer) holds for any backend.
            warn!("Verifier passed without an answer to verify; recording a failed check");
            return Ok(AttemptOutcome::Failed(VerificationResult::fail(
                "Verifier passed but no answer was produced.",
            )));
        }
        Ok(AttemptOutcome::Failed(verification))
    }

    /// Planner invoker: raw backend text verbatim, never parsed.
    async fn run_planner(&self, question: &Question) -> Result<Plan, BackendError> {
        let raw = self
            .backend
            .invoke(Phase::Planner, question.content())
            .await?;
        Ok(Plan::new(raw))
    }

    /// Executor invoker.
    ///
    /// The plan argument is accepted for interface symmetry but not
    /// forwarded: the executor reasons over the original question text.
    /// Outer error is transport; inner error is a shape mismatch.
    async fn run_executor(
        &self,
        question: &Question,
        _plan: &Plan,
    ) -> Result<Result<triad_domain::ExecutionResult, ResponseParseError>, BackendError> {
        let raw = self
            .backend
            .invoke(Phase::Executor, question.content())
            .await?;
        Ok(parse_execution_response(&raw))
    }

    /// Verifier invoker.
    ///
    /// An absent answer is failed locally with no backend call. An
    /// unparseable verifier response counts as a failed (retryable) check.
    async fn run_verifier(
        &self,
        answer: Option<&str>,
    ) -> Result<VerificationResult, BackendError> {
        let Some(answer) = answer else {
            debug!("No answer to verify; synthesizing failed check without a backend call");
            return Ok(VerificationResult::missing_answer());
        };

        let raw = self.backend.invoke(Phase::Verifier, answer).await?;
        Ok(parse_verification_response(&raw).unwrap_or_else(|err| {
            warn!("Verifier response could not be interpreted: {}", err);
            VerificationResult::fail(format!(
                "Verifier response could not be interpreted: {err}"
            ))
        }))
    }

    fn timed_out(phase: Phase) -> VerificationResult {
        VerificationResult::fail(format!(
            "Backend call timed out during the {} phase.",
            phase.as_str()
        ))
    }

    fn log_outcome(&self, question: &Question, outcome: &Outcome) {
        self.solve_logger.log(SolveEvent::new(
            "solve_outcome",
            serde_json::json!({
                "question": question.content(),
                "status": outcome.status.as_str(),
                "answer": outcome.answer,
                "retries": outcome.metadata.retries,
                "checks": outcome.metadata.checks.len(),
            }),
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::collections::VecDeque;
    use std::sync::Mutex;
    use triad_domain::SolveStatus;

    // ==================== Test Mocks ====================

    /// Backend that replays a scripted sequence of responses and records
    /// every invocation.
    struct MockBackend {
        responses: Mutex<VecDeque<Result<String, BackendError>>>,
        calls: Mutex<Vec<(Phase, String)>>,
    }

    impl MockBackend {
        fn scripted(responses: Vec<Result<String, BackendError>>) -> Self {
            Self {
                responses: Mutex::new(VecDeque::from(responses)),
                calls: Mutex::new(Vec::new()),
            }
        }

        fn calls(&self) -> Vec<(Phase, String)> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl ModelBackend for MockBackend {
        async fn invoke(&self, phase: Phase, input: &str) -> Result<String, BackendError> {
            self.calls.lock().unwrap().push((phase, input.to_string()));
            self.responses
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Err(BackendError::Other("no more responses".to_string())))
        }
    }

    fn plan_text() -> Result<String, BackendError> {
        Ok("1. Read the problem\n2. Compute\n3. Answer".to_string())
    }

    fn execution_json(answer: Option<&str>) -> Result<String, BackendError> {
        Ok(serde_json::json!({
            "final_answer": answer,
            "explanation": "Worked through the quantities."
        })
        .to_string())
    }

    fn verification_json(passed: bool) -> Result<String, BackendError> {
        Ok(serde_json::json!({
            "passed": passed,
            "details": (if passed { "Consistent." } else { "Inconsistent." })
        })
        .to_string())
    }

    fn use_case(backend: Arc<MockBackend>) -> RunSolveUseCase {
        RunSolveUseCase::new(backend)
    }

    // ==================== Tests ====================

    #[tokio::test]
    async fn test_first_try_success() {
        let backend = Arc::new(MockBackend::scripted(vec![
            plan_text(),
            execution_json(Some("9 apples")),
            verification_json(true),
        ]));
        let outcome = use_case(backend.clone())
            .execute(SolveInput::new("How many apples?"))
            .await
            .unwrap();

        assert_eq!(outcome.status, SolveStatus::Success);
        assert_eq!(outcome.answer.as_deref(), Some("9 apples"));
        assert_eq!(outcome.reasoning_visible_to_user, "Worked through the quantities.");
        assert_eq!(outcome.metadata.retries, 0);
        assert_eq!(outcome.metadata.checks.len(), 1);
        assert!(outcome.metadata.checks[0].passed);

        // One attempt drives exactly one invocation per phase, in order.
        let phases: Vec<Phase> = backend.calls().into_iter().map(|(p, _)| p).collect();
        assert_eq!(phases, vec![Phase::Planner, Phase::Executor, Phase::Verifier]);
    }

    #[tokio::test]
    async fn test_missing_answer_never_invokes_verifier() {
        // Three attempts, each with a declined answer.
        let mut responses = Vec::new();
        for _ in 0..3 {
            responses.push(plan_text());
            responses.push(execution_json(None));
        }
        let backend = Arc::new(MockBackend::scripted(responses));
        let outcome = use_case(backend.clone())
            .execute(SolveInput::new("What color is the sky?"))
            .await
            .unwrap();

        assert_eq!(outcome.status, SolveStatus::Failed);
        assert!(outcome.answer.is_none());
        assert_eq!(outcome.reasoning_visible_to_user, "Unable to verify the solution.");
        assert_eq!(outcome.metadata.retries, 2);
        assert_eq!(outcome.metadata.checks.len(), 3);
        for check in &outcome.metadata.checks {
            assert!(!check.passed);
            assert_eq!(check.details, "Executor did not produce a valid answer.");
        }

        // The verifier is synthesized locally: no backend call carries it.
        assert!(backend
            .calls()
            .iter()
            .all(|(phase, _)| *phase != Phase::Verifier));
    }

    #[tokio::test]
    async fn test_failed_verification_retries_then_succeeds() {
        let backend = Arc::new(MockBackend::scripted(vec![
            plan_text(),
            execution_json(Some("4 hours")),
            verification_json(false),
            plan_text(),
            execution_json(Some("3 hours 35 minutes")),
            verification_json(true),
        ]));
        let outcome = use_case(backend.clone())
            .execute(SolveInput::new("How long is the journey?"))
            .await
            .unwrap();

        assert_eq!(outcome.status, SolveStatus::Success);
        assert_eq!(outcome.answer.as_deref(), Some("3 hours 35 minutes"));
        assert_eq!(outcome.metadata.retries, 1);
        assert_eq!(outcome.metadata.checks.len(), 2);
        assert!(!outcome.metadata.checks[0].passed);
        assert!(outcome.metadata.checks[1].passed);

        // The planner is re-run on every attempt.
        let planner_calls = backend
            .calls()
            .iter()
            .filter(|(phase, _)| *phase == Phase::Planner)
            .count();
        assert_eq!(planner_calls, 2);
    }

    #[tokio::test]
    async fn test_executor_shape_mismatch_terminates_immediately() {
        // Valid JSON, wrong shape: no explanation field.
        let backend = Arc::new(MockBackend::scripted(vec![
            plan_text(),
            Ok(r#"{"final_answer": "9 apples"}"#.to_string()),
        ]));
        let outcome = use_case(backend.clone())
            .execute(SolveInput::new("How many apples?"))
            .await
            .unwrap();

        assert_eq!(outcome.status, SolveStatus::Failed);
        assert!(outcome.answer.is_none());
        assert!(outcome
            .reasoning_visible_to_user
            .contains("unreadable result"));
        // The aborted attempt still leaves its diagnostic in the audit trail.
        assert_eq!(outcome.metadata.checks.len(), 1);
        assert_eq!(outcome.metadata.retries, 0);
        // No retry happened.
        assert_eq!(backend.calls().len(), 2);
    }

    #[tokio::test]
    async fn test_timeout_consumes_a_retry() {
        let mut responses = Vec::new();
        for _ in 0..3 {
            responses.push(plan_text());
            responses.push(Err(BackendError::Timeout));
        }
        let backend = Arc::new(MockBackend::scripted(responses));
        let outcome = use_case(backend)
            .execute(SolveInput::new("Anything slow?"))
            .await
            .unwrap();

        assert_eq!(outcome.status, SolveStatus::Failed);
        assert_eq!(outcome.metadata.retries, 2);
        assert_eq!(outcome.metadata.checks.len(), 3);
        assert!(outcome.metadata.checks[0]
            .details
            .contains("timed out during the executor phase"));
    }

    #[tokio::test]
    async fn test_transport_error_propagates() {
        let backend = Arc::new(MockBackend::scripted(vec![
            plan_text(),
            Err(BackendError::ConnectionError("refused".to_string())),
        ]));
        let result = use_case(backend).execute(SolveInput::new("Hello?")).await;

        assert!(matches!(
            result,
            Err(SolveError::Backend(BackendError::ConnectionError(_)))
        ));
    }

    #[tokio::test]
    async fn test_unparseable_verifier_response_is_a_failed_check() {
        let mut responses = Vec::new();
        for _ in 0..3 {
            responses.push(plan_text());
            responses.push(execution_json(Some("9 apples")));
            responses.push(Ok("looks good to me!".to_string()));
        }
        let backend = Arc::new(MockBackend::scripted(responses));
        let outcome = use_case(backend)
            .execute(SolveInput::new("How many apples?"))
            .await
            .unwrap();

        assert_eq!(outcome.status, SolveStatus::Failed);
        assert_eq!(outcome.metadata.checks.len(), 3);
        assert!(outcome.metadata.checks[0]
            .details
            .contains("could not be interpreted"));
    }

    #[tokio::test]
    async fn test_custom_retry_budget() {
        let mut responses = Vec::new();
        for _ in 0..5 {
            responses.push(plan_text());
            responses.push(execution_json(None));
        }
        let backend = Arc::new(MockBackend::scripted(responses));
        let input = SolveInput::new("Unanswerable")
            .with_behavior(BehaviorConfig::with_max_retries(4));
        let outcome = use_case(backend).execute(input).await.unwrap();

        assert_eq!(outcome.status, SolveStatus::Failed);
        assert_eq!(outcome.metadata.retries, 4);
        assert_eq!(outcome.metadata.checks.len(), 5);
    }
}
