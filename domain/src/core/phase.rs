//! Phase value object identifying one backend-call-wrapping step

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};

/// Phase of a solve attempt (Value Object)
///
/// The phase identifier selects which fixed instruction template is sent
/// to the model backend alongside the input text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    /// Produce a step-by-step plan for the question
    Planner,
    /// Solve the question and return a structured answer
    Executor,
    /// Check the proposed answer for consistency
    Verifier,
}

impl Phase {
    /// Get the string identifier for this phase
    pub fn as_str(&self) -> &str {
        match self {
            Phase::Planner => "planner",
            Phase::Executor => "executor",
            Phase::Verifier => "verifier",
        }
    }

    pub fn display_name(&self) -> &str {
        match self {
            Phase::Planner => "Planning",
            Phase::Executor => "Execution",
            Phase::Verifier => "Verification",
        }
    }

    /// All phases, in the order they run within an attempt
    pub fn all() -> [Phase; 3] {
        [Phase::Planner, Phase::Executor, Phase::Verifier]
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Phase {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "planner" => Ok(Phase::Planner),
            "executor" => Ok(Phase::Executor),
            "verifier" => Ok(Phase::Verifier),
            other => Err(DomainError::UnknownPhase(other.to_string())),
        }
    }
}
