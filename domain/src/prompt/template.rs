//! Fixed instruction templates for each phase.
//!
//! The template text is opaque configuration identifying which phase is
//! being invoked; the loop never parses it. Backends prepend the phase
//! instruction to the input text when talking to a model.

use crate::core::phase::Phase;

/// Templates for generating phase prompts
pub struct PromptTemplate;

impl PromptTemplate {
    /// System instruction for the planner phase
    pub fn planner_system() -> &'static str {
        r#"You are a planner.
Given a question, output a step-by-step plan.
Do NOT solve the problem."#
    }

    /// System instruction for the executor phase
    pub fn executor_system() -> &'static str {
        r#"You are an executor.
Follow the given plan and solve the problem.
Return final answer and short explanation as JSON:
{"final_answer": "<answer or null>", "explanation": "<short explanation>"}"#
    }

    /// System instruction for the verifier phase
    pub fn verifier_system() -> &'static str {
        r#"You are a verifier.
Check if the proposed answer is correct.
Return passed=true or false with details as JSON:
{"passed": true, "details": "<reasoning>"}"#
    }

    /// Directive appended by live backends to force machine-readable output
    pub fn json_directive() -> &'static str {
        "IMPORTANT: Respond ONLY in valid JSON."
    }

    /// Instruction template for a phase
    pub fn system_for(phase: Phase) -> &'static str {
        match phase {
            Phase::Planner => Self::planner_system(),
            Phase::Executor => Self::executor_system(),
            Phase::Verifier => Self::verifier_system(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_each_phase_has_distinct_instructions() {
        let templates: Vec<&str> = Phase::all()
            .iter()
            .map(|p| PromptTemplate::system_for(*p))
            .collect();
        assert_ne!(templates[0], templates[1]);
        assert_ne!(templates[1], templates[2]);
    }

    #[test]
    fn test_planner_never_solves() {
        assert!(PromptTemplate::planner_system().contains("Do NOT solve"));
    }
}
