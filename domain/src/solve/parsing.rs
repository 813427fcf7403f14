//! Structured-response parsing for the executor and verifier phases.
//!
//! These functions extract the expected JSON payload from raw model text.
//! They are pure domain logic - no I/O, no session management. Models often
//! wrap their JSON in prose or code fences, so parsing locates the outermost
//! object rather than requiring the whole response to be JSON.

use crate::solve::value_objects::{ExecutionResult, VerificationResult};
use thiserror::Error;

/// Failure to interpret a backend response as the expected phase shape
#[derive(Error, Debug)]
pub enum ResponseParseError {
    #[error("no JSON object found in response")]
    MissingJson,

    #[error("response does not match the expected {shape} shape: {source}")]
    ShapeMismatch {
        shape: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

/// Locate the outermost JSON object embedded in raw model text.
fn extract_json_object(raw: &str) -> Option<&str> {
    let start = raw.find('{')?;
    let end = raw[start..].rfind('}')?;
    Some(&raw[start..start + end + 1])
}

/// Parse executor output into an [`ExecutionResult`].
///
/// Accepts the object embedded anywhere in the response text. A `null`
/// `final_answer` is a valid "no confident answer" result, not an error.
pub fn parse_execution_response(raw: &str) -> Result<ExecutionResult, ResponseParseError> {
    let json = extract_json_object(raw).ok_or(ResponseParseError::MissingJson)?;
    serde_json::from_str(json).map_err(|source| ResponseParseError::ShapeMismatch {
        shape: "execution",
        source,
    })
}

/// Parse verifier output into a [`VerificationResult`].
pub fn parse_verification_response(raw: &str) -> Result<VerificationResult, ResponseParseError> {
    let json = extract_json_object(raw).ok_or(ResponseParseError::MissingJson)?;
    serde_json::from_str(json).map_err(|source| ResponseParseError::ShapeMismatch {
        shape: "verification",
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_execution_plain_json() {
        let result = parse_execution_response(
            r#"{"final_answer": "9 apples", "explanation": "3 red + 6 green."}"#,
        )
        .unwrap();
        assert_eq!(result.final_answer.as_deref(), Some("9 apples"));
        assert_eq!(result.explanation, "3 red + 6 green.");
    }

    #[test]
    fn test_parse_execution_null_answer() {
        let result = parse_execution_response(
            r#"{"final_answer": null, "explanation": "Unable to confidently solve this problem."}"#,
        )
        .unwrap();
        assert!(result.final_answer.is_none());
    }

    #[test]
    fn test_parse_execution_embedded_in_prose() {
        let raw = "Here is my result:\n```json\n{\"final_answer\": \"42\", \"explanation\": \"Direct computation.\"}\n```\nDone.";
        let result = parse_execution_response(raw).unwrap();
        assert_eq!(result.final_answer.as_deref(), Some("42"));
    }

    #[test]
    fn test_parse_execution_missing_json() {
        let err = parse_execution_response("The answer is nine apples.").unwrap_err();
        assert!(matches!(err, ResponseParseError::MissingJson));
    }

    #[test]
    fn test_parse_execution_wrong_shape() {
        // Valid JSON that lacks the required explanation field
        let err = parse_execution_response(r#"{"final_answer": "9 apples"}"#).unwrap_err();
        assert!(matches!(
            err,
            ResponseParseError::ShapeMismatch { shape: "execution", .. }
        ));
    }

    #[test]
    fn test_parse_verification() {
        let result = parse_verification_response(
            r#"{"passed": true, "details": "Answer appears consistent with the problem."}"#,
        )
        .unwrap();
        assert!(result.passed);

        let err = parse_verification_response(r#"{"verdict": "ok"}"#).unwrap_err();
        assert!(matches!(
            err,
            ResponseParseError::ShapeMismatch { shape: "verification", .. }
        ));
    }
}
