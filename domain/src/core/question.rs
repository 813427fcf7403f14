//! Question value object

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};

/// A free-text reasoning question to be solved (Value Object)
///
/// The question text is opaque to the loop: it is forwarded verbatim to the
/// planner and executor phases and never interpreted locally.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Question {
    content: String,
}

impl Question {
    /// Create a new question
    ///
    /// # Panics
    /// Panics if the content is empty or only whitespace
    pub fn new(content: impl Into<String>) -> Self {
        Self::try_new(content).expect("Question cannot be empty")
    }

    /// Try to create a new question, rejecting blank input
    pub fn try_new(content: impl Into<String>) -> Result<Self, DomainError> {
        let content = content.into();
        if content.trim().is_empty() {
            Err(DomainError::InvalidQuestion(
                "question text is empty".to_string(),
            ))
        } else {
            Ok(Self { content })
        }
    }

    /// Get the question content
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Consume and return the inner content
    pub fn into_content(self) -> String {
        self.content
    }
}

impl std::fmt::Display for Question {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.content)
    }
}

impl From<&str> for Question {
    fn from(s: &str) -> Self {
        Question::new(s)
    }
}

impl From<String> for Question {
    fn from(s: String) -> Self {
        Question::new(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_question_creation() {
        let q = Question::new("How many apples does Alice have?");
        assert_eq!(q.content(), "How many apples does Alice have?");
    }

    #[test]
    fn test_question_from_str() {
        let q: Question = "When does the train arrive?".into();
        assert_eq!(q.content(), "When does the train arrive?");
    }

    #[test]
    #[should_panic]
    fn test_empty_question_panics() {
        Question::new("   ");
    }

    #[test]
    fn test_try_new_rejects_blank() {
        assert!(Question::try_new("").is_err());
        assert!(Question::try_new("  \n ").is_err());
        assert!(Question::try_new("What color is the sky?").is_ok());
    }
}
