//! Prompt templates for the solve phases

mod template;

pub use template::PromptTemplate;
