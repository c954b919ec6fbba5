//! Prompt domain
//!
//! Templates that turn user input (schemas, free text, diagram
//! descriptions) into system/user message pairs.

mod template;

pub use template::PromptTemplate;
