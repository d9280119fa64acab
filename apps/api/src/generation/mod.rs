// Career package generation: input validation, keyword extraction, prompt
// assembly and the three document calls.
// All LLM calls go through llm_client::TextGenerator.

pub mod context;
pub mod generator;
pub mod ghostwriter;
pub mod handlers;
pub mod keywords;
pub mod prompts;
pub mod tone;
pub mod translation;
pub mod validation;
