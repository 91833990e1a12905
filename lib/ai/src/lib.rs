//! LLM primitives for the top-songs service.
//!
//! This crate provides the building blocks for single-shot chat completion:
//!
//! - **Backend**: the provider abstraction and an OpenAI-compatible HTTP client
//! - **Prompt**: templates with placeholder substitution
//! - **Output**: instructing the model to emit a parseable shape, then
//!   decoding that text into a typed record

pub mod backend;
pub mod error;
pub mod openai;
pub mod output;
pub mod prompt;

pub use backend::{LlmBackend, LlmMessage, LlmRequest, LlmResponse, MessageRole, TokenUsage};
pub use error::{LlmError, OutputError, PromptError};
pub use openai::{OpenAiBackend, OpenAiConfig};
pub use output::OutputConverter;
pub use prompt::PromptTemplate;
