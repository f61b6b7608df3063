//! LLM provider abstraction layer for stock-digest
//!
//! This crate provides provider-agnostic abstractions for sending a prompt to
//! a hosted Large Language Model and reading back its text. It includes:
//!
//! - Message types for chat-style requests
//! - Completion request/response types
//! - Provider trait for LLM implementations
//! - An OpenAI-compatible chat completions provider

pub mod completion;
pub mod error;
pub mod messages;
pub mod provider;
pub mod providers;

// Re-export main types
pub use completion::{CompletionRequest, CompletionResponse, StopReason, TokenUsage};
pub use error::{LLMError, Result};
pub use messages::{Message, Role};
pub use provider::LLMProvider;
