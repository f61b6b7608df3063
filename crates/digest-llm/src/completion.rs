//! Chat completion request and response types

use crate::Message;
use serde::{Deserialize, Serialize};

/// A single chat completion call
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionRequest {
    /// Model name understood by the provider
    pub model: String,

    /// Chat turns sent to the model, in order
    pub messages: Vec<Message>,

    /// Sampling temperature; provider default when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
}

/// What the model sent back
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionResponse {
    pub message: Message,
    pub stop_reason: StopReason,
    pub usage: TokenUsage,
}

/// Why generation ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StopReason {
    /// The model finished its answer
    EndTurn,

    /// Output was cut at the provider's token limit
    MaxTokens,

    /// Output was withheld by the provider's content filter
    ContentFilter,
}

impl StopReason {
    /// Whether the returned text may be incomplete
    pub fn is_truncated(self) -> bool {
        !matches!(self, StopReason::EndTurn)
    }
}

/// Token accounting reported by the provider
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct TokenUsage {
    pub input_tokens: usize,
    pub output_tokens: usize,
}

impl TokenUsage {
    pub fn total(&self) -> usize {
        self.input_tokens + self.output_tokens
    }
}

impl CompletionRequest {
    pub fn builder(model: impl Into<String>) -> CompletionRequestBuilder {
        CompletionRequestBuilder {
            model: model.into(),
            messages: Vec::new(),
            temperature: None,
        }
    }
}

/// Builder for [`CompletionRequest`]
pub struct CompletionRequestBuilder {
    model: String,
    messages: Vec<Message>,
    temperature: Option<f32>,
}

impl CompletionRequestBuilder {
    /// Append a chat turn
    pub fn add_message(mut self, message: Message) -> Self {
        self.messages.push(message);
        self
    }

    pub fn temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    pub fn build(self) -> CompletionRequest {
        CompletionRequest {
            model: self.model,
            messages: self.messages,
            temperature: self.temperature,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder() {
        let request = CompletionRequest::builder("gpt-4o")
            .add_message(Message::user("Summarize the market"))
            .temperature(0.7)
            .build();

        assert_eq!(request.model, "gpt-4o");
        assert_eq!(request.messages, vec![Message::user("Summarize the market")]);
        assert_eq!(request.temperature, Some(0.7));
    }

    #[test]
    fn test_unset_temperature_is_not_serialized() {
        let request = CompletionRequest::builder("gpt-4o")
            .add_message(Message::user("Hello"))
            .build();
        let json = serde_json::to_value(&request).unwrap();

        assert!(json.get("temperature").is_none());
        assert_eq!(json["messages"][0]["role"], "user");
    }

    #[test]
    fn test_stop_reason_truncation() {
        assert!(!StopReason::EndTurn.is_truncated());
        assert!(StopReason::MaxTokens.is_truncated());
        assert!(StopReason::ContentFilter.is_truncated());
    }

    #[test]
    fn test_token_usage() {
        let usage = TokenUsage {
            input_tokens: 100,
            output_tokens: 50,
        };
        assert_eq!(usage.total(), 150);
    }
}
