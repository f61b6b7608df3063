//! Chat turns exchanged with a model
//!
//! A turn is a role and a block of text. Multi-modal content and tool calls
//! are not modelled.

use serde::{Deserialize, Serialize};

/// Who wrote a turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

impl Role {
    /// Wire name of the role
    pub fn as_str(self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Assistant => "assistant",
        }
    }
}

/// One chat turn
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl Message {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: text.into(),
        }
    }

    pub fn assistant(text: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: text.into(),
        }
    }

    pub fn text(&self) -> &str {
        &self.content
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constructors() {
        let prompt = Message::user("Hello");
        assert_eq!(prompt.role, Role::User);
        assert_eq!(prompt.text(), "Hello");

        let reply = Message::assistant("Hi there");
        assert_eq!(reply.role, Role::Assistant);
        assert_eq!(reply.text(), "Hi there");
    }

    #[test]
    fn test_role_serializes_lowercase() {
        let json = serde_json::to_string(&Message::user("Be brief")).unwrap();
        assert_eq!(json, r#"{"role":"user","content":"Be brief"}"#);
        assert_eq!(Role::Assistant.as_str(), "assistant");
    }
}
