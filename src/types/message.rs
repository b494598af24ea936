//! Inbound AI request types.

use serde::{Deserialize, Serialize};

use crate::{Error, ErrorContext, Result};

/// One turn of a structured conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub role: MessageRole,
    pub content: String,
}

impl Message {
    pub fn system(text: impl Into<String>) -> Self {
        Self {
            role: MessageRole::System,
            content: text.into(),
        }
    }

    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: MessageRole::User,
            content: text.into(),
        }
    }

    pub fn assistant(text: impl Into<String>) -> Self {
        Self {
            role: MessageRole::Assistant,
            content: text.into(),
        }
    }
}

/// Message role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    System,
    User,
    Assistant,
}

impl MessageRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            MessageRole::System => "system",
            MessageRole::User => "user",
            MessageRole::Assistant => "assistant",
        }
    }
}

impl std::fmt::Display for MessageRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An AI request: a free-text prompt, an ordered message sequence, or neither.
///
/// When both are present the message sequence wins.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AiRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prompt: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub messages: Option<Vec<Message>>,
}

impl AiRequest {
    pub fn prompt(text: impl Into<String>) -> Self {
        Self {
            prompt: Some(text.into()),
            messages: None,
        }
    }

    pub fn messages(messages: Vec<Message>) -> Self {
        Self {
            prompt: None,
            messages: Some(messages),
        }
    }

    /// Decode a request body. Any shape problem is a `MalformedRequest`.
    pub fn from_slice(body: &[u8]) -> Result<Self> {
        if body.iter().all(|b| b.is_ascii_whitespace()) {
            return Ok(Self::default());
        }
        let value: serde_json::Value = serde_json::from_slice(body).map_err(|e| {
            Error::malformed_with_context(
                format!("request body is not JSON: {}", e),
                ErrorContext::new().with_source("ai_request"),
            )
        })?;
        Self::from_json(&value)
    }

    pub fn from_json(value: &serde_json::Value) -> Result<Self> {
        let obj = match value {
            serde_json::Value::Null => return Ok(Self::default()),
            serde_json::Value::Object(obj) => obj,
            other => {
                return Err(Error::malformed_with_context(
                    format!("expected a JSON object, got {}", json_type(other)),
                    ErrorContext::new().with_source("ai_request"),
                ))
            }
        };

        let prompt = match obj.get("prompt") {
            None | Some(serde_json::Value::Null) => None,
            Some(serde_json::Value::String(s)) => Some(s.clone()),
            Some(other) => {
                return Err(Error::malformed_with_context(
                    format!("prompt must be a string, got {}", json_type(other)),
                    ErrorContext::new().with_field_path("prompt"),
                ))
            }
        };

        let messages = match obj.get("messages") {
            None | Some(serde_json::Value::Null) => None,
            Some(serde_json::Value::Array(items)) => {
                let mut out = Vec::with_capacity(items.len());
                for (i, item) in items.iter().enumerate() {
                    let msg: Message = serde_json::from_value(item.clone()).map_err(|e| {
                        Error::malformed_with_context(
                            e.to_string(),
                            ErrorContext::new().with_field_path(format!("messages[{}]", i)),
                        )
                    })?;
                    out.push(msg);
                }
                Some(out)
            }
            Some(other) => {
                return Err(Error::malformed_with_context(
                    format!("messages must be an array, got {}", json_type(other)),
                    ErrorContext::new().with_field_path("messages"),
                ))
            }
        };

        Ok(Self { prompt, messages })
    }
}

fn json_type(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}
