// SPDX-FileCopyrightText: 2026 Astropost Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Request and response types for the Mistral chat-completions API.

use serde::{Deserialize, Serialize};

/// A chat-completion request body.
#[derive(Debug, Clone, Serialize)]
pub struct ChatRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub max_tokens: u32,
}

/// A single chat message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    /// A user-role message.
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

/// A chat-completion response body.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatResponse {
    pub id: String,
    pub choices: Vec<ChatChoice>,
}

/// One completion choice.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatChoice {
    pub message: ChatMessage,
}

impl ChatResponse {
    /// Text of the first choice, or an empty string when the API returned
    /// no choices.
    pub fn first_text(&self) -> &str {
        self.choices
            .first()
            .map(|c| c.message.content.as_str())
            .unwrap_or_default()
    }
}

/// Error body returned by the Mistral API.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorResponse {
    pub message: String,
    #[serde(rename = "type", default)]
    pub type_: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn response_parses_and_exposes_first_text() {
        let body = r#"{
            "id": "cmpl-1",
            "choices": [
                {"message": {"role": "assistant", "content": "Stars align."}}
            ]
        }"#;
        let resp: ChatResponse = serde_json::from_str(body).expect("valid response");
        assert_eq!(resp.first_text(), "Stars align.");
    }

    #[test]
    fn empty_choices_yield_empty_text() {
        let body = r#"{"id": "cmpl-2", "choices": []}"#;
        let resp: ChatResponse = serde_json::from_str(body).expect("valid response");
        assert_eq!(resp.first_text(), "");
    }

    #[test]
    fn request_serializes_expected_shape() {
        let req = ChatRequest {
            model: "mistral-small-latest".into(),
            messages: vec![ChatMessage::user("hello")],
            max_tokens: 500,
        };
        let json = serde_json::to_value(&req).expect("serializes");
        assert_eq!(json["model"], "mistral-small-latest");
        assert_eq!(json["messages"][0]["role"], "user");
        assert_eq!(json["max_tokens"], 500);
    }
}
