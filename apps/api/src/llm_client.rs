/// LLM Client — the single point of entry for chat-completion calls.
///
/// ARCHITECTURAL RULE: No other module may call the model API directly.
/// All model interactions MUST go through this module.
///
/// The relay is stateless: callers supply the full conversation history on
/// every call, and exactly one upstream request is made per call — no retry,
/// no caller-imposed timeout. A slow or failed upstream call blocks only the
/// requesting connection.
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

const OPENAI_API_URL: &str = "https://api.openai.com/v1/chat/completions";
/// The model used for all screening conversations.
/// This is intentionally hardcoded to prevent accidental drift.
pub const MODEL: &str = "gpt-4";

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("completion contained no choices")]
    EmptyChoices,
}

/// One role-tagged conversation turn. Role values are passed through to the
/// upstream API untouched; this service does not validate them.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
}

#[derive(Debug, Deserialize)]
struct ChatCompletionChoice {
    message: ChatMessage,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<ChatCompletionChoice>,
}

#[derive(Debug, Deserialize)]
struct OpenAiError {
    error: OpenAiErrorBody,
}

#[derive(Debug, Deserialize)]
struct OpenAiErrorBody {
    message: String,
}

/// The single chat relay used by the respond route.
/// Wraps the OpenAI chat-completions API.
#[derive(Clone)]
pub struct LlmClient {
    client: Client,
    api_key: String,
}

impl LlmClient {
    pub fn new(api_key: String) -> Self {
        Self {
            client: Client::new(),
            api_key,
        }
    }

    /// Forwards the stored screening prompt plus the caller-supplied history
    /// and returns the first completion choice's message.
    pub async fn respond(
        &self,
        stored_prompt: &str,
        history: &[ChatMessage],
    ) -> Result<ChatMessage, LlmError> {
        let messages = build_conversation(stored_prompt, history);
        let request_body = ChatCompletionRequest {
            model: MODEL,
            messages: &messages,
        };

        let response = self
            .client
            .post(OPENAI_API_URL)
            .bearer_auth(&self.api_key)
            .json(&request_body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            // Try to parse the structured error message
            let message = serde_json::from_str::<OpenAiError>(&body)
                .map(|e| e.error.message)
                .unwrap_or(body);
            return Err(LlmError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let completion: ChatCompletionResponse = response.json().await?;

        debug!(
            "chat completion returned {} choice(s)",
            completion.choices.len()
        );

        completion
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message)
            .ok_or(LlmError::EmptyChoices)
    }
}

/// Prepends one synthetic system message carrying the stored prompt ahead of
/// the caller-supplied history, preserving its order.
fn build_conversation(stored_prompt: &str, history: &[ChatMessage]) -> Vec<ChatMessage> {
    let mut messages = Vec::with_capacity(history.len() + 1);
    messages.push(ChatMessage {
        role: "system".to_string(),
        content: stored_prompt.to_string(),
    });
    messages.extend_from_slice(history);
    messages
}

#[cfg(test)]
mod tests {
    use super::*;

    fn turn(role: &str, content: &str) -> ChatMessage {
        ChatMessage {
            role: role.to_string(),
            content: content.to_string(),
        }
    }

    #[test]
    fn test_build_conversation_prepends_system_prompt() {
        let history = vec![turn("user", "Hello"), turn("assistant", "Hi there")];
        let messages = build_conversation("You are a recruiter.", &history);

        assert_eq!(messages.len(), 3);
        assert_eq!(messages[0].role, "system");
        assert_eq!(messages[0].content, "You are a recruiter.");
    }

    #[test]
    fn test_build_conversation_preserves_history_order() {
        let history = vec![
            turn("user", "first"),
            turn("assistant", "second"),
            turn("user", "third"),
        ];
        let messages = build_conversation("prompt", &history);

        assert_eq!(&messages[1..], &history[..]);
    }

    #[test]
    fn test_build_conversation_passes_roles_through_unvalidated() {
        let history = vec![turn("narrator", "unusual role")];
        let messages = build_conversation("prompt", &history);

        assert_eq!(messages[1].role, "narrator");
    }

    #[test]
    fn test_build_conversation_empty_history_yields_system_only() {
        let messages = build_conversation("prompt", &[]);

        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].role, "system");
    }

    #[test]
    fn test_completion_response_first_choice_extracted() {
        let body = r#"{
            "choices": [
                {"message": {"role": "assistant", "content": "Tell me about your last role."}},
                {"message": {"role": "assistant", "content": "alternate"}}
            ]
        }"#;
        let completion: ChatCompletionResponse = serde_json::from_str(body).unwrap();
        let first = completion.choices.into_iter().next().unwrap().message;

        assert_eq!(first.role, "assistant");
        assert_eq!(first.content, "Tell me about your last role.");
    }

    #[test]
    fn test_completion_response_empty_choices() {
        let completion: ChatCompletionResponse = serde_json::from_str(r#"{"choices": []}"#).unwrap();
        assert!(completion.choices.is_empty());
    }

    #[test]
    fn test_openai_error_body_parsed() {
        let body = r#"{"error": {"message": "Rate limit reached", "type": "rate_limit_error"}}"#;
        let parsed: OpenAiError = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.error.message, "Rate limit reached");
    }
}
