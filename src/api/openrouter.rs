//! OpenRouter chat completions client.

use std::env;

use async_trait::async_trait;
use eyre::{eyre, Result};
use serde_json::{json, Value};
use tracing::{debug, error};

use crate::api::ChatApi;
use crate::config::{CHAT_MAX_TOKENS, CHAT_TEMPERATURE, OPENROUTER_API_URL};
use crate::error::ChatError;

pub struct OpenRouterClient {
    api_key: String,
    client: reqwest::Client,
}

impl OpenRouterClient {
    /// Reads the API key from `OPENROUTER_API_KEY`.
    pub fn new() -> Result<Self> {
        let api_key = env::var("OPENROUTER_API_KEY")
            .map_err(|_| eyre!("OPENROUTER_API_KEY environment variable not set"))?;

        Ok(Self {
            api_key,
            client: crate::api::create_http_client(),
        })
    }
}

#[async_trait]
impl ChatApi for OpenRouterClient {
    async fn complete(&self, model: &str, text: &str) -> Result<String, ChatError> {
        let body = json!({
            "model": model,
            "messages": [{"role": "user", "content": text}],
            "max_tokens": CHAT_MAX_TOKENS,
            "temperature": CHAT_TEMPERATURE,
        });

        debug!(model, "sending chat completion request");

        let response = self
            .client
            .post(OPENROUTER_API_URL)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!(%status, "chat API request failed: {body}");
            return Err(ChatError::Api { status, body });
        }

        let payload: Value = response.json().await?;
        debug!("received chat completion response");
        extract_reply(&payload)
    }
}

/// Pull `choices[0].message.content` out of a completion response.
fn extract_reply(payload: &Value) -> Result<String, ChatError> {
    payload["choices"][0]["message"]["content"]
        .as_str()
        .map(ToString::to_string)
        .ok_or(ChatError::MissingContent)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_the_first_completion() {
        let payload = json!({
            "choices": [
                {"message": {"role": "assistant", "content": "Hi there"}},
                {"message": {"role": "assistant", "content": "ignored"}}
            ]
        });
        assert_eq!(extract_reply(&payload).unwrap(), "Hi there");
    }

    #[test]
    fn missing_reply_field_is_a_content_error() {
        let payload = json!({"choices": [{"message": {"role": "assistant"}}]});
        assert!(matches!(
            extract_reply(&payload),
            Err(ChatError::MissingContent)
        ));
    }

    #[test]
    fn empty_choices_is_a_content_error() {
        let payload = json!({"choices": []});
        assert!(matches!(
            extract_reply(&payload),
            Err(ChatError::MissingContent)
        ));
    }
}
