//! Client for the public Google translate endpoint.

use async_trait::async_trait;
use serde_json::Value;
use tracing::debug;
use url::Url;

use crate::api::Translator;
use crate::config::TRANSLATE_API_URL;
use crate::error::ChatError;

pub struct GoogleTranslateClient {
    client: reqwest::Client,
}

impl GoogleTranslateClient {
    pub fn new() -> Self {
        Self {
            client: crate::api::create_http_client(),
        }
    }
}

impl Default for GoogleTranslateClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Translator for GoogleTranslateClient {
    async fn translate(&self, text: &str, target_lang: &str) -> Result<String, ChatError> {
        let url = Url::parse_with_params(
            TRANSLATE_API_URL,
            &[
                ("client", "gtx"),
                ("sl", "auto"),
                ("tl", target_lang),
                ("dt", "t"),
                ("q", text),
            ],
        )
        .map_err(|_| ChatError::MalformedTranslation)?;

        debug!(target_lang, "sending translation request");

        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ChatError::Api { status, body });
        }

        let payload: Value = response.json().await?;
        parse_translation(&payload)
    }
}

/// The endpoint answers with nested arrays; the translated string is the
/// first element of the first element of the first element.
fn parse_translation(payload: &Value) -> Result<String, ChatError> {
    payload[0][0][0]
        .as_str()
        .map(ToString::to_string)
        .ok_or(ChatError::MalformedTranslation)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_the_nested_array_payload() {
        let payload = json!([[["Hello", "Привет", null, null, 10]], null, "ru"]);
        assert_eq!(parse_translation(&payload).unwrap(), "Hello");
    }

    #[test]
    fn unexpected_shape_is_a_parse_error() {
        let payload = json!({"error": "nope"});
        assert!(matches!(
            parse_translation(&payload),
            Err(ChatError::MalformedTranslation)
        ));
        assert!(matches!(
            parse_translation(&json!([])),
            Err(ChatError::MalformedTranslation)
        ));
    }
}
