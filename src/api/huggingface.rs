//! Hugging Face inference client for image generation.

use std::env;

use async_trait::async_trait;
use eyre::{eyre, Result};
use serde_json::json;
use tracing::{debug, error};

use crate::api::ImageApi;
use crate::config::{IMAGE_API_URL, IMAGE_HEIGHT, IMAGE_WIDTH};
use crate::error::ChatError;

pub struct HuggingFaceImageClient {
    api_token: String,
    client: reqwest::Client,
}

impl HuggingFaceImageClient {
    /// Reads the API token from `HF_API_TOKEN`.
    pub fn new() -> Result<Self> {
        let api_token = env::var("HF_API_TOKEN")
            .map_err(|_| eyre!("HF_API_TOKEN environment variable not set"))?;

        Ok(Self {
            api_token,
            client: crate::api::create_http_client(),
        })
    }
}

#[async_trait]
impl ImageApi for HuggingFaceImageClient {
    async fn generate(&self, prompt: &str) -> Result<Vec<u8>, ChatError> {
        let body = json!({
            "inputs": prompt,
            "parameters": {
                "width": IMAGE_WIDTH,
                "height": IMAGE_HEIGHT,
            }
        });

        debug!(prompt, "sending image generation request");

        let response = self
            .client
            .post(IMAGE_API_URL)
            .header("Authorization", format!("Bearer {}", self.api_token))
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!(%status, "image API request failed: {body}");
            return Err(ChatError::Api { status, body });
        }

        let bytes = response.bytes().await?;
        debug!(len = bytes.len(), "received image bytes");
        Ok(bytes.to_vec())
    }
}

/// Prefix the configured style descriptor onto the user's prompt.
pub fn style_prompt(style: &str, prompt: &str) -> String {
    format!("{style}, {prompt}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn style_is_prefixed_to_the_prompt() {
        assert_eq!(style_prompt("oil painting", "a fox"), "oil painting, a fox");
    }
}
