//! HTTP clients for the external services and the trait seams the
//! conversation controller talks through.

pub mod huggingface;
pub mod openrouter;
pub mod translate;

use async_trait::async_trait;

use crate::error::ChatError;

pub use huggingface::HuggingFaceImageClient;
pub use openrouter::OpenRouterClient;
pub use translate::GoogleTranslateClient;

/// Single-turn chat completion. Stateless: no conversation history is sent.
#[async_trait]
pub trait ChatApi: Send + Sync {
    async fn complete(&self, model: &str, text: &str) -> Result<String, ChatError>;
}

/// Image generation from a fully assembled prompt. Returns raw image bytes.
#[async_trait]
pub trait ImageApi: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<Vec<u8>, ChatError>;
}

/// Machine translation into `target_lang` with source auto-detection.
#[async_trait]
pub trait Translator: Send + Sync {
    async fn translate(&self, text: &str, target_lang: &str) -> Result<String, ChatError>;
}

pub fn create_http_client() -> reqwest::Client {
    reqwest::Client::new()
}
