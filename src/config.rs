//! Configuration constants for external services and session defaults.
//!
//! Secrets (API keys) are read from the environment at client construction,
//! everything else lives here.

use std::time::Duration;

/// Deadline applied to every external call (translation, chat, image).
pub const API_TIMEOUT: Duration = Duration::from_secs(30);

/// OpenRouter chat completions endpoint.
pub const OPENROUTER_API_URL: &str = "https://openrouter.ai/api/v1/chat/completions";
/// Maximum tokens requested per completion.
pub const CHAT_MAX_TOKENS: u32 = 512;
/// Sampling temperature for completions.
pub const CHAT_TEMPERATURE: f64 = 0.7;

/// Hugging Face inference endpoint for the image model.
pub const IMAGE_API_URL: &str =
    "https://api-inference.huggingface.co/models/stabilityai/stable-diffusion-xl-base-1.0";
/// Generated image width in pixels.
pub const IMAGE_WIDTH: u32 = 1024;
/// Generated image height in pixels.
pub const IMAGE_HEIGHT: u32 = 1024;

/// Public Google translate endpoint (no API key).
pub const TRANSLATE_API_URL: &str = "https://translate.googleapis.com/translate_a/single";
/// Language user input is translated into before hitting the chat API.
pub const API_LANGUAGE: &str = "en";
/// Language replies are translated back into when translation is enabled.
pub const DEFAULT_BASE_LANGUAGE: &str = "ru";

/// Model used when none is selected.
pub const DEFAULT_MODEL: &str = "openai/gpt-4o-mini";
/// Image style prefixed to prompts when none is selected.
pub const DEFAULT_IMAGE_STYLE: &str = "digital art";

pub const TRANSLATE_TIMEOUT_MESSAGE: &str = "Timed out waiting for translation";
pub const TRANSLATE_BACK_TIMEOUT_MESSAGE: &str = "Timed out waiting for reply translation";
pub const CHAT_TIMEOUT_MESSAGE: &str = "Timed out waiting for the chat API";
pub const IMAGE_TIMEOUT_MESSAGE: &str = "Timed out waiting for image generation";
