//! Error types for external calls and turn orchestration.

use reqwest::StatusCode;
use thiserror::Error;

/// Failure of one external call or of the turn driving it.
///
/// Translation transport/parse failures are recovered by the controller
/// (fallback to the untranslated text); every other variant ends the turn
/// and is rendered as an error bubble.
#[derive(Debug, Error)]
pub enum ChatError {
    /// The deadline elapsed before the call settled.
    #[error("{message}")]
    Timeout { message: String },

    /// Non-success HTTP status from an API.
    #[error("API error: {status} {body}")]
    Api { status: StatusCode, body: String },

    /// Well-formed completion response without the expected reply field.
    #[error("API response did not contain a reply")]
    MissingContent,

    /// Translation payload did not have the expected nested-array shape.
    #[error("malformed translation response")]
    MalformedTranslation,

    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ChatError {
    /// True for failures the translation step may recover from by keeping
    /// the original text. Timeouts are deliberately not recoverable.
    pub fn is_recoverable_translation_failure(&self) -> bool {
        !matches!(self, ChatError::Timeout { .. })
    }
}
