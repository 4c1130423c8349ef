//! Error types for ad creative generation.

use std::time::Duration;

/// Message shown when a failure carries no usable description.
pub const GENERIC_FAILURE_MESSAGE: &str = "알 수 없는 오류가 발생했습니다.";

/// Maximum length of an upstream error body surfaced to the user.
const MAX_ERROR_MESSAGE_LEN: usize = 500;

/// Errors that can occur while generating an ad creative.
#[derive(Debug, thiserror::Error)]
pub enum AdCraftError {
    /// Local validation failed (missing image/style, bad option, bad file type).
    /// No network call is made when this is returned.
    #[error("{0}")]
    Validation(String),

    /// API key missing or invalid.
    #[error("authentication failed: {0}")]
    Auth(String),

    /// API returned an error response.
    #[error("API error: {status} - {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Sanitized service message.
        message: String,
    },

    /// Rate limit exceeded.
    #[error("rate limited: {message}")]
    RateLimited {
        /// Sanitized service message.
        message: String,
        /// Server-suggested delay, if any.
        retry_after: Option<Duration>,
    },

    /// Content was blocked by safety filters.
    #[error("content blocked: {0}")]
    ContentBlocked(String),

    /// A successful answer whose body could not be decoded.
    #[error("unexpected response: {0}")]
    UnexpectedResponse(String),

    /// The image model answered without any image part.
    #[error("이미지 생성에 실패했습니다. 모델이 이미지를 반환하지 않았습니다.")]
    NoImage,

    /// Network or HTTP error.
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Failed to decode base64 data or a data URI.
    #[error("failed to decode: {0}")]
    Decode(String),

    /// I/O error (e.g., reading an upload, saving the result).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl AdCraftError {
    /// Shorthand for a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Returns true for errors raised locally before any network call.
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Returns the human-readable message to show the user.
    ///
    /// Service and safety messages are passed through as-is. Falls back to a
    /// generic message when the underlying error has none.
    pub fn user_message(&self) -> String {
        let message = match self {
            Self::Api { message, .. }
            | Self::RateLimited { message, .. }
            | Self::Auth(message)
            | Self::ContentBlocked(message) => message.clone(),
            other => other.to_string(),
        };
        if message.trim().is_empty() {
            GENERIC_FAILURE_MESSAGE.to_string()
        } else {
            message
        }
    }
}

/// Result type alias for ad creative operations.
pub type Result<T> = std::result::Result<T, AdCraftError>;

/// Strips secrets and bounds the length of an upstream error body.
///
/// Gemini echoes request URLs in some error bodies, which may carry a `key=`
/// query parameter.
pub(crate) fn sanitize_error_message(text: &str) -> String {
    let mut out = String::with_capacity(text.len().min(MAX_ERROR_MESSAGE_LEN));
    let mut rest = text.trim();

    while let Some(pos) = rest.find("key=") {
        out.push_str(&rest[..pos + 4]);
        out.push_str("[REDACTED]");
        rest = &rest[pos + 4..];
        let end = rest
            .find(|c: char| c == '&' || c == '"' || c.is_whitespace())
            .unwrap_or(rest.len());
        rest = &rest[end..];
    }
    out.push_str(rest);

    if out.chars().count() > MAX_ERROR_MESSAGE_LEN {
        let truncated: String = out.chars().take(MAX_ERROR_MESSAGE_LEN).collect();
        return format!("{truncated}...");
    }
    out
}

/// Reads a `Retry-After` header expressed in seconds.
pub(crate) fn parse_retry_after(headers: &reqwest::header::HeaderMap) -> Option<u64> {
    headers
        .get(reqwest::header::RETRY_AFTER)?
        .to_str()
        .ok()?
        .trim()
        .parse()
        .ok()
}
