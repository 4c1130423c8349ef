//! Gemini (Google) adapters.
//!
//! Both adapters share one [`GeminiClient`] and talk to the
//! `models/{model}:generateContent` endpoint.

mod ad_copy;
mod image_edit;

pub use ad_copy::{GeminiCopywriter, COPY_FALLBACK_MESSAGE};
pub use image_edit::GeminiImageEditor;

use crate::error::{parse_retry_after, sanitize_error_message, AdCraftError, Result};
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

/// Default model for photo editing.
pub const DEFAULT_IMAGE_MODEL: &str = "gemini-2.5-flash-image-preview";
/// Default model for ad copy.
pub const DEFAULT_COPY_MODEL: &str = "gemini-2.5-flash";

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// Builder for [`GeminiClient`].
#[derive(Debug, Clone, Default)]
pub struct GeminiClientBuilder {
    api_key: Option<String>,
    base_url: Option<String>,
    image_model: Option<String>,
    copy_model: Option<String>,
}

impl GeminiClientBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the API key. Falls back to `GOOGLE_API_KEY`, then `API_KEY`.
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Overrides the API root (proxies, tests).
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Sets the image model. Defaults to [`DEFAULT_IMAGE_MODEL`].
    pub fn image_model(mut self, model: impl Into<String>) -> Self {
        self.image_model = Some(model.into());
        self
    }

    /// Sets the copy model. Defaults to [`DEFAULT_COPY_MODEL`].
    pub fn copy_model(mut self, model: impl Into<String>) -> Self {
        self.copy_model = Some(model.into());
        self
    }

    /// Builds the client, resolving the API key.
    pub fn build(self) -> Result<GeminiClient> {
        let api_key = self
            .api_key
            .filter(|key| !key.trim().is_empty())
            .or_else(|| env_non_empty("GOOGLE_API_KEY"))
            .or_else(|| env_non_empty("API_KEY"))
            .ok_or_else(|| {
                AdCraftError::Auth("GOOGLE_API_KEY not set and no API key provided".into())
            })?;

        let base_url = self
            .base_url
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
            .trim_end_matches('/')
            .to_string();

        Ok(GeminiClient {
            http: reqwest::Client::new(),
            api_key,
            base_url,
            image_model: self
                .image_model
                .unwrap_or_else(|| DEFAULT_IMAGE_MODEL.to_string()),
            copy_model: self
                .copy_model
                .unwrap_or_else(|| DEFAULT_COPY_MODEL.to_string()),
        })
    }
}

fn env_non_empty(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

/// Authenticated Gemini REST client.
#[derive(Clone)]
pub struct GeminiClient {
    http: reqwest::Client,
    api_key: String,
    base_url: String,
    image_model: String,
    copy_model: String,
}

impl std::fmt::Debug for GeminiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiClient")
            .field("base_url", &self.base_url)
            .field("image_model", &self.image_model)
            .field("copy_model", &self.copy_model)
            .finish_non_exhaustive()
    }
}

impl GeminiClient {
    /// Creates a new `GeminiClientBuilder`.
    pub fn builder() -> GeminiClientBuilder {
        GeminiClientBuilder::new()
    }

    /// Image model identifier in use.
    pub fn image_model(&self) -> &str {
        &self.image_model
    }

    /// Copy model identifier in use.
    pub fn copy_model(&self) -> &str {
        &self.copy_model
    }

    /// Photo-editing adapter sharing this client.
    pub fn image_editor(&self) -> GeminiImageEditor {
        GeminiImageEditor::new(self.clone())
    }

    /// Ad-copy adapter sharing this client.
    pub fn copywriter(&self) -> GeminiCopywriter {
        GeminiCopywriter::new(self.clone())
    }

    fn endpoint(&self, model: &str) -> String {
        format!("{}/v1beta/models/{}:generateContent", self.base_url, model)
    }

    /// Posts one `generateContent` request and decodes the response.
    async fn generate_content<B: Serialize + Sync>(
        &self,
        model: &str,
        body: &B,
    ) -> Result<GenerateContentResponse> {
        let start = Instant::now();

        let response = self
            .http
            .post(self.endpoint(model))
            .header("x-goog-api-key", &self.api_key)
            .header("Content-Type", "application/json")
            .json(body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let headers = response.headers().clone();
            let text = response.text().await.unwrap_or_default();
            return Err(parse_error(status.as_u16(), &text, &headers));
        }

        let text = response.text().await?;
        let decoded: GenerateContentResponse = decode_response(&text)?;
        tracing::debug!(
            model,
            elapsed_ms = start.elapsed().as_millis() as u64,
            candidates = decoded.candidates.len(),
            "Gemini generateContent complete"
        );

        if let Some(ref feedback) = decoded.prompt_feedback {
            if let Some(ref reason) = feedback.block_reason {
                let msg = feedback
                    .block_reason_message
                    .clone()
                    .unwrap_or_else(|| format!("Prompt blocked: {reason}"));
                return Err(AdCraftError::ContentBlocked(msg));
            }
        }

        Ok(decoded)
    }
}

/// Maps a non-success HTTP answer to an error, keeping Gemini's own message.
fn parse_error(status: u16, text: &str, headers: &reqwest::header::HeaderMap) -> AdCraftError {
    let message = serde_json::from_str::<ErrorEnvelope>(text)
        .ok()
        .and_then(|envelope| envelope.error.message)
        .unwrap_or_else(|| text.to_string());
    let message = sanitize_error_message(&message);

    match status {
        401 | 403 => AdCraftError::Auth(message),
        429 => AdCraftError::RateLimited {
            message,
            retry_after: parse_retry_after(headers).map(Duration::from_secs),
        },
        _ => {
            let lower = message.to_lowercase();
            if lower.contains("safety") || lower.contains("blocked") || lower.contains("prohibited")
            {
                AdCraftError::ContentBlocked(message)
            } else {
                AdCraftError::Api { status, message }
            }
        }
    }
}

/// Decodes a successful `generateContent` body.
fn decode_response(text: &str) -> Result<GenerateContentResponse> {
    serde_json::from_str(text).map_err(|e| {
        tracing::warn!(error = %e, body_len = text.len(), "undecodable Gemini response");
        AdCraftError::UnexpectedResponse(format!(
            "failed to decode generateContent response: {e}"
        ))
    })
}

// Wire types shared by both adapters.

#[derive(Debug, Serialize)]
struct Content {
    parts: Vec<RequestPart>,
}

/// A part in a request - text or inline image data.
#[derive(Debug, Serialize)]
#[serde(untagged)]
enum RequestPart {
    InlineData {
        #[serde(rename = "inlineData")]
        inline_data: InlineData,
    },
    Text {
        text: String,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct InlineData {
    mime_type: String,
    data: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    #[serde(default)]
    prompt_feedback: Option<PromptFeedback>,
}

impl GenerateContentResponse {
    /// Parts of the first candidate, empty when there is none.
    fn first_candidate_parts(&self) -> &[ResponsePart] {
        self.candidates
            .first()
            .and_then(|c| c.content.as_ref())
            .map(|content| content.parts.as_slice())
            .unwrap_or_default()
    }

    fn finish_reason(&self) -> Option<&str> {
        self.candidates.first()?.finish_reason.as_deref()
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    #[serde(default)]
    content: Option<ResponseContent>,
    #[serde(default)]
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    #[serde(default)]
    block_reason: Option<String>,
    #[serde(default)]
    block_reason_message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ResponseContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ResponsePart {
    #[serde(default)]
    text: Option<String>,
    #[serde(default)]
    inline_data: Option<InlineData>,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
}
