//! Ad copy generation through a Gemini text model with a JSON schema.

use super::{Content, GeminiClient, GenerateContentResponse, RequestPart};
use crate::error::Result;
use crate::prompt::build_copy_instruction;
use crate::provider::Copywriter;
use crate::types::AdCopy;
use async_trait::async_trait;
use serde::Serialize;
use serde_json::{json, Value};

/// Placeholder copy returned when the model output cannot be parsed.
pub const COPY_FALLBACK_MESSAGE: &str = "광고 카피 생성에 실패했습니다. 다시 시도해주세요.";

/// Gemini-backed [`Copywriter`].
#[derive(Debug, Clone)]
pub struct GeminiCopywriter {
    client: GeminiClient,
}

impl GeminiCopywriter {
    /// Wraps a configured client.
    pub fn new(client: GeminiClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Copywriter for GeminiCopywriter {
    async fn write_copies(&self, brand_name: &str, tone_and_manner: &str) -> Result<Vec<AdCopy>> {
        let Some(instruction) = build_copy_instruction(brand_name, tone_and_manner) else {
            return Ok(Vec::new());
        };

        tracing::debug!(model = self.client.copy_model(), "requesting ad copy");
        let body = CopyRequest::new(instruction);
        let response = self
            .client
            .generate_content(self.client.copy_model(), &body)
            .await?;

        Ok(parse_copies(&response_text(&response)))
    }

    fn name(&self) -> &str {
        "Gemini ad copy"
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CopyRequest {
    contents: Vec<Content>,
    generation_config: CopyConfig,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CopyConfig {
    response_mime_type: &'static str,
    response_schema: Value,
}

impl CopyRequest {
    fn new(instruction: String) -> Self {
        Self {
            contents: vec![Content {
                parts: vec![RequestPart::Text { text: instruction }],
            }],
            generation_config: CopyConfig {
                response_mime_type: "application/json",
                response_schema: copies_schema(),
            },
        }
    }
}

/// `{ copies: [{ copy: string }] }`, both fields required.
fn copies_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "copies": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "copy": {
                            "type": "STRING",
                            "description": "A single ad copy suggestion."
                        }
                    },
                    "required": ["copy"]
                }
            }
        },
        "required": ["copies"]
    })
}

/// Concatenated text parts of the first candidate.
fn response_text(response: &GenerateContentResponse) -> String {
    response
        .first_candidate_parts()
        .iter()
        .filter_map(|part| part.text.as_deref())
        .collect()
}

/// Reads the `copies` array out of the model's JSON text.
///
/// A missing or `null` `copies` field yields an empty list. Text that is not
/// JSON, or a `copies` field of the wrong shape, yields the single fallback
/// item.
fn parse_copies(text: &str) -> Vec<AdCopy> {
    let parsed = serde_json::from_str::<Value>(text.trim()).and_then(|value| {
        match value.get("copies") {
            None | Some(Value::Null) => Ok(Vec::new()),
            Some(copies) => serde_json::from_value::<Vec<AdCopy>>(copies.clone()),
        }
    });

    match parsed {
        Ok(copies) => copies,
        Err(e) => {
            tracing::warn!(error = %e, "failed to parse ad copy JSON");
            vec![AdCopy::new(COPY_FALLBACK_MESSAGE)]
        }
    }
}
