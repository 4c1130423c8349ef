//! Product photo editing through a Gemini image model.

use super::{Content, GeminiClient, GenerateContentResponse, InlineData, RequestPart};
use crate::error::Result;
use crate::provider::ImageEditor;
use crate::types::GeneratedImage;
use crate::upload::UploadedImage;
use async_trait::async_trait;
use serde::Serialize;

/// Gemini-backed [`ImageEditor`].
#[derive(Debug, Clone)]
pub struct GeminiImageEditor {
    client: GeminiClient,
}

impl GeminiImageEditor {
    /// Wraps a configured client.
    pub fn new(client: GeminiClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ImageEditor for GeminiImageEditor {
    async fn edit(
        &self,
        image: &UploadedImage,
        instruction: &str,
    ) -> Result<Option<GeneratedImage>> {
        let body = EditRequest::new(image, instruction);
        tracing::debug!(
            model = self.client.image_model(),
            mime_type = image.mime_type(),
            image_bytes = image.size(),
            instruction_chars = instruction.chars().count(),
            "requesting image edit"
        );

        let response = self
            .client
            .generate_content(self.client.image_model(), &body)
            .await?;
        extract_image(&response)
    }

    fn name(&self) -> &str {
        "Gemini image edit"
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct EditRequest {
    contents: Vec<Content>,
    generation_config: EditConfig,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct EditConfig {
    response_modalities: Vec<&'static str>,
}

impl EditRequest {
    /// Photo first, instruction second.
    fn new(image: &UploadedImage, instruction: &str) -> Self {
        let parts = vec![
            RequestPart::InlineData {
                inline_data: InlineData {
                    mime_type: image.mime_type().to_string(),
                    data: image.to_base64(),
                },
            },
            RequestPart::Text {
                text: instruction.to_string(),
            },
        ];

        Self {
            contents: vec![Content { parts }],
            generation_config: EditConfig {
                response_modalities: vec!["IMAGE", "TEXT"],
            },
        }
    }
}

/// Returns the first inline image of the first candidate as a data URI.
///
/// A response without an image part is no result, not an error; the finish
/// reason is logged so safety stops stay visible.
fn extract_image(response: &GenerateContentResponse) -> Result<Option<GeneratedImage>> {
    let image = response
        .first_candidate_parts()
        .iter()
        .find_map(|part| part.inline_data.as_ref())
        .map(|inline| GeneratedImage::from_base64(&inline.mime_type, &inline.data));

    if image.is_none() {
        tracing::warn!(
            finish_reason = ?response.finish_reason(),
            "Gemini response carried no image"
        );
    }
    Ok(image)
}
