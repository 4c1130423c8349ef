//! Upload validation and staging.

use crate::error::{AdCraftError, Result};
use crate::types::ImageFormat;
use base64::Engine;
use std::path::Path;

/// MIME types accepted for the product photo.
pub const SUPPORTED_IMAGE_TYPES: [&str; 3] = ["image/jpeg", "image/png", "image/webp"];

/// Message shown for a rejected upload.
pub const UNSUPPORTED_FILE_TYPE_MESSAGE: &str =
    "지원하지 않는 파일 형식입니다. JPG, PNG, WEBP 파일만 지원합니다.";

/// A validated product photo staged for generation.
///
/// Owns the raw bytes; dropping it releases the preview as well.
#[derive(Clone, PartialEq, Eq)]
pub struct UploadedImage {
    name: Option<String>,
    format: ImageFormat,
    data: Vec<u8>,
}

impl std::fmt::Debug for UploadedImage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UploadedImage")
            .field("name", &self.name)
            .field("mime_type", &self.format.mime_type())
            .field("size", &self.data.len())
            .finish()
    }
}

impl UploadedImage {
    /// Stages raw bytes declared with `mime_type`.
    ///
    /// Rejects anything outside [`SUPPORTED_IMAGE_TYPES`] and empty files.
    pub fn from_bytes(data: Vec<u8>, mime_type: &str) -> Result<Self> {
        let format = ImageFormat::from_mime_type(mime_type)
            .ok_or_else(|| AdCraftError::validation(UNSUPPORTED_FILE_TYPE_MESSAGE))?;
        if data.is_empty() {
            return Err(AdCraftError::validation("업로드한 이미지 파일이 비어 있습니다."));
        }
        Ok(Self {
            name: None,
            format,
            data,
        })
    }

    /// Reads and stages a file.
    ///
    /// The type comes from the extension, or from the file header when the
    /// extension is missing or unknown.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let data = std::fs::read(path)?;

        let format = path
            .extension()
            .and_then(|ext| ext.to_str())
            .and_then(ImageFormat::from_extension)
            .or_else(|| ImageFormat::from_magic_bytes(&data))
            .ok_or_else(|| AdCraftError::validation(UNSUPPORTED_FILE_TYPE_MESSAGE))?;

        let mut image = Self::from_bytes(data, format.mime_type())?;
        image.name = path
            .file_name()
            .and_then(|name| name.to_str())
            .map(str::to_string);
        tracing::debug!(
            name = ?image.name,
            mime_type = image.mime_type(),
            size = image.size(),
            "staged upload"
        );
        Ok(image)
    }

    /// Original file name, when staged from disk.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Declared MIME type.
    pub fn mime_type(&self) -> &'static str {
        self.format.mime_type()
    }

    /// Image format.
    pub fn format(&self) -> ImageFormat {
        self.format
    }

    /// Raw bytes.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Size in bytes.
    pub fn size(&self) -> usize {
        self.data.len()
    }

    /// Base64 payload without the data URI prefix.
    pub fn to_base64(&self) -> String {
        base64::engine::general_purpose::STANDARD.encode(&self.data)
    }

    /// Local preview of the upload as a data URI.
    pub fn preview_data_uri(&self) -> String {
        format!("data:{};base64,{}", self.mime_type(), self.to_base64())
    }
}
