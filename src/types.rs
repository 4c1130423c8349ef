//! Core types shared by the adapters, the studio and the presenters.

use crate::error::{AdCraftError, Result};
use base64::Engine;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Base name of the downloadable creative.
pub const DOWNLOAD_BASE_NAME: &str = "ai-generated-image";

/// Image formats accepted as uploads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageFormat {
    /// PNG format (lossless).
    Png,
    /// JPEG format (lossy).
    Jpeg,
    /// WebP format.
    WebP,
}

impl ImageFormat {
    /// Returns the MIME type for this format.
    pub fn mime_type(&self) -> &'static str {
        match self {
            Self::Png => "image/png",
            Self::Jpeg => "image/jpeg",
            Self::WebP => "image/webp",
        }
    }

    /// Parses one of the accepted MIME types.
    pub fn from_mime_type(mime: &str) -> Option<Self> {
        match mime.trim().to_ascii_lowercase().as_str() {
            "image/png" => Some(Self::Png),
            "image/jpeg" => Some(Self::Jpeg),
            "image/webp" => Some(Self::WebP),
            _ => None,
        }
    }

    /// Attempts to detect format from file extension.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "png" => Some(Self::Png),
            "jpg" | "jpeg" => Some(Self::Jpeg),
            "webp" => Some(Self::WebP),
            _ => None,
        }
    }

    /// Detects image format from magic bytes.
    pub fn from_magic_bytes(data: &[u8]) -> Option<Self> {
        if data.len() < 12 {
            return None;
        }

        // PNG: 89 50 4E 47 0D 0A 1A 0A
        if data.starts_with(&[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A]) {
            return Some(Self::Png);
        }

        // JPEG: FF D8 FF
        if data.starts_with(&[0xFF, 0xD8, 0xFF]) {
            return Some(Self::Jpeg);
        }

        // WebP: RIFF....WEBP
        if data.starts_with(b"RIFF") && &data[8..12] == b"WEBP" {
            return Some(Self::WebP);
        }

        None
    }
}

/// One ad copy suggestion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdCopy {
    /// The copy text.
    pub copy: String,
}

impl AdCopy {
    /// Creates a copy item.
    pub fn new(copy: impl Into<String>) -> Self {
        Self { copy: copy.into() }
    }
}

/// A creative returned by the image model, held as a data URI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
#[must_use = "generated image should be saved or displayed"]
pub struct GeneratedImage {
    data_uri: String,
}

impl GeneratedImage {
    /// Wraps a `data:<mime>;base64,<payload>` URI.
    pub fn from_data_uri(data_uri: impl Into<String>) -> Self {
        Self {
            data_uri: data_uri.into(),
        }
    }

    /// Builds the data URI from a MIME type and a base64 payload.
    pub fn from_base64(mime_type: &str, payload: &str) -> Self {
        Self::from_data_uri(format!("data:{mime_type};base64,{payload}"))
    }

    /// Returns the full data URI.
    pub fn data_uri(&self) -> &str {
        &self.data_uri
    }

    /// MIME type between `data:` and the first `;`, if present.
    pub fn mime_type(&self) -> Option<&str> {
        let header = self.data_uri.split(';').next()?;
        let mime = header.strip_prefix("data:")?;
        (!mime.is_empty()).then_some(mime)
    }

    /// File extension taken from the MIME subtype, `png` when absent.
    pub fn extension(&self) -> &str {
        self.mime_type()
            .and_then(|mime| mime.split('/').nth(1))
            .filter(|sub| !sub.is_empty())
            .unwrap_or("png")
    }

    /// Name the creative is downloaded under.
    pub fn download_file_name(&self) -> String {
        format!("{DOWNLOAD_BASE_NAME}.{}", self.extension())
    }

    /// Decodes the base64 payload.
    pub fn decode(&self) -> Result<Vec<u8>> {
        let payload = self
            .data_uri
            .split_once(";base64,")
            .map(|(_, payload)| payload)
            .ok_or_else(|| AdCraftError::Decode("not a base64 data URI".into()))?;
        base64::engine::general_purpose::STANDARD
            .decode(payload)
            .map_err(|e| AdCraftError::Decode(e.to_string()))
    }

    /// Writes the decoded image into `dir` under its download name.
    pub fn save(&self, dir: impl AsRef<Path>) -> Result<PathBuf> {
        let path = dir.as_ref().join(self.download_file_name());
        std::fs::write(&path, self.decode()?)?;
        Ok(path)
    }
}

/// Outcome of one generation request, as presented to the user.
///
/// Either a full success (image plus copies) or an error; never both.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationResult {
    /// The creative, when generation succeeded.
    pub generated_image: Option<GeneratedImage>,
    /// Copy suggestions in the order the model returned them.
    pub generated_copies: Vec<AdCopy>,
    /// User-facing failure message.
    pub error: Option<String>,
}

impl GenerationResult {
    /// Successful result.
    pub fn success(image: GeneratedImage, copies: Vec<AdCopy>) -> Self {
        Self {
            generated_image: Some(image),
            generated_copies: copies,
            error: None,
        }
    }

    /// Failed result carrying only the message.
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            error: Some(message.into()),
            ..Self::default()
        }
    }

    /// True when nothing has been produced yet.
    pub fn is_empty(&self) -> bool {
        self.generated_image.is_none() && self.generated_copies.is_empty() && self.error.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PNG_MAGIC: [u8; 12] = [0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0, 0, 0, 0];
    const JPEG_MAGIC: [u8; 12] = [0xFF, 0xD8, 0xFF, 0xE0, 0, 0, 0, 0, 0, 0, 0, 0];
    const WEBP_MAGIC: [u8; 12] = *b"RIFF\x00\x00\x00\x00WEBP";

    #[test]
    fn test_format_from_magic_bytes() {
        assert_eq!(
            ImageFormat::from_magic_bytes(&PNG_MAGIC),
            Some(ImageFormat::Png)
        );
        assert_eq!(
            ImageFormat::from_magic_bytes(&JPEG_MAGIC),
            Some(ImageFormat::Jpeg)
        );
        assert_eq!(
            ImageFormat::from_magic_bytes(&WEBP_MAGIC),
            Some(ImageFormat::WebP)
        );
        assert_eq!(ImageFormat::from_magic_bytes(b"GIF89a000000"), None);
    }

    #[test]
    fn test_format_from_mime_type() {
        assert_eq!(
            ImageFormat::from_mime_type("image/jpeg"),
            Some(ImageFormat::Jpeg)
        );
        assert_eq!(
            ImageFormat::from_mime_type("IMAGE/WEBP"),
            Some(ImageFormat::WebP)
        );
        assert_eq!(ImageFormat::from_mime_type("image/gif"), None);
    }

    #[test]
    fn test_download_name_uses_mime_subtype() {
        let image = GeneratedImage::from_base64("image/jpeg", "AAAA");
        assert_eq!(image.mime_type(), Some("image/jpeg"));
        assert_eq!(image.download_file_name(), "ai-generated-image.jpeg");

        let image = GeneratedImage::from_base64("image/webp", "AAAA");
        assert_eq!(image.download_file_name(), "ai-generated-image.webp");
    }

    #[test]
    fn test_download_name_defaults_to_png() {
        let image = GeneratedImage::from_data_uri("data:;base64,AAAA");
        assert_eq!(image.mime_type(), None);
        assert_eq!(image.download_file_name(), "ai-generated-image.png");

        let image = GeneratedImage::from_data_uri("data:image;base64,AAAA");
        assert_eq!(image.extension(), "png");
    }

    #[test]
    fn test_decode_and_save() {
        let image = GeneratedImage::from_base64("image/png", "iVBORw0KGgo=");
        let bytes = image.decode().unwrap();
        assert_eq!(&bytes[..4], &[0x89, b'P', b'N', b'G']);

        let dir = tempfile::tempdir().unwrap();
        let path = image.save(dir.path()).unwrap();
        assert_eq!(path.file_name().unwrap(), "ai-generated-image.png");
        assert_eq!(std::fs::read(path).unwrap(), bytes);
    }

    #[test]
    fn test_decode_rejects_non_data_uri() {
        let image = GeneratedImage::from_data_uri("https://example.com/x.png");
        assert!(matches!(image.decode(), Err(AdCraftError::Decode(_))));
    }

    #[test]
    fn test_result_constructors() {
        assert!(GenerationResult::default().is_empty());

        let ok = GenerationResult::success(
            GeneratedImage::from_base64("image/png", "AAAA"),
            vec![AdCopy::new("Glow up")],
        );
        assert!(ok.error.is_none());
        assert_eq!(ok.generated_copies.len(), 1);

        let failed = GenerationResult::failure("boom");
        assert!(failed.generated_image.is_none());
        assert!(failed.generated_copies.is_empty());
        assert_eq!(failed.error.as_deref(), Some("boom"));
    }
}
