//! Remote adapters.

#[cfg(feature = "gemini")]
mod gemini;

#[cfg(feature = "gemini")]
pub use gemini::{
    GeminiClient, GeminiClientBuilder, GeminiCopywriter, GeminiImageEditor, COPY_FALLBACK_MESSAGE,
    DEFAULT_COPY_MODEL, DEFAULT_IMAGE_MODEL,
};
