#![warn(missing_docs)]
//! AdCraft - AI ad creatives from a single product photo.
//!
//! Pick a background style and a few composition options, optionally give a
//! brand name and tone, and AdCraft asks an image model to restage the photo
//! while a text model writes three short ad copy variants.
//!
//! # Quick Start
//!
//! ```no_run
//! use adcraft::{GeminiClient, SelectionState, StylePreset, Studio};
//!
//! #[tokio::main]
//! async fn main() -> adcraft::Result<()> {
//!     let client = GeminiClient::builder().build()?;
//!     let studio = Studio::gemini(&client);
//!
//!     let mut state = SelectionState::new()
//!         .with_style(StylePreset::Marble)
//!         .with_copy_brief("Aura", "playful");
//!     state.upload_path("product.png")?;
//!
//!     let result = studio.generate(&state).await?;
//!     if let Some(image) = &result.generated_image {
//!         image.save(".")?;
//!     }
//!     for copy in &result.generated_copies {
//!         println!("{}", copy.copy);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! # Features
//!
//! - `gemini`: Gemini image edit and ad copy adapters
//! - `cli`: Command-line interface

mod error;

pub mod catalog;
pub mod prompt;
pub mod provider;
pub mod providers;
pub mod selection;
pub mod studio;
pub mod types;
pub mod upload;

// Re-export error types at crate root
pub use error::{AdCraftError, Result, GENERIC_FAILURE_MESSAGE};

pub use catalog::{
    AspectRatio, CatalogOption, FrameSetting, LightingBrightness, LightingDirection,
    OutputFormat, OutputSize, ProductArrangement, ProductDirection, StylePreset,
};
pub use prompt::Instructions;
pub use provider::{Copywriter, ImageEditor};
pub use selection::SelectionState;
pub use studio::{Session, Studio};
pub use types::{AdCopy, GeneratedImage, GenerationResult, ImageFormat};
pub use upload::UploadedImage;

#[cfg(feature = "gemini")]
pub use providers::{GeminiClient, GeminiClientBuilder, GeminiCopywriter, GeminiImageEditor};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::catalog::*;
    pub use crate::error::{AdCraftError, Result};
    pub use crate::provider::{Copywriter, ImageEditor};
    pub use crate::selection::SelectionState;
    pub use crate::studio::{Session, Studio};
    pub use crate::types::{AdCopy, GeneratedImage, GenerationResult};
    pub use crate::upload::UploadedImage;

    #[cfg(feature = "gemini")]
    pub use crate::providers::GeminiClient;
}
