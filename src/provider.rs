//! Adapter traits for the two remote calls.

use crate::error::Result;
use crate::types::{AdCopy, GeneratedImage};
use crate::upload::UploadedImage;
use async_trait::async_trait;

/// Edits a product photo according to a text instruction.
#[async_trait]
pub trait ImageEditor: Send + Sync {
    /// Sends the photo and instruction to the image model.
    ///
    /// Returns `Ok(None)` when the model answered without any image; that is
    /// not an error at this layer. Transport and service faults are errors.
    async fn edit(
        &self,
        image: &UploadedImage,
        instruction: &str,
    ) -> Result<Option<GeneratedImage>>;

    /// Returns the name of this adapter for display.
    fn name(&self) -> &str;
}

/// Writes ad copy suggestions for a brand and tone.
#[async_trait]
pub trait Copywriter: Send + Sync {
    /// Requests copy variants.
    ///
    /// Malformed model output is recovered into a single placeholder item
    /// instead of an error, so it never blocks an otherwise good image.
    async fn write_copies(&self, brand_name: &str, tone_and_manner: &str) -> Result<Vec<AdCopy>>;

    /// Returns the name of this adapter for display.
    fn name(&self) -> &str;
}
