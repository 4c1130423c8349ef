//! The user's current choices across all option groups.

use crate::catalog::{
    AspectRatio, FrameSetting, LightingBrightness, LightingDirection, OutputFormat, OutputSize,
    ProductArrangement, ProductDirection, StylePreset,
};
use crate::error::{AdCraftError, Result};
use crate::upload::UploadedImage;
use std::ops::RangeInclusive;
use std::path::Path;

/// Allowed number of products in the creative.
pub const QUANTITY_RANGE: RangeInclusive<u8> = 1..=10;

/// Message shown when generation is requested without image or style.
pub const MISSING_INPUT_MESSAGE: &str = "이미지를 업로드하고, 스타일을 선택해주세요.";

/// Mutable aggregate of every selection, owned by the UI layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionState {
    image: Option<UploadedImage>,
    quantity: u8,
    /// Chosen style preset.
    pub style: Option<StylePreset>,
    /// Target aspect ratio.
    pub aspect_ratio: AspectRatio,
    /// Camera angle.
    pub product_direction: ProductDirection,
    /// Key light position.
    pub lighting_direction: LightingDirection,
    /// Light quality.
    pub lighting_brightness: LightingBrightness,
    /// Layout of multiple products.
    pub product_arrangement: ProductArrangement,
    /// Framing.
    pub frame_setting: FrameSetting,
    /// Requested resolution.
    pub output_size: OutputSize,
    /// Requested file format.
    pub output_format: OutputFormat,
    /// Brand name for the ad copy (free text, may be blank).
    pub brand_name: String,
    /// Tone and manner for the ad copy (free text, may be blank).
    pub tone_and_manner: String,
}

impl Default for SelectionState {
    fn default() -> Self {
        Self {
            image: None,
            quantity: *QUANTITY_RANGE.start(),
            style: None,
            aspect_ratio: AspectRatio::default(),
            product_direction: ProductDirection::default(),
            lighting_direction: LightingDirection::default(),
            lighting_brightness: LightingBrightness::default(),
            product_arrangement: ProductArrangement::default(),
            frame_setting: FrameSetting::default(),
            output_size: OutputSize::default(),
            output_format: OutputFormat::default(),
            brand_name: String::new(),
            tone_and_manner: String::new(),
        }
    }
}

impl SelectionState {
    /// Creates a state with every option at its default.
    pub fn new() -> Self {
        Self::default()
    }

    /// Currently staged image.
    pub fn image(&self) -> Option<&UploadedImage> {
        self.image.as_ref()
    }

    /// Stages `image`, returning the one it replaces.
    pub fn set_image(&mut self, image: UploadedImage) -> Option<UploadedImage> {
        self.image.replace(image)
    }

    /// Releases the staged image.
    pub fn remove_image(&mut self) -> Option<UploadedImage> {
        self.image.take()
    }

    /// Validates and stages raw bytes.
    ///
    /// A rejected upload also clears the previously staged image.
    pub fn upload_bytes(&mut self, data: Vec<u8>, mime_type: &str) -> Result<()> {
        self.stage(UploadedImage::from_bytes(data, mime_type))
    }

    /// Validates and stages a file from disk, with the same clearing rule as
    /// [`upload_bytes`](Self::upload_bytes).
    pub fn upload_path(&mut self, path: impl AsRef<Path>) -> Result<()> {
        self.stage(UploadedImage::from_path(path))
    }

    fn stage(&mut self, upload: Result<UploadedImage>) -> Result<()> {
        match upload {
            Ok(image) => {
                self.image = Some(image);
                Ok(())
            }
            Err(e) => {
                self.image = None;
                Err(e)
            }
        }
    }

    /// Number of products to show.
    pub fn quantity(&self) -> u8 {
        self.quantity
    }

    /// Sets the product count; must lie in [`QUANTITY_RANGE`].
    pub fn set_quantity(&mut self, quantity: u8) -> Result<()> {
        if !QUANTITY_RANGE.contains(&quantity) {
            return Err(AdCraftError::validation(format!(
                "수량은 {}에서 {} 사이여야 합니다.",
                QUANTITY_RANGE.start(),
                QUANTITY_RANGE.end()
            )));
        }
        self.quantity = quantity;
        Ok(())
    }

    /// Sets the style preset.
    pub fn with_style(mut self, style: StylePreset) -> Self {
        self.style = Some(style);
        self
    }

    /// Stages an already validated image.
    pub fn with_image(mut self, image: UploadedImage) -> Self {
        self.image = Some(image);
        self
    }

    /// Sets the aspect ratio.
    pub fn with_aspect_ratio(mut self, ratio: AspectRatio) -> Self {
        self.aspect_ratio = ratio;
        self
    }

    /// Sets the frame setting.
    pub fn with_frame_setting(mut self, frame: FrameSetting) -> Self {
        self.frame_setting = frame;
        self
    }

    /// Sets the output size and format.
    pub fn with_output(mut self, size: OutputSize, format: OutputFormat) -> Self {
        self.output_size = size;
        self.output_format = format;
        self
    }

    /// Sets brand name and tone for the ad copy.
    pub fn with_copy_brief(mut self, brand: impl Into<String>, tone: impl Into<String>) -> Self {
        self.brand_name = brand.into();
        self.tone_and_manner = tone.into();
        self
    }

    /// Returns the image and style required to generate, or the
    /// validation error shown when either is missing.
    pub fn require_inputs(&self) -> Result<(&UploadedImage, StylePreset)> {
        match (self.image.as_ref(), self.style) {
            (Some(image), Some(style)) => Ok((image, style)),
            _ => Err(AdCraftError::validation(MISSING_INPUT_MESSAGE)),
        }
    }

    /// True when both image and style are present.
    pub fn can_generate(&self) -> bool {
        self.require_inputs().is_ok()
    }

    /// True when brand or tone carries text, i.e. ad copy should be requested.
    pub fn wants_copy(&self) -> bool {
        !self.brand_name.trim().is_empty() || !self.tone_and_manner.trim().is_empty()
    }
}
