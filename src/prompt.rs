//! Prompt assembly.
//!
//! Renders a [`SelectionState`] into the instruction for the image model and
//! the instruction for the copy model. Both are plain string concatenation;
//! the output depends only on the selection.

use crate::catalog::{AspectRatio, CatalogOption, FrameSetting, OutputFormat, OutputSize};
use crate::error::{AdCraftError, Result};
use crate::selection::{SelectionState, MISSING_INPUT_MESSAGE};

/// Frame clause for [`FrameSetting::Filled`].
pub const FRAME_FILLED_CLAUSE: &str = "제품이 프레임을 가득 채우도록 클로즈업해서 연출해주세요.";
/// Frame clause for [`FrameSetting::Left`].
pub const FRAME_LEFT_CLAUSE: &str = "제품을 프레임의 왼쪽에 여백을 두고 배치해주세요.";
/// Frame clause for [`FrameSetting::Right`].
pub const FRAME_RIGHT_CLAUSE: &str = "제품을 프레임의 오른쪽에 여백을 두고 배치해주세요.";
/// Closing clause of every image instruction.
pub const IMAGE_CLOSING_CLAUSE: &str =
    "광고에 사용될 수 있도록 제품을 더욱 매력적이고 선명하게 만들어주세요.";

const COPY_PREAMBLE: &str = "당신은 전문 카피라이터입니다. 소셜 미디어 게시물을 위한 짧고 시선을 사로잡는 광고 카피 3가지를 작성해주세요.";
const COPY_CLOSING_CLAUSE: &str = "이미지를 기반으로 한 광고에 적합해야 합니다.";

/// Both instructions for one generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Instructions {
    /// Instruction sent with the product photo.
    pub image: String,
    /// Instruction for the copy model; `None` when brand and tone are blank.
    pub copy: Option<String>,
}

/// Assembles both instructions. Fails when no style is selected.
pub fn assemble(state: &SelectionState) -> Result<Instructions> {
    Ok(Instructions {
        image: build_image_instruction(state)?,
        copy: build_copy_instruction(&state.brand_name, &state.tone_and_manner),
    })
}

/// Builds the image-model instruction.
///
/// Clause order: style, customization, frame, aspect ratio, output settings,
/// closing. Optional clauses are skipped for sentinel options. Whitespace
/// runs collapse to a single space and the result is trimmed.
pub fn build_image_instruction(state: &SelectionState) -> Result<String> {
    let style = state
        .style
        .ok_or_else(|| AdCraftError::validation(MISSING_INPUT_MESSAGE))?;

    let mut parts: Vec<String> = vec![style.prompt().to_string(), customization_clause(state)];

    if let Some(clause) = frame_clause(state.frame_setting) {
        parts.push(clause.to_string());
    }
    if let Some(clause) = aspect_ratio_clause(state.aspect_ratio) {
        parts.push(clause);
    }
    if let Some(clause) = output_clause(state.output_size, state.output_format) {
        parts.push(clause);
    }
    parts.push(IMAGE_CLOSING_CLAUSE.to_string());

    Ok(normalize_whitespace(&parts.join(" ")))
}

/// Direction, lighting, quantity and arrangement sentence.
///
/// Arrangement labels already carry their adverbial ending ("원형으로",
/// "자연스럽게"), so no "으로" is appended after them.
fn customization_clause(state: &SelectionState) -> String {
    format!(
        "제품은 {} 방향에서 보이게 촬영한 것처럼 연출해주세요. 조명은 {}에서 비추는 것처럼, 조명 밝기는 {}으로 연출해주세요. 이미지에는 제품 {}개를 {} 배치해주세요.",
        state.product_direction.label(),
        state.lighting_direction.label(),
        state.lighting_brightness.label(),
        state.quantity(),
        state.product_arrangement.label(),
    )
}

fn frame_clause(frame: FrameSetting) -> Option<&'static str> {
    match frame {
        FrameSetting::Filled => Some(FRAME_FILLED_CLAUSE),
        FrameSetting::Left => Some(FRAME_LEFT_CLAUSE),
        FrameSetting::Right => Some(FRAME_RIGHT_CLAUSE),
        FrameSetting::Default => None,
    }
}

fn aspect_ratio_clause(ratio: AspectRatio) -> Option<String> {
    match ratio {
        AspectRatio::None => None,
        other => Some(format!("최종 이미지의 종횡비는 {}로 맞춰주세요.", other.label())),
    }
}

fn output_clause(size: OutputSize, format: OutputFormat) -> Option<String> {
    let mut settings = Vec::with_capacity(2);
    if size != OutputSize::None {
        settings.push(format!("해상도는 {} 픽셀", size.id()));
    }
    if format != OutputFormat::None {
        settings.push(format!("파일 형식은 {}", format.id()));
    }
    if settings.is_empty() {
        return None;
    }
    Some(format!("최종 이미지는 {}로 생성해주세요.", settings.join(", ")))
}

/// Builds the copy-model instruction, or `None` if brand and tone are both
/// blank (the copy request is then skipped).
pub fn build_copy_instruction(brand_name: &str, tone_and_manner: &str) -> Option<String> {
    let brand = brand_name.trim();
    let tone = tone_and_manner.trim();

    let mut details = Vec::with_capacity(2);
    if !brand.is_empty() {
        details.push(format!("브랜드는 \"{brand}\""));
    }
    if !tone.is_empty() {
        details.push(format!("톤앤매너는 \"{tone}\""));
    }
    if details.is_empty() {
        return None;
    }

    Some(format!(
        "{COPY_PREAMBLE} {}입니다. {COPY_CLOSING_CLAUSE}",
        details.join("이고, ")
    ))
}

/// Collapses every whitespace run to one space and trims both ends.
pub fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
