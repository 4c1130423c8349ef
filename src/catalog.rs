//! Static option catalog.
//!
//! Every selectable option group is a closed enum. Sentinel variants
//! (`AspectRatio::None`, `FrameSetting::Default`, `OutputSize::None`,
//! `OutputFormat::None`) mean "emit no instruction for this option".

use crate::error::{AdCraftError, Result};
use serde::{Deserialize, Serialize};

/// Common surface shared by all catalog groups.
pub trait CatalogOption: Copy + Sized + 'static {
    /// Human-readable name of the option group (used in error messages).
    const GROUP: &'static str;

    /// Every option in display order. The first entry is the default.
    const ALL: &'static [Self];

    /// Stable identifier used on the command line and in JSON.
    fn id(&self) -> &'static str;

    /// Display label.
    fn label(&self) -> &'static str;

    /// Looks an option up by id.
    fn from_id(id: &str) -> Result<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|opt| opt.id() == id)
            .ok_or_else(|| {
                let expected: Vec<&str> = Self::ALL.iter().map(|opt| opt.id()).collect();
                AdCraftError::validation(format!(
                    "unknown {} '{}'; expected one of: {}",
                    Self::GROUP,
                    id,
                    expected.join(", ")
                ))
            })
    }
}

macro_rules! impl_from_str {
    ($($ty:ty),* $(,)?) => {
        $(
            impl std::str::FromStr for $ty {
                type Err = AdCraftError;

                fn from_str(s: &str) -> Result<Self> {
                    <$ty as CatalogOption>::from_id(s)
                }
            }

            impl std::fmt::Display for $ty {
                fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                    write!(f, "{}", self.id())
                }
            }
        )*
    };
}

/// Predefined background/treatment presets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StylePreset {
    /// Cut the product out onto a clean background.
    RemoveBg,
    /// Luxurious marble surface.
    Marble,
    /// Warm wooden table.
    Wood,
    /// Minimal modern concrete.
    Concrete,
    /// Fresh water splashes and ripples.
    Water,
    /// Mossy forest with morning light.
    Forest,
}

impl StylePreset {
    /// Preview thumbnail shown next to the preset.
    pub fn preview_url(&self) -> &'static str {
        match self {
            Self::RemoveBg => "https://images.unsplash.com/photo-1599420186946-7b6fb4e297f0?q=80&w=300&h=200&fit=crop",
            Self::Marble => "https://images.unsplash.com/photo-1604147706283-d7119b5b822c?q=80&w=300&h=200&fit=crop",
            Self::Wood => "https://images.unsplash.com/photo-1511467687858-23d96c32e4ae?q=80&w=300&h=200&fit=crop",
            Self::Concrete => "https://images.unsplash.com/photo-1554189097-463e2a048a14?q=80&w=300&h=200&fit=crop",
            Self::Water => "https://images.unsplash.com/photo-1530554764233-e79e16c91d08?q=80&w=300&h=200&fit=crop",
            Self::Forest => "https://images.unsplash.com/photo-1542273917363-3b1817f69a2d?q=80&w=300&h=200&fit=crop",
        }
    }

    /// Instruction fragment that opens the image prompt.
    pub fn prompt(&self) -> &'static str {
        match self {
            Self::RemoveBg => "이 이미지에서 제품만 남기고 배경을 완벽하게 제거해주세요. 최종 결과물은 투명 배경 또는 순백색의 깨끗한 배경이어야 합니다.",
            Self::Marble => "제품을 고급스러운 흰색 또는 회색 대리석 배경 위에 자연스럽게 놓아주세요. 은은한 그림자와 사실적인 조명을 추가하여 제품을 돋보이게 만들어주세요.",
            Self::Wood => "제품을 따뜻하고 자연스러운 느낌의 나무 판이나 테이블 위에 배치해주세요. 햇살이 비치는 듯한 부드러운 조명 효과를 더해 아늑한 분위기를 연출해주세요.",
            Self::Concrete => "제품을 미니멀하고 모던한 콘크리트 질감의 배경에 배치해주세요. 강한 그림자를 활용하여 극적인 효과를 주거나, 부드러운 조명으로 세련된 느낌을 강조해주세요.",
            Self::Water => "제품 주변에 맑고 청량한 물결 효과나 물방울을 추가해주세요. 제품이 물 위에 떠 있거나, 물이 튀는 역동적인 순간을 연출하여 시원한 느낌을 주세요.",
            Self::Forest => "제품을 이끼와 나무가 있는 싱그러운 숲속 배경에 자연스럽게 합성해주세요. 아침 햇살이 나뭇잎 사이로 비치는 듯한 신비로운 조명 효과를 추가해주세요.",
        }
    }
}

impl CatalogOption for StylePreset {
    const GROUP: &'static str = "style";
    const ALL: &'static [Self] = &[
        Self::RemoveBg,
        Self::Marble,
        Self::Wood,
        Self::Concrete,
        Self::Water,
        Self::Forest,
    ];

    fn id(&self) -> &'static str {
        match self {
            Self::RemoveBg => "remove-bg",
            Self::Marble => "marble",
            Self::Wood => "wood",
            Self::Concrete => "concrete",
            Self::Water => "water",
            Self::Forest => "forest",
        }
    }

    fn label(&self) -> &'static str {
        match self {
            Self::RemoveBg => "배경 제거 (누끼)",
            Self::Marble => "고급 대리석",
            Self::Wood => "따뜻한 나무 질감",
            Self::Concrete => "모던 콘크리트",
            Self::Water => "청량한 물결",
            Self::Forest => "싱그러운 숲속",
        }
    }
}

/// Target aspect ratio of the creative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum AspectRatio {
    /// No aspect-ratio instruction.
    #[default]
    #[serde(rename = "none")]
    None,
    /// 4:5 feed portrait.
    #[serde(rename = "4:5")]
    Portrait,
    /// 9:16 story.
    #[serde(rename = "9:16")]
    Story,
    /// 1:1 square.
    #[serde(rename = "1:1")]
    Square,
    /// 16:9 landscape.
    #[serde(rename = "16:9")]
    Landscape,
}

impl AspectRatio {
    /// Layout class used to size the preview frame.
    pub fn layout_class(&self) -> &'static str {
        match self {
            Self::None => "",
            Self::Portrait => "aspect-[4/5]",
            Self::Story => "aspect-[9/16]",
            Self::Square => "aspect-square",
            Self::Landscape => "aspect-video",
        }
    }
}

impl CatalogOption for AspectRatio {
    const GROUP: &'static str = "aspect ratio";
    const ALL: &'static [Self] = &[
        Self::None,
        Self::Portrait,
        Self::Story,
        Self::Square,
        Self::Landscape,
    ];

    fn id(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Portrait => "4:5",
            Self::Story => "9:16",
            Self::Square => "1:1",
            Self::Landscape => "16:9",
        }
    }

    fn label(&self) -> &'static str {
        match self {
            Self::None => "선택 없음",
            other => other.id(),
        }
    }
}

/// Camera angle the product should appear to be shot from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProductDirection {
    /// Straight on.
    #[default]
    Front,
    /// Slightly from above.
    SlightlyAbove,
    /// From below looking up.
    LowAngle,
    /// 45 degree angle.
    #[serde(rename = "angle-45")]
    Angle45,
}

impl CatalogOption for ProductDirection {
    const GROUP: &'static str = "product direction";
    const ALL: &'static [Self] = &[
        Self::Front,
        Self::SlightlyAbove,
        Self::LowAngle,
        Self::Angle45,
    ];

    fn id(&self) -> &'static str {
        match self {
            Self::Front => "front",
            Self::SlightlyAbove => "slightly-above",
            Self::LowAngle => "low-angle",
            Self::Angle45 => "angle-45",
        }
    }

    fn label(&self) -> &'static str {
        match self {
            Self::Front => "정면 (정면에서 촬영)",
            Self::SlightlyAbove => "살짝 위에서",
            Self::LowAngle => "아래에서 위로",
            Self::Angle45 => "45도 각도",
        }
    }
}

/// Where the key light comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LightingDirection {
    /// Upper left.
    #[default]
    TopLeft,
    /// Upper right.
    TopRight,
    /// Front.
    Front,
    /// Backlight.
    Back,
}

impl CatalogOption for LightingDirection {
    const GROUP: &'static str = "lighting direction";
    const ALL: &'static [Self] = &[Self::TopLeft, Self::TopRight, Self::Front, Self::Back];

    fn id(&self) -> &'static str {
        match self {
            Self::TopLeft => "top-left",
            Self::TopRight => "top-right",
            Self::Front => "front",
            Self::Back => "back",
        }
    }

    fn label(&self) -> &'static str {
        match self {
            Self::TopLeft => "왼쪽 위",
            Self::TopRight => "오른쪽 위",
            Self::Front => "정면",
            Self::Back => "뒤에서 (백라이트)",
        }
    }
}

/// Overall light quality.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LightingBrightness {
    /// Bright studio lighting.
    #[default]
    Studio,
    /// Soft natural light.
    Natural,
    /// Dark, dramatic lighting.
    Dramatic,
    /// Neon signage.
    Neon,
}

impl CatalogOption for LightingBrightness {
    const GROUP: &'static str = "lighting brightness";
    const ALL: &'static [Self] = &[Self::Studio, Self::Natural, Self::Dramatic, Self::Neon];

    fn id(&self) -> &'static str {
        match self {
            Self::Studio => "studio",
            Self::Natural => "natural",
            Self::Dramatic => "dramatic",
            Self::Neon => "neon",
        }
    }

    fn label(&self) -> &'static str {
        match self {
            Self::Studio => "밝은 스튜디오 조명",
            Self::Natural => "부드러운 자연광",
            Self::Dramatic => "어둡고 극적인 조명",
            Self::Neon => "네온사인 조명",
        }
    }
}

/// How multiple products are laid out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProductArrangement {
    /// Loose, natural placement.
    #[default]
    Natural,
    /// In a row.
    Row,
    /// Triangle.
    Triangle,
    /// Square.
    Square,
    /// Circle.
    Circle,
}

impl CatalogOption for ProductArrangement {
    const GROUP: &'static str = "product arrangement";
    const ALL: &'static [Self] = &[
        Self::Natural,
        Self::Row,
        Self::Triangle,
        Self::Square,
        Self::Circle,
    ];

    fn id(&self) -> &'static str {
        match self {
            Self::Natural => "natural",
            Self::Row => "row",
            Self::Triangle => "triangle",
            Self::Square => "square",
            Self::Circle => "circle",
        }
    }

    fn label(&self) -> &'static str {
        match self {
            Self::Natural => "자연스럽게",
            Self::Row => "일렬로",
            Self::Triangle => "삼각형으로",
            Self::Square => "사각형으로",
            Self::Circle => "원형으로",
        }
    }
}

/// Framing of the product within the image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FrameSetting {
    /// No framing instruction.
    #[default]
    Default,
    /// Close-up filling the frame.
    Filled,
    /// Product on the left with margin.
    Left,
    /// Product on the right with margin.
    Right,
}

impl CatalogOption for FrameSetting {
    const GROUP: &'static str = "frame setting";
    const ALL: &'static [Self] = &[Self::Default, Self::Filled, Self::Left, Self::Right];

    fn id(&self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Filled => "filled",
            Self::Left => "left",
            Self::Right => "right",
        }
    }

    fn label(&self) -> &'static str {
        match self {
            Self::Default => "기본",
            Self::Filled => "꽉 찬 화면",
            Self::Left => "왼쪽 정렬",
            Self::Right => "오른쪽 정렬",
        }
    }
}

/// Requested output resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum OutputSize {
    /// No resolution instruction.
    #[default]
    #[serde(rename = "none")]
    None,
    /// 1000 x 1000 pixels.
    #[serde(rename = "1000x1000")]
    Px1000,
    /// 850 x 850 pixels.
    #[serde(rename = "850x850")]
    Px850,
    /// 500 x 500 pixels.
    #[serde(rename = "500x500")]
    Px500,
}

impl CatalogOption for OutputSize {
    const GROUP: &'static str = "output size";
    const ALL: &'static [Self] = &[Self::None, Self::Px1000, Self::Px850, Self::Px500];

    fn id(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Px1000 => "1000x1000",
            Self::Px850 => "850x850",
            Self::Px500 => "500x500",
        }
    }

    fn label(&self) -> &'static str {
        match self {
            Self::None => "선택 없음",
            Self::Px1000 => "1000 x 1000",
            Self::Px850 => "850 x 850",
            Self::Px500 => "500 x 500",
        }
    }
}

/// Requested output file format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum OutputFormat {
    /// No format instruction.
    #[default]
    #[serde(rename = "none")]
    None,
    /// JPEG.
    #[serde(rename = "JPG")]
    Jpg,
    /// PNG.
    #[serde(rename = "PNG")]
    Png,
}

impl CatalogOption for OutputFormat {
    const GROUP: &'static str = "output format";
    const ALL: &'static [Self] = &[Self::None, Self::Jpg, Self::Png];

    fn id(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Jpg => "JPG",
            Self::Png => "PNG",
        }
    }

    fn label(&self) -> &'static str {
        match self {
            Self::None => "선택 없음",
            other => other.id(),
        }
    }
}

impl_from_str!(
    StylePreset,
    AspectRatio,
    ProductDirection,
    LightingDirection,
    LightingBrightness,
    ProductArrangement,
    FrameSetting,
    OutputSize,
    OutputFormat,
);
