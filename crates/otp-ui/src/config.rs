use otp_core::{Color, OtpError, TextStyle};
use otp_text::ShapedMeasure;
use serde::{Deserialize, Serialize};

pub const DEFAULT_OTP_COUNT: usize = 6;
pub const OTP_FONT_SP: f32 = 26.0;
pub const OTP_HEIGHT_DP: f32 = 56.0;
pub const SLOT_RADIUS_DP: f32 = 6.0;

/// Which slots use the active color while the code is incomplete.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SlotHighlight {
    /// Slots holding a digit.
    #[default]
    Filled,
    /// Slots holding a digit plus the slot the next digit lands in.
    FilledAndNext,
}

/// Field configuration. Every key is optional when deserializing; missing
/// keys take the defaults below.
///
/// Colors are written `#RRGGBB` or `#AARRGGBB` (alpha first).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OtpConfig {
    /// Number of slots, and the maximum number of digits.
    pub otp_count: usize,
    pub active_color: Color,
    pub inactive_color: Color,
    pub success_color: Color,
    pub text_color: Color,
    pub font_size_sp: f32,
    /// `None` uses the generic monospace family. Always measured bold.
    pub font_family: Option<String>,
    pub height_dp: f32,
    pub corner_radius_dp: f32,
    pub highlight: SlotHighlight,
}

impl Default for OtpConfig {
    fn default() -> Self {
        Self {
            otp_count: DEFAULT_OTP_COUNT,
            active_color: Color::WHITE,
            inactive_color: Color::WHITE.with_alpha(0x66),
            success_color: Color::from_rgb(0x1A, 0xE8, 0xB8),
            text_color: Color::WHITE,
            font_size_sp: OTP_FONT_SP,
            font_family: None,
            height_dp: OTP_HEIGHT_DP,
            corner_radius_dp: SLOT_RADIUS_DP,
            highlight: SlotHighlight::Filled,
        }
    }
}

impl OtpConfig {
    pub fn with_count(otp_count: usize) -> Self {
        Self {
            otp_count,
            ..Self::default()
        }
    }

    /// Shaped measurement for the configured family, bold.
    pub fn glyph_measure(&self) -> ShapedMeasure {
        match &self.font_family {
            Some(family) => ShapedMeasure::with_family(family.clone(), true),
            None => ShapedMeasure::monospace_bold(),
        }
    }

    /// Style digits are drawn with; same family and weight as
    /// [`OtpConfig::glyph_measure`].
    pub fn text_style(&self, font_px: f32) -> TextStyle {
        TextStyle {
            size: font_px,
            family: self.font_family.clone(),
            bold: true,
        }
    }

    pub fn from_json(json: &str) -> Result<Self, OtpError> {
        serde_json::from_str(json).map_err(|e| OtpError::Config(e.to_string()))
    }

    pub fn to_json(&self) -> Result<String, OtpError> {
        serde_json::to_string_pretty(self).map_err(|e| OtpError::Config(e.to_string()))
    }
}
