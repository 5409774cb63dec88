use serde::{Deserialize, Serialize};

use crate::foundation::color::Rgba;

/// Typography for a single line of canvas text.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextStyle {
    /// CSS font-family list, e.g. `Inter, sans-serif`.
    pub family: String,
    pub size_px: f64,
    pub weight: u16,
    /// Extra advance between glyphs, in em.
    pub letter_spacing_em: f64,
    pub line_height: f64,
    pub color: Rgba,
    pub uppercase: bool,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            family: "Inter, sans-serif".to_owned(),
            size_px: 48.0,
            weight: 600,
            letter_spacing_em: 0.02,
            line_height: 1.05,
            color: Rgba::WHITE,
            uppercase: false,
        }
    }
}

impl TextStyle {
    /// Text as it will be drawn, after case transforms.
    pub fn display_text(&self, text: &str) -> String {
        if self.uppercase {
            text.to_uppercase()
        } else {
            text.to_owned()
        }
    }

    /// Height of one line box in CSS px.
    pub fn line_box_px(&self) -> f64 {
        self.size_px * self.line_height.max(0.0)
    }
}
