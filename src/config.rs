use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Deserializer, Serialize};

use crate::animation::ease::Ease;
use crate::foundation::color::Rgba;
use crate::foundation::error::{FxError, FxResult};
use crate::geo::fetch::LAND_URL_ENV;

/// Text shown when a text list is empty.
pub const PLACEHOLDER_TEXT: &str = "Orphta";

/// Natural Earth 1:110m land polygons.
pub const DEFAULT_LAND_URL: &str = "https://raw.githubusercontent.com/martynafford/natural-earth-geojson/refs/heads/master/110m/physical/ne_110m_land.json";

/// Configuration for every widget on the page, usually loaded from JSON.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageConfig {
    pub heading: HeadingConfig,
    pub vapor: VaporConfig,
    pub globe: GlobeConfig,
}

impl PageConfig {
    pub fn from_json_str(s: &str) -> FxResult<Self> {
        let cfg: Self =
            serde_json::from_str(s).map_err(|e| FxError::parse(format!("page config: {e}")))?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn load(path: &Path) -> FxResult<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("read config from '{}'", path.display()))?;
        Self::from_json_str(&text)
    }

    pub fn validate(&self) -> FxResult<()> {
        self.heading.validate()?;
        self.vapor.validate()?;
        self.globe.validate()
    }

    /// Apply environment overrides (`ORPHTA_LAND_URL`).
    pub fn apply_env(&mut self) {
        self.globe
            .apply_land_url_override(std::env::var(LAND_URL_ENV).ok());
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeadingConfig {
    pub text: String,
    /// Font size before the width-based clamp is applied.
    pub font_size: f64,
    pub font_family: String,
    pub font_weight: u16,
    pub color: Rgba,
    pub particle_size: f64,
    pub density: f64,
    /// Seconds for particles to settle onto the text.
    pub reveal_secs: f64,
    pub repel_radius: f64,
    pub seed: u64,
}

impl Default for HeadingConfig {
    fn default() -> Self {
        Self {
            text: PLACEHOLDER_TEXT.to_owned(),
            font_size: 80.0,
            font_family: "Inter, system-ui, sans-serif".to_owned(),
            font_weight: 700,
            color: Rgba::WHITE,
            particle_size: 1.0,
            density: 5.0,
            reveal_secs: 1.6,
            repel_radius: 60.0,
            seed: 0x0e7a_4d1c,
        }
    }
}

impl HeadingConfig {
    pub fn validate(&self) -> FxResult<()> {
        positive("heading.font_size", self.font_size)?;
        positive("heading.particle_size", self.particle_size)?;
        positive("heading.density", self.density)?;
        non_negative("heading.reveal_secs", self.reveal_secs)?;
        non_negative("heading.repel_radius", self.repel_radius)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Direction {
    #[default]
    LeftToRight,
    RightToLeft,
}

impl Direction {
    pub fn factor(self) -> f64 {
        match self {
            Self::LeftToRight => 1.0,
            Self::RightToLeft => -1.0,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Alignment {
    #[default]
    Left,
    Center,
    Right,
}

/// Semantic element the vapor text represents.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tag {
    H1,
    #[default]
    H2,
    H3,
    P,
}

impl Tag {
    /// Heading level, or `None` for paragraph text.
    pub fn heading_level(self) -> Option<u8> {
        match self {
            Self::H1 => Some(1),
            Self::H2 => Some(2),
            Self::H3 => Some(3),
            Self::P => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FontOptions {
    pub family: String,
    /// Accepts a number or a CSS length such as `"48px"`.
    #[serde(deserialize_with = "de_css_number")]
    pub size_px: f64,
    pub weight: u16,
    /// Accepts a number or a CSS length such as `"0.02em"`.
    #[serde(deserialize_with = "de_css_number")]
    pub letter_spacing_em: f64,
    #[serde(deserialize_with = "de_css_number")]
    pub line_height: f64,
}

impl Default for FontOptions {
    fn default() -> Self {
        Self {
            family: "Inter, sans-serif".to_owned(),
            size_px: 48.0,
            weight: 600,
            letter_spacing_em: 0.02,
            line_height: 1.05,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimationOptions {
    pub vaporize_duration: f64,
    pub fade_in_duration: f64,
    pub wait_duration: f64,
    pub fade_ease: Ease,
}

impl Default for AnimationOptions {
    fn default() -> Self {
        Self {
            vaporize_duration: 2.0,
            fade_in_duration: 1.0,
            wait_duration: 0.8,
            fade_ease: Ease::Linear,
        }
    }
}

/// Ordered list of texts to cycle through.
///
/// Deserializes from a JSON array or from a string holding a JSON array; a string that is not
/// valid JSON is kept as a single text.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct TextList(pub Vec<String>);

impl TextList {
    pub fn from_raw(raw: &str) -> Self {
        match serde_json::from_str::<Vec<String>>(raw) {
            Ok(list) => Self(list),
            Err(err) => {
                tracing::warn!(%err, "text list is not a JSON array, using it verbatim");
                Self(vec![raw.to_owned()])
            }
        }
    }

    /// The list to display; never empty.
    pub fn normalized(&self) -> Vec<String> {
        if self.0.is_empty() {
            vec![PLACEHOLDER_TEXT.to_owned()]
        } else {
            self.0.clone()
        }
    }
}

impl<'de> Deserialize<'de> for TextList {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            List(Vec<String>),
            Raw(String),
        }

        Ok(match Repr::deserialize(deserializer)? {
            Repr::List(list) => Self(list),
            Repr::Raw(raw) => Self::from_raw(&raw),
        })
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VaporConfig {
    pub texts: TextList,
    pub font: FontOptions,
    pub color: Rgba,
    pub spread: f64,
    pub density: f64,
    pub animation: AnimationOptions,
    pub direction: Direction,
    pub alignment: Alignment,
    pub tag: Tag,
    pub uppercase: bool,
    pub seed: u64,
}

impl Default for VaporConfig {
    fn default() -> Self {
        Self {
            texts: TextList::default(),
            font: FontOptions::default(),
            color: Rgba::WHITE,
            spread: 5.0,
            density: 4.0,
            animation: AnimationOptions::default(),
            direction: Direction::default(),
            alignment: Alignment::default(),
            tag: Tag::default(),
            uppercase: true,
            seed: 0x7a90_0b5e,
        }
    }
}

impl VaporConfig {
    pub fn validate(&self) -> FxResult<()> {
        positive("vapor.font.size_px", self.font.size_px)?;
        non_negative("vapor.spread", self.spread)?;
        non_negative("vapor.density", self.density)?;
        non_negative(
            "vapor.animation.vaporize_duration",
            self.animation.vaporize_duration,
        )?;
        non_negative(
            "vapor.animation.fade_in_duration",
            self.animation.fade_in_duration,
        )?;
        non_negative("vapor.animation.wait_duration", self.animation.wait_duration)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GlobeConfig {
    pub width: f64,
    pub height: f64,
    pub land_url: String,
    pub dot_spacing: f64,
    /// Auto-rotation step per animation frame, in degrees.
    pub rotation_deg_per_frame: f64,
    /// Frame rate the per-frame rotation step was tuned for.
    pub rotation_reference_hz: f64,
    pub initial_rotation: [f64; 2],
    pub max_bursts: usize,
    pub burst_cooldown_secs: f64,
    pub max_routes: usize,
    pub route_cooldown_secs: f64,
    pub max_fps: f64,
    pub drag_sensitivity: f64,
    pub resume_after_release_ms: u64,
    pub resume_after_leave_ms: u64,
    /// Unset means the request may wait indefinitely.
    pub fetch_timeout_secs: Option<f64>,
    pub seed: u64,
}

impl Default for GlobeConfig {
    fn default() -> Self {
        Self {
            width: 900.0,
            height: 900.0,
            land_url: DEFAULT_LAND_URL.to_owned(),
            dot_spacing: 16.0,
            rotation_deg_per_frame: 0.065,
            rotation_reference_hz: 60.0,
            initial_rotation: [60.0, -10.0],
            max_bursts: 6,
            burst_cooldown_secs: 0.9,
            max_routes: 8,
            route_cooldown_secs: 1.4,
            max_fps: 30.0,
            drag_sensitivity: 0.4,
            resume_after_release_ms: 800,
            resume_after_leave_ms: 500,
            fetch_timeout_secs: None,
            seed: 0x61_0be5,
        }
    }
}

impl GlobeConfig {
    pub fn validate(&self) -> FxResult<()> {
        positive("globe.width", self.width)?;
        positive("globe.height", self.height)?;
        positive("globe.dot_spacing", self.dot_spacing)?;
        positive("globe.max_fps", self.max_fps)?;
        positive("globe.rotation_reference_hz", self.rotation_reference_hz)?;
        if self.land_url.trim().is_empty() {
            return Err(FxError::validation("globe.land_url must be non-empty"));
        }
        if let Some(t) = self.fetch_timeout_secs {
            positive("globe.fetch_timeout_secs", t)?;
        }
        Ok(())
    }

    pub fn rotation_deg_per_sec(&self) -> f64 {
        self.rotation_deg_per_frame * self.rotation_reference_hz
    }

    pub fn apply_land_url_override(&mut self, url: Option<String>) {
        if let Some(url) = url.filter(|u| !u.trim().is_empty()) {
            tracing::info!(url = %url, "land url overridden from environment");
            self.land_url = url;
        }
    }
}

fn positive(name: &str, v: f64) -> FxResult<()> {
    if v.is_finite() && v > 0.0 {
        Ok(())
    } else {
        Err(FxError::validation(format!("{name} must be finite and > 0")))
    }
}

fn non_negative(name: &str, v: f64) -> FxResult<()> {
    if v.is_finite() && v >= 0.0 {
        Ok(())
    } else {
        Err(FxError::validation(format!("{name} must be finite and >= 0")))
    }
}

/// A bare number, or a string like `"48px"`, `"0.02em"` or `"1.05"`.
fn de_css_number<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Repr {
        Num(f64),
        Css(String),
    }

    match Repr::deserialize(deserializer)? {
        Repr::Num(v) => Ok(v),
        Repr::Css(s) => {
            let t = s.trim();
            let t = t
                .strip_suffix("px")
                .or_else(|| t.strip_suffix("em"))
                .unwrap_or(t);
            t.trim()
                .parse::<f64>()
                .map_err(|_| serde::de::Error::custom(format!("invalid css length \"{s}\"")))
        }
    }
}

#[cfg(test)]
#[path = "../tests/unit/config.rs"]
mod tests;
