use std::path::Path;
use std::sync::Arc;

use crate::foundation::error::{FxError, FxResult};
use crate::text::style::TextStyle;

/// A line of text rendered to premultiplied RGBA8 and cropped to its ink bounds.
///
/// `scale` is the device pixel ratio the raster was produced at; `width`/`height` are device
/// pixels. An empty raster (`width == 0`) means nothing was drawn.
#[derive(Clone, Debug, PartialEq)]
pub struct TextRaster {
    pub width: u32,
    pub height: u32,
    pub scale: f64,
    pub data: Vec<u8>,
}

impl TextRaster {
    pub fn empty(scale: f64) -> Self {
        Self {
            width: 0,
            height: 0,
            scale,
            data: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    pub fn css_width(&self) -> f64 {
        f64::from(self.width) / self.scale
    }

    pub fn css_height(&self) -> f64 {
        f64::from(self.height) / self.scale
    }

    pub fn alpha_at(&self, x: u32, y: u32) -> u8 {
        if x >= self.width || y >= self.height {
            return 0;
        }
        self.data[(y as usize * self.width as usize + x as usize) * 4 + 3]
    }
}

/// Renders text lines through an SVG `<text>` document.
///
/// Holds one font database for its whole lifetime; building it (system font scan) is the
/// expensive part.
pub struct TextRasterizer {
    fontdb: Arc<usvg::fontdb::Database>,
}

impl TextRasterizer {
    /// System fonts plus any `.ttf`/`.otf`/`.ttc` files found directly in `extra_dirs`.
    pub fn new<P: AsRef<Path>>(extra_dirs: &[P]) -> Self {
        let mut db = usvg::fontdb::Database::new();
        db.load_system_fonts();
        for dir in extra_dirs {
            load_fonts_from_dir(&mut db, dir.as_ref());
        }
        tracing::debug!(faces = db.len(), "text font database ready");
        Self::with_database(Arc::new(db))
    }

    pub fn with_database(fontdb: Arc<usvg::fontdb::Database>) -> Self {
        Self { fontdb }
    }

    pub fn face_count(&self) -> usize {
        self.fontdb.len()
    }

    /// Rasterize `text` at device `scale`, cropped to the pixels that received ink.
    pub fn rasterize(&self, text: &str, style: &TextStyle, scale: f64) -> FxResult<TextRaster> {
        let scale = if scale.is_finite() && scale > 0.0 {
            scale
        } else {
            1.0
        };
        let text = style.display_text(text);
        if text.trim().is_empty() || self.fontdb.is_empty() || style.size_px <= 0.0 {
            return Ok(TextRaster::empty(scale));
        }

        let doc = svg_document(&text, style);
        let opts = usvg::Options {
            fontdb: self.fontdb.clone(),
            font_resolver: font_resolver(),
            ..Default::default()
        };
        let tree = usvg::Tree::from_str(&doc, &opts)
            .map_err(|e| FxError::render(format!("text svg: {e}")))?;

        let size = tree.size();
        let w = (f64::from(size.width()) * scale).ceil() as u32;
        let h = (f64::from(size.height()) * scale).ceil() as u32;
        let mut pixmap = resvg::tiny_skia::Pixmap::new(w.max(1), h.max(1))
            .ok_or_else(|| FxError::render("text raster size is invalid"))?;
        let xform = resvg::tiny_skia::Transform::from_scale(scale as f32, scale as f32);
        resvg::render(&tree, xform, &mut pixmap.as_mut());

        Ok(crop_to_ink(pixmap.data(), pixmap.width(), pixmap.height(), scale))
    }
}

fn svg_document(text: &str, style: &TextStyle) -> String {
    let size = style.size_px;
    let chars = text.chars().count() as f64;
    let spacing = style.letter_spacing_em * size;
    // Generous canvas; the result is cropped anyway.
    let width = (chars * (size * 1.2 + spacing.max(0.0)) + size * 2.0).ceil();
    let height = (size * style.line_height.max(1.0) * 1.6).ceil();
    let baseline = size * 1.1;
    let [r, g, b, _] = style.color.to_rgba8_straight();

    format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{width}" height="{height}"><text x="{pad}" y="{baseline}" font-family="{family}" font-size="{size}" font-weight="{weight}" letter-spacing="{spacing}" fill="rgb({r},{g},{b})" fill-opacity="{alpha}">{body}</text></svg>"#,
        pad = size * 0.5,
        family = escape_xml(&style.family),
        weight = style.weight,
        alpha = style.color.a,
        body = escape_xml(text),
    )
}

pub(crate) fn escape_xml(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

pub(crate) fn crop_to_ink(data: &[u8], width: u32, height: u32, scale: f64) -> TextRaster {
    let (mut x0, mut y0, mut x1, mut y1) = (u32::MAX, u32::MAX, 0u32, 0u32);
    for y in 0..height {
        for x in 0..width {
            let a = data[(y as usize * width as usize + x as usize) * 4 + 3];
            if a != 0 {
                x0 = x0.min(x);
                y0 = y0.min(y);
                x1 = x1.max(x);
                y1 = y1.max(y);
            }
        }
    }
    if x0 == u32::MAX {
        return TextRaster::empty(scale);
    }

    let (cw, ch) = (x1 - x0 + 1, y1 - y0 + 1);
    let mut out = Vec::with_capacity(cw as usize * ch as usize * 4);
    for y in y0..=y1 {
        let row = (y as usize * width as usize + x0 as usize) * 4;
        out.extend_from_slice(&data[row..row + cw as usize * 4]);
    }
    TextRaster {
        width: cw,
        height: ch,
        scale,
        data: out,
    }
}

fn load_fonts_from_dir(db: &mut usvg::fontdb::Database, dir: &Path) {
    let Ok(rd) = std::fs::read_dir(dir) else {
        tracing::warn!(dir = %dir.display(), "font directory is not readable");
        return;
    };
    for entry in rd.flatten() {
        let path = entry.path();
        let is_font = path
            .extension()
            .and_then(|s| s.to_str())
            .map(|e| matches!(e.to_ascii_lowercase().as_str(), "ttf" | "otf" | "ttc"))
            .unwrap_or(false);
        if is_font && db.load_font_file(&path).is_err() {
            tracing::warn!(path = %path.display(), "skipping unreadable font");
        }
    }
}

/// Resolves the requested families, then generic fallbacks, then any face at all, so a
/// missing `Inter` still yields glyphs.
fn font_resolver() -> usvg::FontResolver<'static> {
    usvg::FontResolver {
        select_font: Box::new(|font, fontdb| {
            let mut families: Vec<usvg::fontdb::Family<'_>> = font
                .families()
                .iter()
                .map(|family| match family {
                    usvg::FontFamily::Serif => usvg::fontdb::Family::Serif,
                    usvg::FontFamily::SansSerif => usvg::fontdb::Family::SansSerif,
                    usvg::FontFamily::Cursive => usvg::fontdb::Family::Cursive,
                    usvg::FontFamily::Fantasy => usvg::fontdb::Family::Fantasy,
                    usvg::FontFamily::Monospace => usvg::fontdb::Family::Monospace,
                    usvg::FontFamily::Named(s) => usvg::fontdb::Family::Name(s),
                })
                .collect();
            families.push(usvg::fontdb::Family::SansSerif);

            let query = usvg::fontdb::Query {
                families: &families,
                weight: usvg::fontdb::Weight(font.weight()),
                stretch: usvg::fontdb::Stretch::Normal,
                style: usvg::fontdb::Style::Normal,
            };
            fontdb
                .query(&query)
                .or_else(|| fontdb.faces().next().map(|f| f.id))
        }),
        select_fallback: usvg::FontResolver::default_fallback_selector(),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/text/raster.rs"]
mod tests;
