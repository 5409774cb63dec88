pub use kurbo::{Affine, BezPath, Point, Rect, Vec2};

/// Logical (CSS pixel) size of a drawing surface plus the display pixel density.
///
/// Widgets draw in CSS pixels; backends scale by `dpr` when rasterizing.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SurfaceSize {
    pub css_width: f64,
    pub css_height: f64,
    pub dpr: f64,
}

impl SurfaceSize {
    /// Acquire a surface of the given logical size.
    ///
    /// Returns `None` when the container has no drawable area, in which case the widget renders
    /// nothing instead of failing.
    pub fn acquire(css_width: f64, css_height: f64, dpr: f64) -> Option<Self> {
        let valid = |v: f64| v.is_finite() && v > 0.0;
        if !valid(css_width) || !valid(css_height) {
            return None;
        }
        let dpr = if valid(dpr) { dpr } else { 1.0 };
        let size = Self {
            css_width,
            css_height,
            dpr,
        };
        let (w, h) = size.device_px();
        if w == 0 || h == 0 {
            return None;
        }
        Some(size)
    }

    /// Surface dimensions in device pixels.
    pub fn device_px(self) -> (u32, u32) {
        let px = |v: f64| (v * self.dpr).round().max(0.0) as u32;
        (px(self.css_width), px(self.css_height))
    }

    pub fn css_rect(self) -> Rect {
        Rect::new(0.0, 0.0, self.css_width, self.css_height)
    }

    pub fn center(self) -> Point {
        Point::new(self.css_width / 2.0, self.css_height / 2.0)
    }

    /// CSS-to-device transform, the equivalent of scaling a 2D context by the pixel ratio.
    pub fn device_transform(self) -> Affine {
        Affine::scale(self.dpr)
    }
}

/// Premultiplied RGBA8 (r,g,b already multiplied by a).
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Rgba8Premul {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba8Premul {
    pub fn transparent() -> Self {
        Self {
            r: 0,
            g: 0,
            b: 0,
            a: 0,
        }
    }

    pub fn from_straight_rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        fn premul(c: u8, a: u8) -> u8 {
            let c = u16::from(c);
            let a = u16::from(a);
            (((c * a) + 127) / 255) as u8
        }

        Self {
            r: premul(r, a),
            g: premul(g, a),
            b: premul(b, a),
            a,
        }
    }

    pub fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
