use std::sync::Arc;

use crate::foundation::color::Rgba;
use crate::foundation::core::{BezPath, Point, Rect, SurfaceSize};
use crate::text::raster::TextRaster;

/// Backend-agnostic description of one frame, in CSS pixels.
///
/// Layers are composited bottom to top onto the cleared surface. Each layer is drawn in
/// isolation, clipped, then blended as a whole.
#[derive(Clone, Debug)]
pub struct FramePlan {
    pub size: SurfaceSize,
    pub clear: Option<Rgba>,
    pub layers: Vec<Layer>,
}

impl FramePlan {
    pub fn new(size: SurfaceSize) -> Self {
        Self {
            size,
            clear: None,
            layers: Vec::new(),
        }
    }

    pub fn push(&mut self, layer: Layer) {
        if !layer.ops.is_empty() {
            self.layers.push(layer);
        }
    }

    pub fn op_count(&self) -> usize {
        self.layers.iter().map(|l| l.ops.len()).sum()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LayerBlend {
    /// Source-over.
    Over,
    /// Additive, the canvas `lighter` operator.
    Lighter,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Clip {
    Circle { center: Point, radius: f64 },
    Rect(Rect),
}

#[derive(Clone, Debug)]
pub struct Layer {
    pub blend: LayerBlend,
    pub clip: Option<Clip>,
    pub ops: Vec<DrawOp>,
}

impl Layer {
    pub fn over() -> Self {
        Self {
            blend: LayerBlend::Over,
            clip: None,
            ops: Vec::new(),
        }
    }

    pub fn lighter() -> Self {
        Self {
            blend: LayerBlend::Lighter,
            ..Self::over()
        }
    }

    pub fn clipped(mut self, clip: Clip) -> Self {
        self.clip = Some(clip);
        self
    }

    pub fn push(&mut self, op: DrawOp) {
        self.ops.push(op);
    }

    /// Solid disc; skipped when invisible.
    pub fn circle(&mut self, center: Point, radius: f64, color: Rgba) {
        if radius > 0.0 && color.a > 0.0 {
            self.ops.push(DrawOp::FillCircle {
                center,
                radius,
                paint: Paint::Solid(color),
            });
        }
    }

    /// Disc filled with a radial gradient centred on `center`.
    pub fn glow(&mut self, center: Point, radius: f64, gradient: RadialGradient) {
        if radius > 0.0 {
            self.ops.push(DrawOp::FillCircle {
                center,
                radius,
                paint: Paint::Radial(gradient),
            });
        }
    }

    pub fn stroke(&mut self, path: BezPath, width: f64, color: Rgba) {
        if !path.elements().is_empty() && width > 0.0 && color.a > 0.0 {
            self.ops.push(DrawOp::StrokePath { path, width, color });
        }
    }
}

#[derive(Clone, Debug)]
pub enum DrawOp {
    FillCircle {
        center: Point,
        radius: f64,
        paint: Paint,
    },
    StrokePath {
        path: BezPath,
        width: f64,
        color: Rgba,
    },
    /// A pre-rendered image placed with its top-left corner at `origin`.
    Raster {
        image: Arc<TextRaster>,
        origin: Point,
        opacity: f64,
    },
}

#[derive(Clone, Debug, PartialEq)]
pub enum Paint {
    Solid(Rgba),
    Radial(RadialGradient),
}

/// Concentric radial gradient: `stops[0]` inside `r0`, the last stop beyond `r1`.
#[derive(Clone, Debug, PartialEq)]
pub struct RadialGradient {
    pub r0: f64,
    pub r1: f64,
    pub stops: Vec<(f64, Rgba)>,
}

impl RadialGradient {
    pub fn new(r0: f64, r1: f64, stops: Vec<(f64, Rgba)>) -> Self {
        Self { r0, r1, stops }
    }

    /// Two-stop gradient from the centre (`r0 = 0`) to `r1`.
    pub fn fade(r1: f64, inner: Rgba, outer: Rgba) -> Self {
        Self::new(0.0, r1, vec![(0.0, inner), (1.0, outer)])
    }

    /// Color at distance `d` from the centre.
    pub fn color_at(&self, d: f64) -> Rgba {
        let span = self.r1 - self.r0;
        let t = if span > 0.0 {
            (d - self.r0) / span
        } else if d < self.r0 {
            0.0
        } else {
            1.0
        };
        sample_stops(&self.stops, t)
    }
}

/// Evaluate sorted `(offset, color)` stops at `t`, clamped to the first and last stop.
pub fn sample_stops(stops: &[(f64, Rgba)], t: f64) -> Rgba {
    let Some(&(_, first)) = stops.first() else {
        return Rgba::TRANSPARENT;
    };
    let t = t.clamp(0.0, 1.0);
    let mut prev = (0.0, first);
    for &(offset, color) in stops {
        if t <= offset {
            let width = offset - prev.0;
            if width <= 0.0 {
                return color;
            }
            return prev.1.mix(color, (t - prev.0) / width);
        }
        prev = (offset, color);
    }
    prev.1
}

#[cfg(test)]
#[path = "../../tests/unit/render/plan.rs"]
mod tests;
