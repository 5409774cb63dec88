use kurbo::{Circle, ParamCurve, QuadBez, Shape};

use crate::foundation::color::Rgba;
use crate::foundation::core::{BezPath, Point, SurfaceSize, Vec2};
use crate::geo::geometry::Dot;
use crate::geo::land::{LandCollection, Position};
use crate::geo::projection::Orthographic;
use crate::render::plan::{Clip, Layer, RadialGradient, sample_stops};
use crate::widgets::globe::effects::{Burst, HUB_SPEED, HUBS, ROUTE_ORIGIN, Route, Star};

const BURST_SEGMENTS: usize = 48;
const ARC_SEGMENTS: usize = 24;
const TRAIL_STEPS: u32 = 12;

/// Per-frame drawing inputs shared by every pass.
#[derive(Clone, Copy, Debug)]
pub struct Frame {
    pub size: SurfaceSize,
    pub projection: Orthographic,
    /// Ratio of the current projection scale to the base radius.
    pub k: f64,
    /// Seconds on the widget clock.
    pub t: f64,
}

impl Frame {
    fn disc(&self) -> Clip {
        Clip::Circle {
            center: self.projection.translate,
            radius: self.projection.scale,
        }
    }
}

pub fn stars(frame: &Frame, stars: &[Star]) -> Layer {
    let mut layer = Layer::lighter();
    for s in stars {
        let a = s.alpha * s.twinkle(frame.t);
        let r = s.radius * 3.0;
        layer.glow(
            s.pos,
            r,
            RadialGradient::fade(
                r,
                Rgba::rgba(1.0, 1.0, 1.0, 0.8 * a),
                Rgba::rgba(1.0, 1.0, 1.0, 0.0),
            ),
        );
    }
    layer
}

pub fn ocean(frame: &Frame) -> Layer {
    let scale = frame.projection.scale;
    let mut layer = Layer::over().clipped(frame.disc());
    layer.glow(
        frame.projection.translate,
        scale,
        RadialGradient::new(
            scale * 0.05,
            scale,
            vec![
                (0.0, Rgba::rgba8(0x08, 0x12, 0x1a, 1.0)),
                (0.5, Rgba::rgba8(0x06, 0x10, 0x17, 1.0)),
                (1.0, Rgba::rgba8(0x03, 0x07, 0x0b, 1.0)),
            ],
        ),
    );
    layer
}

/// Graticule and coastline strokes.
pub fn outlines(frame: &Frame, graticule: &[Vec<Position>], land: &LandCollection) -> Layer {
    let proj = &frame.projection;
    let mut layer = Layer::over().clipped(frame.disc());
    layer.stroke(
        proj.path_for_lines(graticule.iter().map(Vec::as_slice)),
        0.6 * frame.k,
        Rgba::rgba8(120, 200, 190, 0.12),
    );
    layer.stroke(
        proj.path_for_lines(land.features.iter().flat_map(|f| f.rings())),
        0.8 * frame.k,
        Rgba::rgba8(180, 236, 220, 0.35),
    );
    layer
}

pub fn city_lights(frame: &Frame, dots: &[Dot]) -> Layer {
    let bounds = frame.size.css_rect();
    let mut layer = Layer::over().clipped(frame.disc());
    for dot in dots {
        let Some(p) = frame.projection.project([dot.lng, dot.lat]) else {
            continue;
        };
        if p.x < bounds.x0 || p.x > bounds.x1 || p.y < bounds.y0 || p.y > bounds.y1 {
            continue;
        }
        let wave = 0.5 + 0.5 * (frame.t * 0.6 + dot.phase).sin();
        let hue = (dot.lng + 180.0) / 360.0 * 240.0;
        layer.circle(
            p,
            (0.55 + wave * 0.45) * frame.k,
            Rgba::hsla(hue, 0.7, 0.65, 0.08 + wave * 0.2),
        );
    }
    layer
}

/// Expanding rings of colored points with a fading inner flash.
pub fn bursts(frame: &Frame, bursts: &[Burst]) -> Layer {
    let k = frame.k;
    let mut layer = Layer::lighter().clipped(frame.disc());
    for b in bursts {
        let Some(center) = frame.projection.project(b.origin) else {
            continue;
        };
        let p = b.progress(frame.t);
        let ring = (p * b.speed + 4.0) * k;
        let alpha = 0.75 * (1.0 - p);
        let size = (1.6 + (1.0 - p) * 1.2) * k;
        for s in 0..BURST_SEGMENTS {
            let a = s as f64 / BURST_SEGMENTS as f64 * std::f64::consts::TAU;
            let hue = (b.hue + s as f64 * 5.0) % 360.0;
            layer.circle(
                center + Vec2::from_angle(a) * ring,
                size,
                Rgba::hsla(hue, 0.85, (65.0 - p * 25.0) / 100.0, alpha),
            );
        }
        let flash = (6.0 - p * 5.0) * k;
        if flash > 0.5 {
            layer.glow(
                center,
                flash,
                RadialGradient::fade(
                    flash,
                    Rgba::hsla(b.hue, 0.9, 0.7, 0.7),
                    Rgba::hsla(0.0, 0.0, 1.0, 0.0),
                ),
            );
        }
    }
    layer
}

/// A projected route with both endpoints on the visible hemisphere.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Connection {
    pub from: Point,
    pub to: Point,
    pub speed: f64,
}

/// Static hubs first, then dynamic routes; routes with a hidden endpoint are skipped.
pub fn connections(proj: &Orthographic, routes: &[Route]) -> Vec<Connection> {
    let Some(from) = proj.project(ROUTE_ORIGIN) else {
        return Vec::new();
    };
    HUBS.iter()
        .map(|&to| (to, HUB_SPEED))
        .chain(routes.iter().map(|r| (r.to, r.speed)))
        .filter_map(|(to, speed)| {
            proj.project(to).map(|to| Connection { from, to, speed })
        })
        .collect()
}

fn hue_for_x(x: f64, width: f64) -> f64 {
    if width <= 0.0 {
        return 0.0;
    }
    (x / width * 240.0).rem_euclid(240.0)
}

/// Route overlays: endpoint anchors, gradient arcs, then rockets with their trails.
pub fn routes(frame: &Frame, radius: f64, connections: &[Connection]) -> [Layer; 3] {
    let k = frame.k;
    let width = frame.size.css_width;
    let mut anchors = Layer::lighter().clipped(frame.disc());
    let mut arcs = Layer::over().clipped(frame.disc());
    let mut trails = Layer::lighter().clipped(frame.disc());

    let r = 3.5 * k;
    for c in connections {
        for p in [c.from, c.to] {
            anchors.glow(
                p,
                r * 1.6,
                RadialGradient::fade(
                    r * 2.0,
                    Rgba::hsla(190.0, 0.95, 0.7, 0.9),
                    Rgba::hsla(190.0, 0.95, 0.7, 0.0),
                ),
            );
            anchors.circle(p, 1.2 * k, Rgba::WHITE);
        }
    }

    for c in connections {
        let mid = c.from.midpoint(c.to) - Vec2::new(0.0, radius * 0.35);
        let curve = QuadBez::new(c.from, mid, c.to);
        let hue_from = hue_for_x(c.from.x, width);
        let hue_to = hue_for_x(c.to.x, width);
        let stops = [
            (0.0, Rgba::hsla(hue_from, 0.8, 0.65, 0.0)),
            (0.5, Rgba::hsla((hue_from + hue_to) / 2.0, 0.85, 0.65, 0.35)),
            (1.0, Rgba::hsla(hue_to, 0.9, 0.7, 0.5)),
        ];
        arc_strokes(&mut arcs, curve, &stops, 1.2 * k);

        let t = (frame.t * c.speed).rem_euclid(1.0);
        for i in (1..=TRAIL_STEPS).rev() {
            let ti = (t - f64::from(i) * 0.02).max(0.0);
            let fade = f64::from(i) / f64::from(TRAIL_STEPS);
            trails.circle(
                curve.eval(ti),
                (2.2 + (1.0 - fade) * 2.2) * k,
                Rgba::hsla(hue_to, 0.9, 0.7, 0.16 * fade),
            );
        }
        trails.circle(curve.eval(t), 2.6 * k, Rgba::hsla(hue_to, 0.95, 0.75, 0.95));
    }

    [anchors, arcs, trails]
}

/// Stroke `curve` in pieces, each colored by where its midpoint falls along the chord.
fn arc_strokes(layer: &mut Layer, curve: QuadBez, stops: &[(f64, Rgba)], width: f64) {
    let chord = curve.p2 - curve.p0;
    let len2 = chord.hypot2();
    for i in 0..ARC_SEGMENTS {
        let t0 = i as f64 / ARC_SEGMENTS as f64;
        let t1 = (i + 1) as f64 / ARC_SEGMENTS as f64;
        let piece = curve.subsegment(t0..t1);
        let along = if len2 > 0.0 {
            (curve.eval((t0 + t1) / 2.0) - curve.p0).dot(chord) / len2
        } else {
            0.0
        };
        let mut path = BezPath::new();
        path.move_to(piece.p0);
        path.quad_to(piece.p1, piece.p2);
        layer.stroke(path, width, sample_stops(stops, along));
    }
}

pub fn rim(frame: &Frame) -> Layer {
    let path = Circle::new(frame.projection.translate, frame.projection.scale).to_path(0.1);
    let mut layer = Layer::over();
    layer.stroke(path, 0.9 * frame.k, Rgba::rgba8(160, 210, 220, 0.18));
    layer
}

#[cfg(test)]
#[path = "../../../tests/unit/widgets/globe_draw.rs"]
mod tests;
