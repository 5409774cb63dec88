use crate::foundation::core::{BezPath, Point};
use crate::geo::land::Position;

/// Maximum angular length of a resampled path segment, in degrees.
const RESAMPLE_DEG: f64 = 2.5;

/// Orthographic projection of the sphere onto a disc of radius `scale` centred at `translate`.
///
/// `rotate` is `[λ, φ]` in degrees with the same sense as d3's `projection.rotate`; the far
/// hemisphere is clipped.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Orthographic {
    pub rotate: [f64; 2],
    pub scale: f64,
    pub translate: Point,
}

impl Orthographic {
    pub fn new(scale: f64, translate: Point) -> Self {
        Self {
            rotate: [0.0, 0.0],
            scale,
            translate,
        }
    }

    pub fn with_rotation(mut self, rotate: [f64; 2]) -> Self {
        self.rotate = rotate;
        self
    }

    /// Rotated spherical coordinates `(λ, φ)` in radians.
    fn rotated(&self, [lng, lat]: Position) -> (f64, f64) {
        let lambda = (lng + self.rotate[0]).to_radians();
        let phi = lat.to_radians();
        let (sin_dphi, cos_dphi) = self.rotate[1].to_radians().sin_cos();

        let cos_phi = phi.cos();
        let x = lambda.cos() * cos_phi;
        let y = lambda.sin() * cos_phi;
        let z = phi.sin();
        let k = z * cos_dphi + x * sin_dphi;
        (
            y.atan2(x * cos_dphi - z * sin_dphi),
            k.clamp(-1.0, 1.0).asin(),
        )
    }

    /// Screen position of a visible point; `None` on the far hemisphere.
    pub fn project(&self, position: Position) -> Option<Point> {
        if !position[0].is_finite() || !position[1].is_finite() {
            return None;
        }
        let (l, p) = self.rotated(position);
        if l.cos() * p.cos() <= 0.0 {
            return None;
        }
        Some(Point::new(
            self.translate.x + self.scale * p.cos() * l.sin(),
            self.translate.y - self.scale * p.sin(),
        ))
    }

    /// Append a polyline to `path`, following great circles and lifting the pen across the
    /// horizon.
    pub fn append_line(&self, path: &mut BezPath, line: &[Position]) {
        let mut pen_down = false;
        let mut emit = |path: &mut BezPath, pos: Position| match self.project(pos) {
            Some(pt) if pen_down => path.line_to(pt),
            Some(pt) => {
                path.move_to(pt);
                pen_down = true;
            }
            None => pen_down = false,
        };

        let Some(&first) = line.first() else {
            return;
        };
        emit(path, first);
        for pair in line.windows(2) {
            let (a, b) = (pair[0], pair[1]);
            let va = unit_vector(a);
            let vb = unit_vector(b);
            let angle = angle_between(va, vb);
            let n = (angle.to_degrees() / RESAMPLE_DEG).ceil().max(1.0) as usize;
            for i in 1..=n {
                let t = i as f64 / n as f64;
                emit(path, slerp(va, vb, angle, t).unwrap_or(b));
            }
        }
    }

    /// Several polylines (rings, graticule lines) as one path.
    pub fn path_for_lines<'a, I>(&self, lines: I) -> BezPath
    where
        I: IntoIterator<Item = &'a [Position]>,
    {
        let mut path = BezPath::new();
        for line in lines {
            self.append_line(&mut path, line);
        }
        path
    }
}

/// Meridians every 10° (to ±80°, full extent at multiples of 90°) and parallels every 10°
/// between ±80°.
pub fn graticule() -> Vec<Vec<Position>> {
    let mut lines = Vec::new();
    for i in 0..36 {
        let lng = -180.0 + f64::from(i) * 10.0;
        let extent = if i % 9 == 0 { 90.0 } else { 80.0 };
        lines.push(
            stepped(-extent, extent)
                .into_iter()
                .map(|lat| [lng, lat])
                .collect(),
        );
    }
    for i in 0..=16 {
        let lat = -80.0 + f64::from(i) * 10.0;
        lines.push(stepped(-180.0, 180.0).into_iter().map(|lng| [lng, lat]).collect());
    }
    lines
}

fn stepped(from: f64, to: f64) -> Vec<f64> {
    let n = ((to - from) / RESAMPLE_DEG).ceil() as usize;
    (0..=n)
        .map(|i| (from + i as f64 * RESAMPLE_DEG).min(to))
        .collect()
}

fn unit_vector([lng, lat]: Position) -> [f64; 3] {
    let (l, p) = (lng.to_radians(), lat.to_radians());
    [l.cos() * p.cos(), l.sin() * p.cos(), p.sin()]
}

fn angle_between(a: [f64; 3], b: [f64; 3]) -> f64 {
    let dot = a[0] * b[0] + a[1] * b[1] + a[2] * b[2];
    dot.clamp(-1.0, 1.0).acos()
}

fn slerp(a: [f64; 3], b: [f64; 3], angle: f64, t: f64) -> Option<Position> {
    let s = angle.sin();
    if s.abs() < 1e-9 {
        return None;
    }
    let wa = ((1.0 - t) * angle).sin() / s;
    let wb = (t * angle).sin() / s;
    let v = [
        wa * a[0] + wb * b[0],
        wa * a[1] + wb * b[1],
        wa * a[2] + wb * b[2],
    ];
    Some([
        v[1].atan2(v[0]).to_degrees(),
        v[2].clamp(-1.0, 1.0).asin().to_degrees(),
    ])
}

#[cfg(test)]
#[path = "../../tests/unit/geo/projection.rs"]
mod tests;
