use rayon::prelude::*;

use crate::foundation::math::Rng64;
use crate::geo::land::{LandCollection, LandFeature, LandPolygon, Position};

/// Crossing-number test of `point` against a closed ring of `[lng, lat]` vertices.
pub fn point_in_ring(point: Position, ring: &[Position]) -> bool {
    let [x, y] = point;
    let mut inside = false;
    let n = ring.len();
    if n == 0 {
        return false;
    }
    let mut j = n - 1;
    for i in 0..n {
        let [xi, yi] = ring[i];
        let [xj, yj] = ring[j];
        if (yi > y) != (yj > y) && x < (xj - xi) * (y - yi) / (yj - yi) + xi {
            inside = !inside;
        }
        j = i;
    }
    inside
}

/// Inside the outer ring and inside none of the holes.
pub fn point_in_polygon(point: Position, polygon: &LandPolygon) -> bool {
    point_in_ring(point, polygon.outer())
        && !polygon.holes().iter().any(|h| point_in_ring(point, h))
}

/// Inside any member polygon.
pub fn point_in_feature(point: Position, feature: &LandFeature) -> bool {
    feature.polygons.iter().any(|p| point_in_polygon(point, p))
}

/// Planar longitude/latitude bounding box.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GeoBounds {
    pub min: Position,
    pub max: Position,
}

impl GeoBounds {
    pub fn of(feature: &LandFeature) -> Option<Self> {
        let mut it = feature.rings().flatten();
        let first = *it.next()?;
        let mut b = Self {
            min: first,
            max: first,
        };
        for &[lng, lat] in it {
            b.min[0] = b.min[0].min(lng);
            b.min[1] = b.min[1].min(lat);
            b.max[0] = b.max[0].max(lng);
            b.max[1] = b.max[1].max(lat);
        }
        Some(b)
    }
}

/// A sampled land point with its twinkle phase.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Dot {
    pub lng: f64,
    pub lat: f64,
    pub phase: f64,
}

/// Grid points of one feature, scanning longitude then latitude at `spacing * 0.08` degrees.
pub fn sample_feature(feature: &LandFeature, spacing: f64) -> Vec<Position> {
    let step = spacing * 0.08;
    let Some(bounds) = GeoBounds::of(feature) else {
        return Vec::new();
    };
    if !step.is_finite() || step <= 0.0 {
        return Vec::new();
    }
    let mut out = Vec::new();
    let mut lng = bounds.min[0];
    while lng <= bounds.max[0] {
        let mut lat = bounds.min[1];
        while lat <= bounds.max[1] {
            if point_in_feature([lng, lat], feature) {
                out.push([lng, lat]);
            }
            lat += step;
        }
        lng += step;
    }
    out
}

/// Sample every feature in parallel, then assign phases in feature order from `rng`.
#[tracing::instrument(skip(land, rng), fields(features = land.features.len()))]
pub fn sample_dots(land: &LandCollection, spacing: f64, rng: &mut Rng64) -> Vec<Dot> {
    let per_feature: Vec<Vec<Position>> = land
        .features
        .par_iter()
        .map(|f| sample_feature(f, spacing))
        .collect();

    let dots: Vec<Dot> = per_feature
        .into_iter()
        .flatten()
        .map(|[lng, lat]| Dot {
            lng,
            lat,
            phase: rng.range(0.0, std::f64::consts::TAU),
        })
        .collect();
    tracing::info!(dots = dots.len(), "sampled land dots");
    dots
}

#[cfg(test)]
#[path = "../../tests/unit/geo/geometry.rs"]
mod tests;
