use std::path::Path;

use anyhow::Context;
use serde::Deserialize;

use crate::foundation::error::{FxError, FxResult};

/// `[longitude, latitude]` in degrees.
pub type Position = [f64; 2];

/// One polygon: the outer ring first, then holes.
#[derive(Clone, Debug, PartialEq)]
pub struct LandPolygon {
    pub rings: Vec<Vec<Position>>,
}

impl LandPolygon {
    pub fn outer(&self) -> &[Position] {
        self.rings.first().map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn holes(&self) -> &[Vec<Position>] {
        self.rings.get(1..).unwrap_or(&[])
    }
}

/// A land area. `Polygon` features carry one member, `MultiPolygon` features any number.
#[derive(Clone, Debug, PartialEq)]
pub struct LandFeature {
    pub polygons: Vec<LandPolygon>,
}

impl LandFeature {
    pub fn rings(&self) -> impl Iterator<Item = &[Position]> {
        self.polygons
            .iter()
            .flat_map(|p| p.rings.iter().map(Vec::as_slice))
    }
}

/// Land areas decoded from a GeoJSON `FeatureCollection`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LandCollection {
    pub features: Vec<LandFeature>,
}

#[derive(Deserialize)]
struct RawCollection {
    features: Vec<RawFeature>,
}

#[derive(Deserialize)]
struct RawFeature {
    #[serde(default)]
    geometry: Option<RawGeometry>,
}

#[derive(Deserialize)]
#[serde(tag = "type")]
enum RawGeometry {
    Polygon { coordinates: Vec<Vec<Vec<f64>>> },
    MultiPolygon { coordinates: Vec<Vec<Vec<Vec<f64>>>> },
    #[serde(other)]
    Unsupported,
}

impl LandCollection {
    /// Decode a GeoJSON document. Features whose geometry is missing or not a (multi)polygon
    /// are skipped.
    pub fn from_json_slice(bytes: &[u8]) -> FxResult<Self> {
        let raw: RawCollection = serde_json::from_slice(bytes)
            .map_err(|e| FxError::parse(format!("land geojson: {e}")))?;

        let total = raw.features.len();
        let mut features = Vec::with_capacity(total);
        for feature in raw.features {
            let polygons = match feature.geometry {
                Some(RawGeometry::Polygon { coordinates }) => vec![polygon(coordinates)?],
                Some(RawGeometry::MultiPolygon { coordinates }) => coordinates
                    .into_iter()
                    .map(polygon)
                    .collect::<FxResult<Vec<_>>>()?,
                Some(RawGeometry::Unsupported) | None => continue,
            };
            features.push(LandFeature { polygons });
        }
        if features.len() < total {
            tracing::debug!(
                kept = features.len(),
                skipped = total - features.len(),
                "skipped non-polygon land features"
            );
        }
        Ok(Self { features })
    }

    pub fn load_file(path: &Path) -> FxResult<Self> {
        let bytes = std::fs::read(path)
            .with_context(|| format!("read land data from '{}'", path.display()))?;
        Self::from_json_slice(&bytes)
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }
}

fn polygon(rings: Vec<Vec<Vec<f64>>>) -> FxResult<LandPolygon> {
    let rings = rings
        .into_iter()
        .map(|ring| ring.into_iter().map(position).collect::<FxResult<Vec<_>>>())
        .collect::<FxResult<Vec<_>>>()?;
    Ok(LandPolygon { rings })
}

fn position(ordinates: Vec<f64>) -> FxResult<Position> {
    match ordinates.as_slice() {
        [lng, lat, ..] => Ok([*lng, *lat]),
        _ => Err(FxError::parse("geojson position needs at least two ordinates")),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/geo/land.rs"]
mod tests;
