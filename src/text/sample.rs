use crate::foundation::core::Point;
use crate::text::raster::TextRaster;

/// Grid stride for a particle density: denser text means a tighter grid.
pub fn stride_for_density(density: f64) -> u32 {
    if !density.is_finite() || density <= 0.0 {
        return 10;
    }
    ((10.0 / density).round() as u32).max(1)
}

/// Walk `raster` on a `stride`-pixel grid and return the CSS-pixel positions whose alpha is at
/// least `threshold`. Points are relative to the raster's top-left corner.
pub fn sample_coverage(raster: &TextRaster, stride: u32, threshold: u8) -> Vec<Point> {
    if raster.is_empty() {
        return Vec::new();
    }
    let stride = stride.max(1);
    let mut out = Vec::new();
    for y in (0..raster.height).step_by(stride as usize) {
        for x in (0..raster.width).step_by(stride as usize) {
            if raster.alpha_at(x, y) >= threshold {
                out.push(Point::new(
                    f64::from(x) / raster.scale,
                    f64::from(y) / raster.scale,
                ));
            }
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/text/sample.rs"]
mod tests;
