use super::*;

fn block(width: u32, height: u32, scale: f64) -> TextRaster {
    let mut data = vec![0u8; (width * height * 4) as usize];
    // Left half opaque, right half faint.
    for y in 0..height {
        for x in 0..width {
            let i = ((y * width + x) * 4) as usize;
            data[i + 3] = if x < width / 2 { 255 } else { 40 };
        }
    }
    TextRaster {
        width,
        height,
        scale,
        data,
    }
}

#[test]
fn stride_is_inverse_to_density() {
    assert_eq!(stride_for_density(5.0), 2);
    assert_eq!(stride_for_density(4.0), 3);
    assert_eq!(stride_for_density(1.0), 10);
    assert_eq!(stride_for_density(50.0), 1);
    assert_eq!(stride_for_density(0.0), 10);
}

#[test]
fn only_covered_pixels_become_anchors() {
    let raster = block(8, 4, 1.0);
    let pts = sample_coverage(&raster, 2, 128);
    assert_eq!(pts.len(), 4);
    assert!(pts.iter().all(|p| p.x < 4.0));
}

#[test]
fn anchors_are_reported_in_css_pixels() {
    let raster = block(8, 4, 2.0);
    let pts = sample_coverage(&raster, 1, 128);
    assert!(pts.iter().all(|p| p.x < 2.0 && p.y < 2.0));
    assert!(pts.contains(&Point::new(1.5, 0.5)));
}

#[test]
fn empty_raster_yields_no_anchors() {
    assert!(sample_coverage(&TextRaster::empty(1.0), 1, 1).is_empty());
}
