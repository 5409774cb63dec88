use crate::foundation::core::{Point, Rect};
use crate::foundation::error::{FxError, FxResult};
use crate::foundation::math::{add_sat_u8, mul_div255_u8};
use crate::foundation::color::Rgba;
use crate::render::plan::{LayerBlend, RadialGradient};

pub type PremulRgba8 = [u8; 4];

pub fn over(dst: PremulRgba8, src: PremulRgba8, opacity: f32) -> PremulRgba8 {
    let opacity = opacity.clamp(0.0, 1.0);
    if opacity <= 0.0 || src[3] == 0 {
        return dst;
    }

    let op = ((opacity * 255.0).round() as i32).clamp(0, 255) as u16;
    let sa = mul_div255_u8(u16::from(src[3]), op);
    if sa == 0 {
        return dst;
    }
    let inv = 255u16 - u16::from(sa);

    let mut out = [0u8; 4];
    out[3] = add_sat_u8(sa, mul_div255_u8(u16::from(dst[3]), inv));
    for i in 0..3 {
        let sc = mul_div255_u8(u16::from(src[i]), op);
        let dc = mul_div255_u8(u16::from(dst[i]), inv);
        out[i] = add_sat_u8(sc, dc);
    }
    out
}

/// Additive blend of premultiplied pixels, saturating per channel.
pub fn lighter(dst: PremulRgba8, src: PremulRgba8) -> PremulRgba8 {
    [
        add_sat_u8(dst[0], src[0]),
        add_sat_u8(dst[1], src[1]),
        add_sat_u8(dst[2], src[2]),
        add_sat_u8(dst[3], src[3]),
    ]
}

fn blend(dst: PremulRgba8, src: PremulRgba8, mode: LayerBlend) -> PremulRgba8 {
    match mode {
        LayerBlend::Over => over(dst, src, 1.0),
        LayerBlend::Lighter => lighter(dst, src),
    }
}

fn check_same_len(dst: &[u8], src: &[u8], what: &str) -> FxResult<()> {
    if dst.len() != src.len() || !dst.len().is_multiple_of(4) {
        return Err(FxError::render(format!(
            "{what} expects equal-length rgba8 buffers"
        )));
    }
    Ok(())
}

pub fn over_in_place(dst: &mut [u8], src: &[u8], opacity: f32) -> FxResult<()> {
    check_same_len(dst, src, "over_in_place")?;
    for (d, s) in dst.chunks_exact_mut(4).zip(src.chunks_exact(4)) {
        let out = over([d[0], d[1], d[2], d[3]], [s[0], s[1], s[2], s[3]], opacity);
        d.copy_from_slice(&out);
    }
    Ok(())
}

pub fn lighter_in_place(dst: &mut [u8], src: &[u8]) -> FxResult<()> {
    check_same_len(dst, src, "lighter_in_place")?;
    for (d, s) in dst.chunks_exact_mut(4).zip(src.chunks_exact(4)) {
        let out = lighter([d[0], d[1], d[2], d[3]], [s[0], s[1], s[2], s[3]]);
        d.copy_from_slice(&out);
    }
    Ok(())
}

pub fn fill_in_place(buf: &mut [u8], px: PremulRgba8) {
    for d in buf.chunks_exact_mut(4) {
        d.copy_from_slice(&px);
    }
}

/// Scale every pixel by `coverage(x_center, y_center)` in `[0, 1]`.
fn mask_in_place<F>(buf: &mut [u8], width: u32, coverage: F)
where
    F: Fn(f64, f64) -> f64,
{
    let w = width as usize;
    if w == 0 {
        return;
    }
    for (i, d) in buf.chunks_exact_mut(4).enumerate() {
        let (x, y) = ((i % w) as f64 + 0.5, (i / w) as f64 + 0.5);
        let c = coverage(x, y).clamp(0.0, 1.0);
        if c >= 1.0 {
            continue;
        }
        let k = (c * 255.0).round() as u16;
        for v in d.iter_mut() {
            *v = mul_div255_u8(u16::from(*v), k);
        }
    }
}

/// Keep only the inside of a circle (device pixels), with a one-pixel antialiased edge.
pub fn clip_circle_in_place(buf: &mut [u8], width: u32, center: Point, radius: f64) {
    mask_in_place(buf, width, |x, y| {
        let d = ((x - center.x).powi(2) + (y - center.y).powi(2)).sqrt();
        radius - d + 0.5
    });
}

/// Keep only the part of each pixel covered by `rect` (device pixels).
pub fn clip_rect_in_place(buf: &mut [u8], width: u32, rect: Rect) {
    mask_in_place(buf, width, |x, y| {
        let cover =
            |c: f64, lo: f64, hi: f64| ((c + 0.5).min(hi) - (c - 0.5).max(lo)).clamp(0.0, 1.0);
        cover(x, rect.x0, rect.x1) * cover(y, rect.y0, rect.y1)
    });
}

/// Visit device pixels near a disc with their distance from `center` and edge coverage.
fn for_disc_pixels<F>(width: u32, height: u32, center: Point, radius: f64, mut visit: F)
where
    F: FnMut(usize, f64, f64),
{
    if radius <= 0.0 || width == 0 {
        return;
    }
    let x0 = (center.x - radius - 1.0).floor().max(0.0) as u32;
    let y0 = (center.y - radius - 1.0).floor().max(0.0) as u32;
    let x1 = ((center.x + radius + 1.0).ceil().max(0.0) as u32).min(width);
    let y1 = ((center.y + radius + 1.0).ceil().max(0.0) as u32).min(height);

    for y in y0..y1 {
        for x in x0..x1 {
            let dx = f64::from(x) + 0.5 - center.x;
            let dy = f64::from(y) + 0.5 - center.y;
            let d = (dx * dx + dy * dy).sqrt();
            let edge = (radius - d + 0.5).clamp(0.0, 1.0);
            if edge > 0.0 {
                visit((y as usize * width as usize + x as usize) * 4, d, edge);
            }
        }
    }
}

fn put(buf: &mut [u8], idx: usize, color: Rgba, mode: LayerBlend) {
    let dst = [buf[idx], buf[idx + 1], buf[idx + 2], buf[idx + 3]];
    let out = blend(dst, color.to_rgba8_premul().to_array(), mode);
    buf[idx..idx + 4].copy_from_slice(&out);
}

/// Blend a solid antialiased disc (device pixels) into `buf`.
pub fn fill_circle_in_place(
    buf: &mut [u8],
    width: u32,
    height: u32,
    center: Point,
    radius: f64,
    color: Rgba,
    mode: LayerBlend,
) {
    for_disc_pixels(width, height, center, radius, |idx, _, edge| {
        put(buf, idx, color.mul_alpha(edge), mode);
    });
}

/// Blend a radial gradient disc of `radius` around `center` (device pixels) into `buf`.
/// `scale` converts the gradient's CSS radii to device pixels.
#[allow(clippy::too_many_arguments)]
pub fn fill_radial_in_place(
    buf: &mut [u8],
    width: u32,
    height: u32,
    center: Point,
    radius: f64,
    gradient: &RadialGradient,
    scale: f64,
    mode: LayerBlend,
) {
    for_disc_pixels(width, height, center, radius, |idx, d, edge| {
        put(buf, idx, gradient.color_at(d / scale).mul_alpha(edge), mode);
    });
}

/// Convert premultiplied RGBA8 to straight alpha, for image encoders.
pub fn unpremultiply(data: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(data.len());
    for px in data.chunks_exact(4) {
        let a = px[3];
        if a == 0 {
            out.extend_from_slice(&[0, 0, 0, 0]);
            continue;
        }
        let un = |c: u8| ((u32::from(c) * 255 + u32::from(a) / 2) / u32::from(a)).min(255) as u8;
        out.extend_from_slice(&[un(px[0]), un(px[1]), un(px[2]), a]);
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/render/composite.rs"]
mod tests;
