use std::collections::HashMap;
use std::sync::Arc;

use crate::foundation::color::Rgba;
use crate::foundation::core::{Point, Rect};
use crate::foundation::error::{FxError, FxResult};
use crate::render::backend::{FrameRGBA, RenderBackend};
use crate::render::composite::{
    clip_circle_in_place, clip_rect_in_place, fill_circle_in_place, fill_in_place,
    fill_radial_in_place, lighter_in_place, over_in_place,
};
use crate::render::plan::{Clip, DrawOp, FramePlan, Layer, LayerBlend, Paint};
use crate::text::raster::TextRaster;

/// Software backend: vector work through `vello_cpu`, layer compositing and radial gradients
/// on premultiplied RGBA8 buffers.
#[derive(Default)]
pub struct CpuBackend {
    // Keyed by `Arc` address; the stored clone keeps the address from being reused.
    images: HashMap<usize, (Arc<TextRaster>, vello_cpu::Image)>,
}

struct Target {
    width: u16,
    height: u16,
    dpr: f64,
}

impl CpuBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Draw `layer.ops` into `buf`. Ops in an additive layer are each summed onto the buffer,
    /// so overlapping shapes brighten one another.
    fn draw_layer(
        &mut self,
        layer: &Layer,
        target: &Target,
        buf: &mut [u8],
        scratch: &mut vello_cpu::Pixmap,
    ) -> FxResult<()> {
        let mut batch: Option<vello_cpu::RenderContext> = None;
        let device = vello_cpu::kurbo::Affine::scale(target.dpr);
        let mode = layer.blend;
        let additive = mode == LayerBlend::Lighter;

        for op in &layer.ops {
            match op {
                DrawOp::FillCircle {
                    center,
                    radius,
                    paint: Paint::Radial(gradient),
                } => {
                    flush_batch(&mut batch, scratch, buf, mode)?;
                    fill_radial_in_place(
                        buf,
                        u32::from(target.width),
                        u32::from(target.height),
                        scale_point(*center, target.dpr),
                        radius * target.dpr,
                        gradient,
                        target.dpr,
                        mode,
                    );
                }
                DrawOp::FillCircle {
                    center,
                    radius,
                    paint: Paint::Solid(color),
                } if additive => fill_circle_in_place(
                    buf,
                    u32::from(target.width),
                    u32::from(target.height),
                    scale_point(*center, target.dpr),
                    radius * target.dpr,
                    *color,
                    mode,
                ),
                DrawOp::FillCircle {
                    center,
                    radius,
                    paint: Paint::Solid(color),
                } => {
                    use vello_cpu::kurbo::Shape;

                    let ctx = open_batch(&mut batch, target);
                    ctx.set_transform(device);
                    ctx.set_paint(paint_color(*color));
                    let circle = vello_cpu::kurbo::Circle::new((center.x, center.y), *radius);
                    ctx.fill_path(&circle.to_path(0.05));
                }
                DrawOp::StrokePath { path, width, color } => {
                    let ctx = open_batch(&mut batch, target);
                    ctx.set_transform(device);
                    ctx.set_paint(paint_color(*color));
                    ctx.set_stroke(vello_cpu::kurbo::Stroke::new(*width));
                    ctx.stroke_path(&bezpath_to_cpu(path));
                }
                DrawOp::Raster {
                    image,
                    origin,
                    opacity,
                } => {
                    if image.is_empty() || *opacity <= 0.0 {
                        continue;
                    }
                    let paint = self.image_paint_for(image)?;
                    let ctx = open_batch(&mut batch, target);
                    let placed = vello_cpu::kurbo::Affine::translate((
                        origin.x * target.dpr,
                        origin.y * target.dpr,
                    )) * vello_cpu::kurbo::Affine::scale(target.dpr / image.scale);
                    ctx.set_transform(placed);
                    ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);
                    ctx.set_paint(paint);
                    let opacity = opacity.clamp(0.0, 1.0) as f32;
                    if opacity < 1.0 {
                        ctx.push_opacity_layer(opacity);
                    }
                    ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
                        0.0,
                        0.0,
                        f64::from(image.width),
                        f64::from(image.height),
                    ));
                    if opacity < 1.0 {
                        ctx.pop_layer();
                    }
                }
            }
            if additive {
                flush_batch(&mut batch, scratch, buf, mode)?;
            }
        }
        flush_batch(&mut batch, scratch, buf, mode)
    }

    fn image_paint_for(&mut self, raster: &Arc<TextRaster>) -> FxResult<vello_cpu::Image> {
        let key = Arc::as_ptr(raster) as usize;
        if let Some((_, paint)) = self.images.get(&key) {
            return Ok(paint.clone());
        }
        let pixmap = premul_bytes_to_pixmap(&raster.data, raster.width, raster.height)?;
        let paint = vello_cpu::Image {
            image: vello_cpu::ImageSource::Pixmap(Arc::new(pixmap)),
            sampler: vello_cpu::peniko::ImageSampler::default(),
        };
        self.images.insert(key, (raster.clone(), paint.clone()));
        Ok(paint)
    }

    fn retain_images(&mut self, plan: &FramePlan) {
        let live: Vec<usize> = plan
            .layers
            .iter()
            .flat_map(|l| l.ops.iter())
            .filter_map(|op| match op {
                DrawOp::Raster { image, .. } => Some(Arc::as_ptr(image) as usize),
                _ => None,
            })
            .collect();
        self.images.retain(|k, _| live.contains(k));
    }
}

impl RenderBackend for CpuBackend {
    #[tracing::instrument(skip_all, fields(layers = plan.layers.len()))]
    fn render_plan(&mut self, plan: &FramePlan) -> FxResult<FrameRGBA> {
        let (width, height) = plan.size.device_px();
        let target = Target {
            width: width
                .try_into()
                .map_err(|_| FxError::render("surface width exceeds u16"))?,
            height: height
                .try_into()
                .map_err(|_| FxError::render("surface height exceeds u16"))?,
            dpr: plan.size.dpr,
        };
        let len = width as usize * height as usize * 4;

        let mut frame = vec![0u8; len];
        if let Some(clear) = plan.clear {
            fill_in_place(&mut frame, clear.to_rgba8_premul().to_array());
        }

        let mut layer_buf = vec![0u8; len];
        let mut scratch = vello_cpu::Pixmap::new(target.width, target.height);
        for layer in &plan.layers {
            layer_buf.fill(0);
            self.draw_layer(layer, &target, &mut layer_buf, &mut scratch)?;

            match layer.clip {
                Some(Clip::Circle { center, radius }) => clip_circle_in_place(
                    &mut layer_buf,
                    width,
                    scale_point(center, target.dpr),
                    radius * target.dpr,
                ),
                Some(Clip::Rect(r)) => clip_rect_in_place(
                    &mut layer_buf,
                    width,
                    Rect::new(
                        r.x0 * target.dpr,
                        r.y0 * target.dpr,
                        r.x1 * target.dpr,
                        r.y1 * target.dpr,
                    ),
                ),
                None => {}
            }

            match layer.blend {
                LayerBlend::Over => over_in_place(&mut frame, &layer_buf, 1.0)?,
                LayerBlend::Lighter => lighter_in_place(&mut frame, &layer_buf)?,
            }
        }
        self.retain_images(plan);

        Ok(FrameRGBA {
            width,
            height,
            data: frame,
            premultiplied: true,
        })
    }
}

fn open_batch<'a>(
    batch: &'a mut Option<vello_cpu::RenderContext>,
    target: &Target,
) -> &'a mut vello_cpu::RenderContext {
    batch.get_or_insert_with(|| vello_cpu::RenderContext::new(target.width, target.height))
}

fn flush_batch(
    batch: &mut Option<vello_cpu::RenderContext>,
    scratch: &mut vello_cpu::Pixmap,
    buf: &mut [u8],
    mode: LayerBlend,
) -> FxResult<()> {
    let Some(mut ctx) = batch.take() else {
        return Ok(());
    };
    scratch.data_as_u8_slice_mut().fill(0);
    ctx.flush();
    ctx.render_to_pixmap(scratch);
    match mode {
        LayerBlend::Over => over_in_place(buf, scratch.data_as_u8_slice(), 1.0),
        LayerBlend::Lighter => lighter_in_place(buf, scratch.data_as_u8_slice()),
    }
}

fn paint_color(c: Rgba) -> vello_cpu::peniko::Color {
    let [r, g, b, a] = c.to_rgba8_straight();
    vello_cpu::peniko::Color::from_rgba8(r, g, b, a)
}

fn scale_point(p: Point, k: f64) -> Point {
    Point::new(p.x * k, p.y * k)
}

fn point_to_cpu(p: Point) -> vello_cpu::kurbo::Point {
    vello_cpu::kurbo::Point::new(p.x, p.y)
}

fn bezpath_to_cpu(path: &crate::foundation::core::BezPath) -> vello_cpu::kurbo::BezPath {
    use kurbo::PathEl;

    let mut out = vello_cpu::kurbo::BezPath::new();
    for &el in path.elements() {
        match el {
            PathEl::MoveTo(p) => out.move_to(point_to_cpu(p)),
            PathEl::LineTo(p) => out.line_to(point_to_cpu(p)),
            PathEl::QuadTo(p1, p2) => out.quad_to(point_to_cpu(p1), point_to_cpu(p2)),
            PathEl::CurveTo(p1, p2, p3) => {
                out.curve_to(point_to_cpu(p1), point_to_cpu(p2), point_to_cpu(p3));
            }
            PathEl::ClosePath => out.close_path(),
        }
    }
    out
}

fn premul_bytes_to_pixmap(
    rgba8_premul: &[u8],
    width: u32,
    height: u32,
) -> FxResult<vello_cpu::Pixmap> {
    let w: u16 = width
        .try_into()
        .map_err(|_| FxError::render("image width exceeds u16"))?;
    let h: u16 = height
        .try_into()
        .map_err(|_| FxError::render("image height exceeds u16"))?;
    if rgba8_premul.len() != width as usize * height as usize * 4 {
        return Err(FxError::render("raster byte length mismatch"));
    }

    let mut may_have_opacities = false;
    let pixels = rgba8_premul
        .chunks_exact(4)
        .map(|px| {
            may_have_opacities |= px[3] != 255;
            vello_cpu::peniko::color::PremulRgba8 {
                r: px[0],
                g: px[1],
                b: px[2],
                a: px[3],
            }
        })
        .collect();

    Ok(vello_cpu::Pixmap::from_parts_with_opacity(
        pixels,
        w,
        h,
        may_have_opacities,
    ))
}
