use std::sync::Arc;
use std::time::Duration;

use crate::animation::timing::{FixedStep, phase_progress, secs};
use crate::config::HeadingConfig;
use crate::foundation::core::{Point, SurfaceSize, Vec2};
use crate::foundation::math::Rng64;
use crate::host::input::{EventDisposition, InputEvent, Layout};
use crate::host::view::{AccessibleNode, WidgetView};
use crate::host::widget::Widget;
use crate::render::plan::{FramePlan, Layer};
use crate::text::raster::TextRasterizer;
use crate::text::sample::{sample_coverage, stride_for_density};
use crate::text::style::TextStyle;

const ALPHA_THRESHOLD: u8 = 128;
const SPRING: f64 = 0.08;
const DAMPING: f64 = 0.82;
const REPEL_FORCE: f64 = 4.0;

/// Font size for a container width: one eighth of the width, kept within 48..=96 px.
pub fn font_size_for_width(width: f64) -> f64 {
    (width / 8.0).floor().clamp(48.0, 96.0)
}

/// Container height for a font size.
pub fn container_height(font_size: f64) -> f64 {
    (font_size * 1.1).round()
}

#[derive(Clone, Copy, Debug)]
struct Mote {
    pos: Point,
    vel: Vec2,
    home: Point,
}

/// Heading text drawn as particles that gather onto sampled glyph coverage and scatter away
/// from the pointer.
pub struct ParticleHeading {
    cfg: HeadingConfig,
    rasterizer: Arc<TextRasterizer>,
    size: Option<SurfaceSize>,
    font_size: f64,
    motes: Vec<Mote>,
    pointer: Option<Point>,
    rng: Rng64,
    stepper: FixedStep,
    revealed_from: Option<Duration>,
}

impl ParticleHeading {
    pub fn new(cfg: HeadingConfig, rasterizer: Arc<TextRasterizer>) -> Self {
        Self {
            font_size: cfg.font_size,
            rng: Rng64::new(cfg.seed),
            cfg,
            rasterizer,
            size: None,
            motes: Vec::new(),
            pointer: None,
            stepper: FixedStep::new(60.0, 4),
            revealed_from: None,
        }
    }

    pub fn font_size(&self) -> f64 {
        self.font_size
    }

    pub fn surface(&self) -> Option<SurfaceSize> {
        self.size
    }

    pub fn anchor_count(&self) -> usize {
        self.motes.len()
    }

    fn resample(&mut self, size: SurfaceSize) {
        let style = TextStyle {
            family: self.cfg.font_family.clone(),
            size_px: self.font_size,
            weight: self.cfg.font_weight,
            letter_spacing_em: 0.0,
            line_height: 1.1,
            color: self.cfg.color,
            uppercase: false,
        };
        let raster = match self.rasterizer.rasterize(&self.cfg.text, &style, 1.0) {
            Ok(r) => r,
            Err(err) => {
                tracing::warn!(%err, "heading raster failed");
                self.motes.clear();
                return;
            }
        };
        let offset = Vec2::new(
            (size.css_width - raster.css_width()) / 2.0,
            (size.css_height - raster.css_height()) / 2.0,
        );
        let anchors = sample_coverage(
            &raster,
            stride_for_density(self.cfg.density),
            ALPHA_THRESHOLD,
        );
        let rng = &mut self.rng;
        self.motes = anchors
            .into_iter()
            .map(|a| Mote {
                pos: Point::new(
                    rng.range(0.0, size.css_width),
                    rng.range(0.0, size.css_height),
                ),
                vel: Vec2::ZERO,
                home: a + offset,
            })
            .collect();
        self.revealed_from = None;
        tracing::debug!(
            anchors = self.motes.len(),
            font_size = self.font_size,
            "heading resampled"
        );
    }

    fn step(&mut self) {
        let radius = self.cfg.repel_radius;
        for m in &mut self.motes {
            let mut force = (m.home - m.pos) * SPRING;
            if let Some(p) = self.pointer {
                let away = m.pos - p;
                let d = away.hypot();
                if d > 0.0 && d < radius {
                    force += away / d * REPEL_FORCE * (radius - d) / radius;
                }
            }
            m.vel = (m.vel + force) * DAMPING;
            m.pos += m.vel;
        }
    }
}

impl Widget for ParticleHeading {
    fn name(&self) -> &'static str {
        "particle-heading"
    }

    fn resize(&mut self, layout: Layout) {
        self.font_size = font_size_for_width(layout.container.width);
        let height = container_height(self.font_size);
        self.size = SurfaceSize::acquire(layout.container.width, height, layout.dpr);
        match self.size {
            Some(size) => self.resample(size),
            None => self.motes.clear(),
        }
    }

    fn handle_input(&mut self, event: &InputEvent, _now: Duration) -> EventDisposition {
        match *event {
            InputEvent::PointerMove { pos } | InputEvent::PointerDown { pos } => {
                self.pointer = Some(pos);
                EventDisposition::Handled
            }
            InputEvent::PointerLeave => {
                self.pointer = None;
                EventDisposition::Handled
            }
            _ => EventDisposition::Ignored,
        }
    }

    fn tick(&mut self, now: Duration) -> Option<FramePlan> {
        let size = self.size?;
        let start = *self.revealed_from.get_or_insert(now);
        for _ in 0..self.stepper.steps(now) {
            self.step();
        }

        let fade = phase_progress(now.saturating_sub(start), secs(self.cfg.reveal_secs));
        let color = self.cfg.color.mul_alpha(fade);
        let mut layer = Layer::lighter();
        for m in &self.motes {
            layer.circle(m.pos, self.cfg.particle_size, color);
        }
        let mut plan = FramePlan::new(size);
        plan.push(layer);
        Some(plan)
    }

    fn view(&self) -> WidgetView {
        WidgetView::canvas().with_accessible(AccessibleNode::Heading {
            level: 2,
            text: self.cfg.text.clone(),
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/widgets/heading.rs"]
mod tests;
