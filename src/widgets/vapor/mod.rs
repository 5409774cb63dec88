//! Vapor text cycle: texts erased one after another behind a sweeping clip, over a drifting
//! particle field.

pub mod cycle;
pub mod field;

use std::sync::Arc;
use std::time::Duration;

use crate::animation::timing::{FixedStep, secs};
use crate::config::{Alignment, Direction, VaporConfig};
use crate::foundation::color::Rgba;
use crate::foundation::core::{Point, Rect, SurfaceSize};
use crate::foundation::math::Rng64;
use crate::host::input::{EventDisposition, InputEvent, Layout};
use crate::host::view::{AccessibleNode, WidgetView};
use crate::host::visibility::ViewportGate;
use crate::host::widget::Widget;
use crate::particles::pool::ParticlePool;
use crate::render::plan::{Clip, DrawOp, FramePlan, Layer};
use crate::text::raster::{TextRaster, TextRasterizer};
use crate::text::style::TextStyle;

pub use cycle::{CycleFrame, CycleTimings, VaporCycle, VaporPhase};

/// Separator used for the screen-reader summary of all texts.
const LIVE_SEPARATOR: &str = " • ";

pub struct VaporTextWidget {
    cfg: VaporConfig,
    texts: Vec<String>,
    style: TextStyle,
    rasterizer: Arc<TextRasterizer>,
    rasters: Vec<Option<Arc<TextRaster>>>,
    size: Option<SurfaceSize>,
    cycle: Option<VaporCycle>,
    pool: ParticlePool,
    rng: Rng64,
    stepper: FixedStep,
    gate: ViewportGate,
}

impl VaporTextWidget {
    pub fn new(cfg: VaporConfig, rasterizer: Arc<TextRasterizer>) -> Self {
        let texts = cfg.texts.normalized();
        let style = TextStyle {
            family: cfg.font.family.clone(),
            size_px: cfg.font.size_px,
            weight: cfg.font.weight,
            letter_spacing_em: cfg.font.letter_spacing_em,
            line_height: cfg.font.line_height,
            color: cfg.color,
            uppercase: cfg.uppercase,
        };
        Self {
            rasters: vec![None; texts.len()],
            rng: Rng64::new(cfg.seed),
            texts,
            style,
            rasterizer,
            size: None,
            cycle: None,
            pool: ParticlePool::default(),
            stepper: FixedStep::new(60.0, 4),
            gate: ViewportGate::default(),
            cfg,
        }
    }

    pub fn texts(&self) -> &[String] {
        &self.texts
    }

    pub fn cycle(&self) -> Option<&VaporCycle> {
        self.cycle.as_ref()
    }

    pub fn particles_paused(&self) -> bool {
        !self.gate.is_visible()
    }

    fn timings(&self) -> CycleTimings {
        let a = &self.cfg.animation;
        CycleTimings {
            wait: secs(a.wait_duration),
            vaporize: secs(a.vaporize_duration),
            fade_in: secs(a.fade_in_duration),
        }
    }

    fn raster(&mut self, index: usize, dpr: f64) -> Option<Arc<TextRaster>> {
        let slot = self.rasters.get_mut(index)?;
        if slot.is_none() {
            let text = &self.texts[index];
            let raster = match self.rasterizer.rasterize(text, &self.style, dpr) {
                Ok(r) => r,
                Err(err) => {
                    tracing::warn!(%err, text = %text, "vapor text raster failed");
                    TextRaster::empty(dpr)
                }
            };
            *slot = Some(Arc::new(raster));
        }
        slot.clone()
    }

    /// Top-left corner for a raster inside the container, honoring alignment.
    fn place(&self, size: SurfaceSize, raster: &TextRaster) -> Point {
        let x = match self.cfg.alignment {
            Alignment::Left => 0.0,
            Alignment::Center => (size.css_width - raster.css_width()) / 2.0,
            Alignment::Right => size.css_width - raster.css_width(),
        };
        let y = ((size.css_height - raster.css_height()) / 2.0).max(0.0);
        Point::new(x, y)
    }

    fn step_particles(&mut self, now: Duration, bounds: Rect) {
        let (direction, spread) = (self.cfg.direction, self.cfg.spread);
        for _ in 0..self.stepper.steps(now) {
            self.pool.step(
                bounds,
                field::RECYCLE_MARGIN,
                field::STEP_DT,
                &mut self.rng,
                |rng, b| field::spawn(rng, b, direction, spread),
            );
        }
    }

    fn text_layer(
        &mut self,
        size: SurfaceSize,
        index: usize,
        opacity: f64,
        clip: Option<f64>,
    ) -> Option<Layer> {
        let raster = self.raster(index, size.dpr)?;
        if raster.is_empty() || opacity <= 0.0 {
            return None;
        }
        let origin = self.place(size, &raster);
        let mut layer = Layer::over();
        if let Some(hidden) = clip {
            let w = raster.css_width();
            let (x0, x1) = match self.cfg.direction {
                Direction::LeftToRight => (origin.x + w * hidden, origin.x + w),
                Direction::RightToLeft => (origin.x, origin.x + w * (1.0 - hidden)),
            };
            layer = layer.clipped(Clip::Rect(Rect::new(x0, 0.0, x1, size.css_height)));
        }
        layer.push(DrawOp::Raster {
            image: raster,
            origin,
            opacity,
        });
        Some(layer)
    }
}

impl Widget for VaporTextWidget {
    fn name(&self) -> &'static str {
        "vapor-text"
    }

    fn resize(&mut self, layout: Layout) {
        let height = layout.container.height.max(self.style.line_box_px());
        let next = SurfaceSize::acquire(layout.container.width, height, layout.dpr);
        let dpr_changed = next.map(|s| s.dpr) != self.size.map(|s| s.dpr);
        self.size = next;
        if dpr_changed {
            self.rasters.iter_mut().for_each(|r| *r = None);
        }
        if let Some(size) = self.size
            && self.pool.is_empty()
        {
            let (direction, spread) = (self.cfg.direction, self.cfg.spread);
            self.pool = ParticlePool::populate(
                field::particle_count(self.cfg.density),
                size.css_rect(),
                &mut self.rng,
                |rng, b| field::spawn(rng, b, direction, spread),
            );
        }
    }

    fn handle_input(&mut self, event: &InputEvent, _now: Duration) -> EventDisposition {
        match *event {
            InputEvent::Intersection { element, viewport } => {
                if self.gate.observe(element, viewport) {
                    tracing::debug!(visible = self.gate.is_visible(), "vapor visibility");
                    // Resume from the current time instead of catching up.
                    self.stepper.reset();
                }
                EventDisposition::Handled
            }
            _ => EventDisposition::Ignored,
        }
    }

    fn tick(&mut self, now: Duration) -> Option<FramePlan> {
        let timings = self.timings();
        let ease = self.cfg.animation.fade_ease;
        let n = self.texts.len();
        let cycle = self
            .cycle
            .get_or_insert_with(|| VaporCycle::new(n, timings, ease, now));
        cycle.advance(now);
        let frame = cycle.frame(now);

        let size = self.size?;
        let mut plan = FramePlan::new(size);

        if self.gate.is_visible() {
            self.step_particles(now, size.css_rect());
            let mut dots = Layer::over();
            for p in self.pool.particles() {
                dots.circle(
                    Point::new(p.x, p.y),
                    p.radius,
                    Rgba::WHITE.with_alpha(p.visible_alpha()),
                );
            }
            plan.push(dots);
        }

        if let Some((index, hidden)) = frame.outgoing
            && let Some(layer) = self.text_layer(size, index, 1.0, Some(hidden))
        {
            plan.push(layer);
        }
        let (index, opacity) = frame.incoming;
        if let Some(layer) = self.text_layer(size, index, opacity, None) {
            plan.push(layer);
        }
        Some(plan)
    }

    /// The active text in its configured element, then a live region naming every text.
    fn view(&self) -> WidgetView {
        let index = self.cycle.as_ref().map_or(0, VaporCycle::index);
        let text = self.texts.get(index).cloned().unwrap_or_default();
        let active = match self.cfg.tag.heading_level() {
            Some(level) => AccessibleNode::Heading { level, text },
            None => AccessibleNode::Text { text },
        };
        WidgetView::canvas()
            .with_accessible(active)
            .with_accessible(AccessibleNode::LiveRegion {
                text: self.texts.join(LIVE_SEPARATOR),
            })
    }

    fn teardown(&mut self) {
        self.cycle = None;
        self.rasters.iter_mut().for_each(|r| *r = None);
    }
}

#[cfg(test)]
#[path = "../../../tests/unit/widgets/vapor.rs"]
mod tests;
