//! Rotating dotted globe with network routes, bursts and a starfield.

pub mod draw;
pub mod effects;
pub mod rotation;

use std::time::Duration;

use crate::animation::timing::FrameThrottle;
use crate::config::GlobeConfig;
use crate::foundation::color::Rgba;
use crate::foundation::core::SurfaceSize;
use crate::foundation::math::Rng64;
use crate::geo::geometry::{Dot, sample_dots};
use crate::geo::land::{LandCollection, Position};
use crate::geo::projection::{Orthographic, graticule};
use crate::host::input::{EventDisposition, InputEvent, Layout};
use crate::host::view::{ViewContent, WidgetView};
use crate::host::widget::{Widget, WidgetMessage};
use crate::render::plan::FramePlan;

pub use effects::{Burst, EffectLimits, Effects, Route, Star};
pub use rotation::{RotationControl, RotationMode, RotationSettings};

pub const LOAD_FAILED_MESSAGE: &str = "Failed to load land map data";
pub const DRAG_HINT: &str = "Drag to rotate";

/// Ratio of surface size to globe radius.
const SIZE_TO_RADIUS: f64 = 2.1;

#[derive(Debug)]
pub enum LoadState {
    Loading,
    Ready { land: LandCollection, dots: Vec<Dot> },
    Failed,
}

pub struct GlobeWidget {
    cfg: GlobeConfig,
    size: Option<SurfaceSize>,
    radius: f64,
    state: LoadState,
    rotation: RotationControl,
    throttle: FrameThrottle,
    effects: Effects,
    stars: Vec<Star>,
    graticule: Vec<Vec<Position>>,
    rng: Rng64,
    torn_down: bool,
}

impl GlobeWidget {
    pub fn new(cfg: GlobeConfig) -> Self {
        let rotation = RotationControl::new(
            cfg.initial_rotation,
            RotationSettings {
                speed_deg_per_sec: cfg.rotation_deg_per_sec(),
                sensitivity: cfg.drag_sensitivity,
                resume_after_release: Duration::from_millis(cfg.resume_after_release_ms),
                resume_after_leave: Duration::from_millis(cfg.resume_after_leave_ms),
            },
        );
        let effects = Effects::new(EffectLimits {
            max_bursts: cfg.max_bursts,
            burst_cooldown: cfg.burst_cooldown_secs,
            max_routes: cfg.max_routes,
            route_cooldown: cfg.route_cooldown_secs,
        });
        Self {
            size: None,
            radius: 0.0,
            state: LoadState::Loading,
            rotation,
            throttle: FrameThrottle::new(cfg.max_fps),
            effects,
            stars: Vec::new(),
            graticule: graticule(),
            rng: Rng64::new(cfg.seed),
            torn_down: false,
            cfg,
        }
    }

    pub fn load_state(&self) -> &LoadState {
        &self.state
    }

    pub fn rotation(&self) -> &RotationControl {
        &self.rotation
    }

    pub fn effects(&self) -> &Effects {
        &self.effects
    }

    pub fn stars(&self) -> &[Star] {
        &self.stars
    }

    pub fn surface(&self) -> Option<SurfaceSize> {
        self.size
    }

    pub fn dots(&self) -> &[Dot] {
        match &self.state {
            LoadState::Ready { dots, .. } => dots,
            _ => &[],
        }
    }

    fn projection(&self, size: SurfaceSize) -> Orthographic {
        Orthographic::new(self.radius, size.center()).with_rotation(self.rotation.rotation())
    }

    /// The starfield is built once, after land data and a surface are both available.
    fn ensure_stars(&mut self) {
        if !self.stars.is_empty() || !matches!(self.state, LoadState::Ready { .. }) {
            return;
        }
        if let Some(size) = self.size {
            self.stars = effects::spawn_stars(&mut self.rng, size.css_width, size.css_height);
        }
    }

    fn compose(&mut self, size: SurfaceSize, t: f64) -> FramePlan {
        let frame = draw::Frame {
            size,
            projection: self.projection(size),
            k: 1.0,
            t,
        };
        let mut plan = FramePlan::new(size);
        plan.clear = Some(Rgba::TRANSPARENT);
        plan.push(draw::stars(&frame, &self.stars));
        plan.push(draw::ocean(&frame));

        if let LoadState::Ready { land, dots } = &self.state {
            plan.push(draw::outlines(&frame, &self.graticule, land));
            plan.push(draw::city_lights(&frame, dots));

            self.effects.update_bursts(t, dots, &mut self.rng);
            plan.push(draw::bursts(&frame, self.effects.bursts()));

            self.effects.update_routes(t, dots, &mut self.rng);
            let connections = draw::connections(&frame.projection, self.effects.routes());
            for layer in draw::routes(&frame, self.radius, &connections) {
                plan.push(layer);
            }
        }

        plan.push(draw::rim(&frame));
        plan
    }
}

impl Widget for GlobeWidget {
    fn name(&self) -> &'static str {
        "globe"
    }

    fn resize(&mut self, layout: Layout) {
        let side = self
            .cfg
            .width
            .min(self.cfg.height)
            .min(layout.viewport.width)
            .min(layout.viewport.height);
        self.size = SurfaceSize::acquire(side, side, layout.dpr);
        self.radius = side / SIZE_TO_RADIUS;
        self.ensure_stars();
    }

    fn handle_input(&mut self, event: &InputEvent, now: Duration) -> EventDisposition {
        if matches!(self.state, LoadState::Failed) {
            return EventDisposition::Ignored;
        }
        match *event {
            InputEvent::PointerDown { pos } => {
                self.rotation.pointer_down(pos);
                EventDisposition::Handled
            }
            InputEvent::PointerMove { pos } => {
                if self.rotation.pointer_move(pos) {
                    EventDisposition::Handled
                } else {
                    EventDisposition::Ignored
                }
            }
            InputEvent::PointerUp { .. } => {
                self.rotation.pointer_up(now);
                EventDisposition::Handled
            }
            InputEvent::PointerLeave => {
                self.rotation.pointer_leave(now);
                EventDisposition::Handled
            }
            InputEvent::Wheel { .. } => EventDisposition::PreventDefault,
            InputEvent::Resize(_) | InputEvent::Intersection { .. } => EventDisposition::Ignored,
        }
    }

    fn receive(&mut self, message: WidgetMessage) {
        if self.torn_down {
            tracing::debug!("land data arrived after teardown; dropped");
            return;
        }
        let WidgetMessage::LandData(result) = message;
        match result {
            Ok(land) => {
                let dots = sample_dots(&land, self.cfg.dot_spacing, &mut self.rng);
                self.state = LoadState::Ready { land, dots };
                self.ensure_stars();
            }
            Err(err) => {
                tracing::error!(%err, "land data unavailable");
                self.state = LoadState::Failed;
            }
        }
    }

    fn tick(&mut self, now: Duration) -> Option<FramePlan> {
        if self.torn_down || matches!(self.state, LoadState::Failed) {
            return None;
        }
        self.rotation.advance(now);
        let size = self.size?;
        if !self.throttle.admit(now) {
            return None;
        }
        Some(self.compose(size, now.as_secs_f64()))
    }

    fn view(&self) -> WidgetView {
        match self.state {
            LoadState::Failed => WidgetView {
                accessible: Vec::new(),
                content: ViewContent::ErrorText(LOAD_FAILED_MESSAGE.to_owned()),
                hint: None,
            },
            _ => WidgetView::canvas().with_hint(DRAG_HINT),
        }
    }

    fn teardown(&mut self) {
        self.torn_down = true;
        self.effects.clear();
    }
}

#[cfg(test)]
#[path = "../../../tests/unit/widgets/globe.rs"]
mod tests;
