use std::time::Duration;

use crate::foundation::core::Point;
use crate::foundation::math::wrap_degrees;

/// Where a drag started.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DragAnchor {
    pub start: Point,
    pub rotation: [f64; 2],
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum RotationMode {
    Auto,
    Manual {
        drag: Option<DragAnchor>,
        /// Auto-rotation resumes once the clock reaches this instant.
        resume_at: Option<Duration>,
    },
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RotationSettings {
    pub speed_deg_per_sec: f64,
    pub sensitivity: f64,
    pub resume_after_release: Duration,
    pub resume_after_leave: Duration,
}

/// Globe rotation `[λ, φ]` under auto-rotation or pointer drag.
///
/// `λ` always stays in `(-180, 180]` and `φ` in `[-90, 90]`.
#[derive(Clone, Debug)]
pub struct RotationControl {
    rotation: [f64; 2],
    mode: RotationMode,
    settings: RotationSettings,
    last: Option<Duration>,
}

impl RotationControl {
    pub fn new(initial: [f64; 2], settings: RotationSettings) -> Self {
        Self {
            rotation: [wrap_degrees(initial[0]), initial[1].clamp(-90.0, 90.0)],
            mode: RotationMode::Auto,
            settings,
            last: None,
        }
    }

    pub fn rotation(&self) -> [f64; 2] {
        self.rotation
    }

    pub fn mode(&self) -> RotationMode {
        self.mode
    }

    /// Advance auto-rotation to `now`, resuming it first if a resume deadline has passed.
    pub fn advance(&mut self, now: Duration) {
        if let RotationMode::Manual {
            drag: None,
            resume_at: Some(at),
        } = self.mode
            && now >= at
        {
            self.mode = RotationMode::Auto;
            self.last = Some(at);
        }

        let dt = self
            .last
            .map(|last| now.saturating_sub(last).as_secs_f64())
            .unwrap_or(0.0);
        self.last = Some(now);
        if self.mode == RotationMode::Auto {
            self.rotation[0] =
                wrap_degrees(self.rotation[0] + self.settings.speed_deg_per_sec * dt);
        }
    }

    pub fn pointer_down(&mut self, pos: Point) {
        self.mode = RotationMode::Manual {
            drag: Some(DragAnchor {
                start: pos,
                rotation: self.rotation,
            }),
            resume_at: None,
        };
    }

    /// Returns `true` when the rotation changed.
    pub fn pointer_move(&mut self, pos: Point) -> bool {
        let RotationMode::Manual {
            drag: Some(anchor), ..
        } = self.mode
        else {
            return false;
        };
        let s = self.settings.sensitivity;
        let d = pos - anchor.start;
        self.rotation = [
            wrap_degrees(anchor.rotation[0] + d.x * s),
            (anchor.rotation[1] - d.y * s).clamp(-90.0, 90.0),
        ];
        true
    }

    pub fn pointer_up(&mut self, now: Duration) {
        if let RotationMode::Manual { drag: Some(_), .. } = self.mode {
            self.mode = RotationMode::Manual {
                drag: None,
                resume_at: Some(now + self.settings.resume_after_release),
            };
        }
    }

    /// Pull the resume deadline forward after a release. A drag in progress carries on, since
    /// moves and the release are still routed here after the pointer leaves the surface.
    pub fn pointer_leave(&mut self, now: Duration) {
        if let RotationMode::Manual {
            drag: None,
            resume_at,
        } = self.mode
        {
            let leave = now + self.settings.resume_after_leave;
            self.mode = RotationMode::Manual {
                drag: None,
                resume_at: Some(resume_at.map_or(leave, |at| at.min(leave))),
            };
        }
    }
}

#[cfg(test)]
#[path = "../../../tests/unit/widgets/globe_rotation.rs"]
mod tests;
