//! Time-driven globe overlays: the starfield, firework bursts and network routes.
//!
//! Times are seconds on the widget clock.

use crate::foundation::core::Point;
use crate::foundation::math::Rng64;
use crate::geo::geometry::Dot;
use crate::geo::land::Position;

/// Fixed origin of every route, in central Brazil.
pub const ROUTE_ORIGIN: Position = [-54.0, -14.0];

/// Static hub destinations: New York, Paris, Tokyo, London, Buenos Aires.
pub const HUBS: [Position; 5] = [
    [-74.006, 40.7128],
    [2.3522, 48.8566],
    [139.6917, 35.6895],
    [-0.1276, 51.5074],
    [-58.3816, -34.6037],
];

pub const HUB_SPEED: f64 = 0.22;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Star {
    pub pos: Point,
    pub radius: f64,
    pub phase: f64,
    pub alpha: f64,
}

impl Star {
    pub fn twinkle(&self, t: f64) -> f64 {
        0.75 + 0.25 * (t * 0.8 + self.phase).sin()
    }
}

pub fn star_count(width: f64, height: f64) -> usize {
    let n = ((width + height) / 12.0).floor().max(0.0) as usize;
    n.clamp(100, 160)
}

pub fn spawn_stars(rng: &mut Rng64, width: f64, height: f64) -> Vec<Star> {
    (0..star_count(width, height))
        .map(|_| Star {
            pos: Point::new(rng.range(0.0, width), rng.range(0.0, height)),
            radius: rng.range(0.6, 2.4),
            phase: rng.range(0.0, std::f64::consts::TAU),
            alpha: rng.range(0.35, 1.0),
        })
        .collect()
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Burst {
    pub origin: Position,
    pub start: f64,
    pub hue: f64,
    pub speed: f64,
    pub life: f64,
}

impl Burst {
    /// Normalized age in `[0, 1]`.
    pub fn progress(&self, t: f64) -> f64 {
        if self.life <= 0.0 {
            return 1.0;
        }
        ((t - self.start) / self.life).clamp(0.0, 1.0)
    }
}

/// A dynamic route from [`ROUTE_ORIGIN`] to a land dot.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Route {
    pub to: Position,
    pub start: f64,
    pub life: f64,
    pub speed: f64,
}

/// Population limits and spawn cooldowns.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EffectLimits {
    pub max_bursts: usize,
    pub burst_cooldown: f64,
    pub max_routes: usize,
    pub route_cooldown: f64,
}

/// Live bursts and dynamic routes.
///
/// Caps are checked before each spawn and nothing is evicted to make room.
#[derive(Clone, Debug)]
pub struct Effects {
    limits: EffectLimits,
    bursts: Vec<Burst>,
    routes: Vec<Route>,
    last_burst: f64,
    last_route: f64,
}

impl Effects {
    pub fn new(limits: EffectLimits) -> Self {
        Self {
            limits,
            bursts: Vec::new(),
            routes: Vec::new(),
            last_burst: 0.0,
            last_route: 0.0,
        }
    }

    pub fn bursts(&self) -> &[Burst] {
        &self.bursts
    }

    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    /// Maybe spawn a burst at a random dot, then drop bursts older than their life.
    ///
    /// The cooldown restarts even when there is no dot to burst from.
    pub fn update_bursts(&mut self, t: f64, dots: &[Dot], rng: &mut Rng64) {
        if t - self.last_burst > self.limits.burst_cooldown
            && self.bursts.len() < self.limits.max_bursts
        {
            self.last_burst = t;
            if let Some(dot) = rng.index(dots.len()).map(|i| dots[i]) {
                self.bursts.push(Burst {
                    origin: [dot.lng, dot.lat],
                    start: t,
                    hue: ((dot.lng + 180.0) / 360.0 * 300.0).rem_euclid(300.0),
                    speed: rng.range(26.0, 38.0),
                    life: rng.range(1.8, 2.6),
                });
            }
        }
        self.bursts.retain(|b| t - b.start <= b.life);
    }

    /// Maybe spawn a route to a random dot, then drop expired routes.
    pub fn update_routes(&mut self, t: f64, dots: &[Dot], rng: &mut Rng64) {
        if t - self.last_route > self.limits.route_cooldown
            && self.routes.len() < self.limits.max_routes
            && let Some(i) = rng.index(dots.len())
        {
            self.last_route = t;
            self.routes.push(Route {
                to: [dots[i].lng, dots[i].lat],
                start: t,
                life: rng.range(10.0, 16.0),
                speed: rng.range(0.18, 0.34),
            });
        }
        self.routes.retain(|r| t - r.start <= r.life);
    }

    pub fn clear(&mut self) {
        self.bursts.clear();
        self.routes.clear();
    }
}

#[cfg(test)]
#[path = "../../../tests/unit/widgets/globe_effects.rs"]
mod tests;
