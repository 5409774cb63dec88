use crate::config::Direction;
use crate::foundation::core::Rect;
use crate::foundation::math::Rng64;
use crate::particles::pool::Particle;

/// Distance outside the surface at which a drifting particle is recycled.
pub const RECYCLE_MARGIN: f64 = 20.0;
/// Logical step length; velocities are in px per second.
pub const STEP_DT: f64 = 0.016;

pub fn particle_count(density: f64) -> usize {
    let n = if density.is_finite() {
        (density * 32.0).floor().max(0.0) as usize
    } else {
        0
    };
    n.max(8)
}

/// A particle entering from the leading edge for `direction`.
pub fn spawn(rng: &mut Rng64, bounds: Rect, direction: Direction, spread: f64) -> Particle {
    let dir = direction.factor();
    Particle {
        x: match direction {
            Direction::LeftToRight => bounds.x0 - 10.0,
            Direction::RightToLeft => bounds.x1 + 10.0,
        },
        y: bounds.y0 + rng.next_f64_01() * bounds.height(),
        vx: dir * rng.range(0.4, 1.6) * spread,
        vy: (rng.next_f64_01() - 0.5) * spread * 0.3,
        life: rng.range(200.0, 400.0),
        progress: 0.0,
        alpha: rng.range(0.15, 0.40),
        radius: rng.range(1.5, 4.0),
    }
}

#[cfg(test)]
#[path = "../../../tests/unit/widgets/vapor_field.rs"]
mod tests;
