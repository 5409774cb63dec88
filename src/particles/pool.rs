use crate::foundation::core::Rect;
use crate::foundation::math::Rng64;

/// One moving dot. `progress` counts logical steps since spawn; `life` is the step budget.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Particle {
    pub x: f64,
    pub y: f64,
    pub vx: f64,
    pub vy: f64,
    pub life: f64,
    pub progress: f64,
    pub alpha: f64,
    pub radius: f64,
}

impl Particle {
    /// Remaining-life multiplier in `[0, 1]`.
    pub fn falloff(&self) -> f64 {
        if self.life <= 0.0 {
            return 0.0;
        }
        (1.0 - self.progress / self.life).clamp(0.0, 1.0)
    }

    /// Alpha actually drawn this frame.
    pub fn visible_alpha(&self) -> f64 {
        (self.alpha * self.falloff()).clamp(0.0, 1.0)
    }

    fn expired(&self, bounds: Rect, margin: f64) -> bool {
        self.progress >= self.life
            || self.x < bounds.x0 - margin
            || self.x > bounds.x1 + margin
            || self.y < bounds.y0 - margin
            || self.y > bounds.y1 + margin
    }
}

/// Fixed-capacity particle arena. Slots are overwritten in place on respawn.
#[derive(Clone, Debug, Default)]
pub struct ParticlePool {
    slots: Vec<Particle>,
}

impl ParticlePool {
    /// Fill `count` slots using `spawn`.
    pub fn populate<F>(count: usize, bounds: Rect, rng: &mut Rng64, mut spawn: F) -> Self
    where
        F: FnMut(&mut Rng64, Rect) -> Particle,
    {
        let slots = (0..count).map(|_| spawn(rng, bounds)).collect();
        Self { slots }
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn particles(&self) -> &[Particle] {
        &self.slots
    }

    /// Advance every particle one logical step.
    ///
    /// A particle whose life ran out, or that left `bounds` by more than `margin`, is replaced
    /// in the same step, so the pool never holds a dead slot between frames.
    pub fn step<F>(&mut self, bounds: Rect, margin: f64, dt: f64, rng: &mut Rng64, mut spawn: F)
    where
        F: FnMut(&mut Rng64, Rect) -> Particle,
    {
        for p in &mut self.slots {
            p.x += p.vx * dt;
            p.y += p.vy * dt;
            p.progress += 1.0;
            if p.expired(bounds, margin) {
                let mut fresh = spawn(rng, bounds);
                fresh.progress = 0.0;
                *p = fresh;
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/particles/pool.rs"]
mod tests;
