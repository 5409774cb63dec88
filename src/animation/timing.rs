use std::time::Duration;

/// Convert configured seconds into a [`Duration`], rounded to whole microseconds.
///
/// Rounding keeps phase boundaries exact when durations are summed (`0.8 s + 2 s == 2.8 s`).
pub fn secs(s: f64) -> Duration {
    if !s.is_finite() || s <= 0.0 {
        return Duration::ZERO;
    }
    Duration::from_micros((s * 1_000_000.0).round() as u64)
}

/// Fraction of `duration` covered by `elapsed`, clamped to `[0, 1]`.
///
/// A zero-length phase is complete immediately.
pub fn phase_progress(elapsed: Duration, duration: Duration) -> f64 {
    if duration.is_zero() {
        return 1.0;
    }
    (elapsed.as_secs_f64() / duration.as_secs_f64()).clamp(0.0, 1.0)
}

/// Caps how often a frame is actually rendered.
#[derive(Debug, Clone, Copy)]
pub struct FrameThrottle {
    budget: Duration,
    last: Option<Duration>,
}

impl FrameThrottle {
    pub fn new(max_fps: f64) -> Self {
        let budget = if max_fps.is_finite() && max_fps > 0.0 {
            Duration::from_secs_f64(1.0 / max_fps)
        } else {
            Duration::ZERO
        };
        Self { budget, last: None }
    }

    pub fn budget(&self) -> Duration {
        self.budget
    }

    /// Returns `true` (and records `now`) when a frame should run.
    pub fn admit(&mut self, now: Duration) -> bool {
        if let Some(last) = self.last
            && now.saturating_sub(last) < self.budget
        {
            return false;
        }
        self.last = Some(now);
        true
    }
}

/// Converts wall-clock deltas into whole fixed-rate logical steps.
///
/// Simulations advanced this way move at the same speed on any refresh rate. Backlog beyond
/// `max_steps` is dropped so a stalled tab does not fast-forward on resume.
#[derive(Debug, Clone, Copy)]
pub struct FixedStep {
    step: Duration,
    max_steps: u32,
    last: Option<Duration>,
    carry: Duration,
}

impl FixedStep {
    pub fn new(hz: f64, max_steps: u32) -> Self {
        let step = if hz.is_finite() && hz > 0.0 {
            Duration::from_secs_f64(1.0 / hz)
        } else {
            Duration::from_millis(16)
        };
        Self {
            step,
            max_steps: max_steps.max(1),
            last: None,
            carry: Duration::ZERO,
        }
    }

    pub fn step(&self) -> Duration {
        self.step
    }

    /// Number of logical steps to run for a frame at `now`. The first call runs one step.
    pub fn steps(&mut self, now: Duration) -> u32 {
        let Some(last) = self.last else {
            self.last = Some(now);
            return 1;
        };
        self.last = Some(now);
        let mut acc = self.carry + now.saturating_sub(last);
        let mut n = 0u32;
        while acc >= self.step && n < self.max_steps {
            acc -= self.step;
            n += 1;
        }
        self.carry = if n == self.max_steps {
            Duration::ZERO
        } else {
            acc
        };
        n
    }

    /// Forget the previous timestamp, e.g. after the simulation was paused.
    pub fn reset(&mut self) {
        self.last = None;
        self.carry = Duration::ZERO;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/timing.rs"]
mod tests;
