use std::time::Duration;

use crate::animation::ease::Ease;
use crate::animation::timing::phase_progress;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VaporPhase {
    /// The active text is fully shown.
    Hold,
    /// The active text is being erased while the next one shows through.
    Vapor,
    /// The new active text fades in.
    Fade,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CycleTimings {
    pub wait: Duration,
    pub vaporize: Duration,
    pub fade_in: Duration,
}

impl CycleTimings {
    fn of(&self, phase: VaporPhase) -> Duration {
        match phase {
            VaporPhase::Hold => self.wait,
            VaporPhase::Vapor => self.vaporize,
            VaporPhase::Fade => self.fade_in,
        }
    }

    fn total(&self) -> Duration {
        self.wait + self.vaporize + self.fade_in
    }
}

/// What to draw for the texts at one instant.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CycleFrame {
    /// Text being erased and the fraction of its width already hidden, rounded to 0.1 %.
    pub outgoing: Option<(usize, f64)>,
    /// Text shown on top and its opacity.
    pub incoming: (usize, f64),
}

/// Hold → Vapor → Fade → Hold over an ordered list of texts, driven by an external clock.
///
/// Phase boundaries are carried over exactly, so late frames can cross several phases without
/// the cycle drifting.
#[derive(Clone, Debug)]
pub struct VaporCycle {
    len: usize,
    index: usize,
    phase: VaporPhase,
    entered: Duration,
    timings: CycleTimings,
    fade_ease: Ease,
}

impl VaporCycle {
    pub fn new(len: usize, timings: CycleTimings, fade_ease: Ease, start: Duration) -> Self {
        Self {
            len: len.max(1),
            index: 0,
            phase: VaporPhase::Hold,
            entered: start,
            timings,
            fade_ease,
        }
    }

    pub fn phase(&self) -> VaporPhase {
        self.phase
    }

    /// Index of the active text.
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn next_index(&self) -> usize {
        (self.index + 1) % self.len
    }

    /// Progress through the current phase at `now`, in `[0, 1]`.
    pub fn progress(&self, now: Duration) -> f64 {
        phase_progress(now.saturating_sub(self.entered), self.timings.of(self.phase))
    }

    /// Move the state machine forward to `now`.
    pub fn advance(&mut self, now: Duration) {
        let total = self.timings.total();
        if total.is_zero() {
            // Degenerate timings: every phase ends as it begins.
            return;
        }

        // Skip whole cycles first; each one advances the index once.
        let behind = now.saturating_sub(self.entered);
        if behind > total {
            let whole = behind.as_nanos() / total.as_nanos();
            self.entered += Duration::from_nanos((total.as_nanos() * whole) as u64);
            self.index = ((self.index as u128 + whole) % self.len as u128) as usize;
        }

        loop {
            let end = self.entered + self.timings.of(self.phase);
            if now < end {
                break;
            }
            self.entered = end;
            self.phase = match self.phase {
                VaporPhase::Hold => VaporPhase::Vapor,
                VaporPhase::Vapor => {
                    self.index = self.next_index();
                    VaporPhase::Fade
                }
                VaporPhase::Fade => VaporPhase::Hold,
            };
            tracing::debug!(phase = ?self.phase, index = self.index, "vapor phase");
        }
    }

    pub fn frame(&self, now: Duration) -> CycleFrame {
        let p = self.progress(now);
        match self.phase {
            VaporPhase::Hold => CycleFrame {
                outgoing: None,
                incoming: (self.index, 1.0),
            },
            VaporPhase::Vapor => CycleFrame {
                outgoing: Some((self.index, (p * 1000.0).round() / 1000.0)),
                incoming: (self.next_index(), (0.15 + 0.85 * p).min(1.0)),
            },
            VaporPhase::Fade => CycleFrame {
                outgoing: None,
                incoming: (self.index, self.fade_ease.apply(p)),
            },
        }
    }
}

#[cfg(test)]
#[path = "../../../tests/unit/widgets/vapor_cycle.rs"]
mod tests;
