//! Easing curves and one-shot timelines.
//!
//! Two kinds of motion live in this crate and only one of them belongs
//! here: parallax is *scrubbed* (driven directly by scroll position, no
//! clock), while reveal transitions and navigation scrolls are one-shot
//! timed animations. `Timeline` is the latter: play once, optionally
//! after a delay, then done.

/// Easing function type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Easing {
    /// Linear interpolation.
    Linear,
    /// Hermite smoothstep - the browser's "smooth scroll" feel.
    #[default]
    SmoothInOut,
    /// Exponential ease-out (sharp snap to target).
    ExponentialOut,
    /// Instant (no animation).
    Instant,
}

impl Easing {
    /// Applies the easing function to a t value (0-1).
    #[must_use]
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);

        match self {
            Self::Linear => t,
            Self::SmoothInOut => t * t * (3.0 - 2.0 * t),
            Self::ExponentialOut => {
                // Sharp snap: 1 - 2^(-10t)
                if t >= 1.0 {
                    1.0
                } else {
                    1.0 - 2.0_f32.powf(-10.0 * t)
                }
            }
            Self::Instant => 1.0,
        }
    }
}

/// A one-shot animation timeline with a start delay.
///
/// Progress holds at 0 through the delay, then runs 0 to 1 over the
/// duration with the configured easing, then stays at 1.
#[derive(Debug, Clone)]
pub struct Timeline {
    /// Seconds to wait before motion starts.
    delay: f32,
    /// Seconds of motion after the delay.
    duration: f32,
    /// Easing curve applied to raw progress.
    easing: Easing,
    /// Total elapsed seconds since play began.
    elapsed: f32,
}

impl Timeline {
    /// Creates a timeline ready to play from zero.
    #[must_use]
    pub fn new(duration: f32, easing: Easing) -> Self {
        Self {
            delay: 0.0,
            duration,
            easing,
            elapsed: 0.0,
        }
    }

    /// Adds a start delay.
    #[must_use]
    pub fn with_delay(mut self, delay: f32) -> Self {
        self.delay = delay;
        self
    }

    /// Rewinds to the beginning.
    pub fn reset(&mut self) {
        self.elapsed = 0.0;
    }

    /// Advances the timeline.
    ///
    /// `dt` is delta time in seconds.
    pub fn advance(&mut self, dt: f32) {
        self.elapsed += dt;
    }

    /// Eased progress in `[0, 1]`.
    #[must_use]
    pub fn progress(&self) -> f32 {
        let active = self.elapsed - self.delay;
        if active <= 0.0 {
            return 0.0;
        }
        if self.duration <= 0.0 {
            return 1.0;
        }
        self.easing.apply((active / self.duration).min(1.0))
    }

    /// True once the delay and the full duration have elapsed.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.elapsed >= self.delay + self.duration
    }

    /// Interpolates between two values at the current progress.
    #[must_use]
    pub fn value_between(&self, from: f32, to: f32) -> f32 {
        from + (to - from) * self.progress()
    }
}
