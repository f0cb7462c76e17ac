//! Match clock
//!
//! Every time-gated rule (cooldowns, regeneration, guard expiry, CPU decision
//! throttling) reads the time through [`Clock`]. The bout owns a
//! [`FrameClock`] that only advances while the match is running, so pausing
//! freezes all of them.

/// Source of elapsed match time in seconds.
pub trait Clock {
    fn now(&self) -> f64;
}

/// A clock advanced explicitly by frame deltas.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FrameClock {
    elapsed: f64,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start at a given time (useful for tests that need a non-zero origin).
    pub fn starting_at(elapsed: f64) -> Self {
        Self { elapsed }
    }

    /// Move time forward. Negative deltas are ignored.
    pub fn advance(&mut self, delta_secs: f64) {
        if delta_secs > 0.0 {
            self.elapsed += delta_secs;
        }
    }
}

impl Clock for FrameClock {
    fn now(&self) -> f64 {
        self.elapsed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_clock_accumulates() {
        let mut clock = FrameClock::new();
        clock.advance(0.5);
        clock.advance(0.25);
        assert!((clock.now() - 0.75).abs() < 1e-9);
    }

    #[test]
    fn test_frame_clock_ignores_negative_delta() {
        let mut clock = FrameClock::starting_at(2.0);
        clock.advance(-1.0);
        assert_eq!(clock.now(), 2.0);
    }
}
