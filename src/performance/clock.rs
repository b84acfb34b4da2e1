//! Monotonic frame clock.

use std::time::Instant;

/// Time values for one frame, in seconds
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FrameTime {
    pub elapsed: f64,
    pub delta: f64,
}

/// Seconds since creation. The previous reading is kept only to derive a
/// delta; there is no pause or reset.
#[derive(Debug, Clone)]
pub struct FrameClock {
    start: Instant,
    previous: f64,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::starting_at(Instant::now())
    }

    pub fn starting_at(start: Instant) -> Self {
        Self {
            start,
            previous: 0.0,
        }
    }

    pub fn elapsed(&self) -> f64 {
        self.elapsed_at(Instant::now())
    }

    /// Seconds between creation and `now`; zero for instants before creation.
    pub fn elapsed_at(&self, now: Instant) -> f64 {
        now.saturating_duration_since(self.start).as_secs_f64()
    }

    pub fn advance(&mut self) -> FrameTime {
        self.advance_to(Instant::now())
    }

    /// Samples the clock at `now` and returns elapsed time plus the delta
    /// since the previous sample.
    pub fn advance_to(&mut self, now: Instant) -> FrameTime {
        let elapsed = self.elapsed_at(now).max(self.previous);
        let delta = elapsed - self.previous;
        self.previous = elapsed;
        FrameTime { elapsed, delta }
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_elapsed_and_delta() {
        let start = Instant::now();
        let mut clock = FrameClock::starting_at(start);

        let first = clock.advance_to(start + Duration::from_millis(16));
        assert!((first.elapsed - 0.016).abs() < 1e-9);
        assert!((first.delta - 0.016).abs() < 1e-9);

        let second = clock.advance_to(start + Duration::from_millis(40));
        assert!((second.elapsed - 0.040).abs() < 1e-9);
        assert!((second.delta - 0.024).abs() < 1e-9);
    }

    #[test]
    fn test_never_goes_backwards() {
        let start = Instant::now();
        let mut clock = FrameClock::starting_at(start);
        clock.advance_to(start + Duration::from_secs(2));
        let stale = clock.advance_to(start + Duration::from_secs(1));
        assert_eq!(stale.elapsed, 2.0);
        assert_eq!(stale.delta, 0.0);
        assert!(clock.elapsed() >= 0.0);
    }
}
