use web_time::Instant;

/// Paint cadence tracking for one frame's paint loop.
///
/// The display refresh decides when ticks happen; this only measures
/// them, for the periodic diagnostics line.
pub struct FrameTiming {
    /// Last tick timestamp
    last_tick: Instant,
    /// Ticks since the loop started
    ticks: u64,
    /// Smoothed FPS using exponential moving average
    smoothed_fps: f32,
    /// Smoothing factor (lower = smoother, 0.0-1.0)
    smoothing: f32,
}

impl FrameTiming {
    /// Start measuring from now.
    #[must_use]
    pub fn new() -> Self {
        Self {
            last_tick: Instant::now(),
            ticks: 0,
            smoothed_fps: 60.0, // Start with reasonable default
            smoothing: 0.05,
        }
    }

    /// Record a paint tick.
    pub fn tick(&mut self) {
        let now = Instant::now();
        let elapsed = now.duration_since(self.last_tick);
        self.last_tick = now;
        self.ticks += 1;

        let frame_time = elapsed.as_secs_f32();
        if frame_time > 0.0 {
            let instant_fps = 1.0 / frame_time;
            self.smoothed_fps = self.smoothed_fps * (1.0 - self.smoothing)
                + instant_fps * self.smoothing;
        }
    }

    /// Number of ticks recorded.
    #[must_use]
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Whether this tick is one of every `every` ticks (for throttled
    /// logging). `every == 0` never matches.
    #[must_use]
    pub fn is_nth(&self, every: u64) -> bool {
        every != 0 && self.ticks % every == 0
    }

    /// Get the current FPS (smoothed)
    #[must_use]
    pub fn fps(&self) -> f32 {
        self.smoothed_fps
    }
}

impl Default for FrameTiming {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_ticks_and_throttles() {
        let mut timing = FrameTiming::new();
        for _ in 0..6 {
            timing.tick();
        }
        assert_eq!(timing.ticks(), 6);
        assert!(timing.is_nth(3));
        assert!(!timing.is_nth(4));
        assert!(!timing.is_nth(0));
        assert!(timing.fps() > 0.0);
    }
}
