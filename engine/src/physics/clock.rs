//! Frame timing
//!
//! Measures wall-clock time between physics updates, applies the timescale,
//! and keeps a frames-per-second counter published once per one-second
//! window.

use std::time::Instant;

/// Wall-clock frame timer with an FPS counter.
#[derive(Debug, Clone, Default)]
pub struct FrameClock {
    last_tick: Option<Instant>,
    window_elapsed: f64,
    window_frames: u32,
    fps: u32,
}

impl FrameClock {
    /// Creates a clock that has not ticked yet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks a new frame and returns the simulation delta in seconds.
    ///
    /// The first tick returns 0. The returned delta is the wall-clock delta
    /// multiplied by `timescale`; the FPS window always uses unscaled time.
    pub fn tick(&mut self, timescale: f64) -> f64 {
        let now = Instant::now();
        let elapsed = match self.last_tick {
            Some(last) => now.duration_since(last).as_secs_f64(),
            None => 0.0,
        };
        self.last_tick = Some(now);
        self.record_frame(elapsed);
        elapsed * timescale
    }

    /// Feeds one frame of `elapsed` wall-clock seconds into the FPS window.
    pub fn record_frame(&mut self, elapsed: f64) {
        self.window_elapsed += elapsed;
        if self.window_elapsed > 1.0 {
            self.fps = self.window_frames;
            self.window_frames = 0;
            self.window_elapsed -= 1.0;
        }
        self.window_frames += 1;
    }

    /// Frames counted in the last completed one-second window.
    pub fn fps(&self) -> u32 {
        self.fps
    }

    /// Forgets the last tick so the next delta is 0 (e.g. after a long pause).
    pub fn reset(&mut self) {
        self.last_tick = None;
    }
}
