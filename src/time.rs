//! Frame timing.
//!
//! The field itself is frame-stepped (velocities are per frame, not per
//! second), so timing is only used for reporting: frame count, the last
//! frame interval and a periodically refreshed FPS estimate.

use std::time::{Duration, Instant};

/// Frame counter with a rolling FPS estimate.
#[derive(Debug, Clone)]
pub struct FrameClock {
    /// When the clock was created or last reset.
    start: Instant,
    /// When the last frame was ticked.
    last_frame: Instant,
    /// Interval between the last two ticks, in seconds.
    delta_secs: f32,
    /// Total ticks since start.
    frame_count: u64,
    /// FPS over the last completed window.
    fps: f32,
    /// Frame count at the start of the current window.
    window_frames: u64,
    /// Start of the current window.
    window_start: Instant,
    /// Length of an FPS window.
    window: Duration,
}

impl FrameClock {
    /// A clock starting now, refreshing FPS every 500 ms.
    pub fn new() -> Self {
        Self::with_window(Duration::from_millis(500))
    }

    /// A clock refreshing FPS every `window`.
    pub fn with_window(window: Duration) -> Self {
        let now = Instant::now();
        Self {
            start: now,
            last_frame: now,
            delta_secs: 0.0,
            frame_count: 0,
            fps: 0.0,
            window_frames: 0,
            window_start: now,
            window,
        }
    }

    /// Record one frame. Returns `true` when the FPS estimate was refreshed.
    pub fn tick(&mut self) -> bool {
        self.tick_at(Instant::now())
    }

    fn tick_at(&mut self, now: Instant) -> bool {
        self.delta_secs = now.duration_since(self.last_frame).as_secs_f32();
        self.last_frame = now;
        self.frame_count += 1;

        let since = now.duration_since(self.window_start);
        if since.is_zero() || since < self.window {
            return false;
        }
        let frames = self.frame_count - self.window_frames;
        self.fps = frames as f32 / since.as_secs_f32();
        self.window_frames = self.frame_count;
        self.window_start = now;
        true
    }

    /// Total frames ticked.
    #[inline]
    pub fn frame(&self) -> u64 {
        self.frame_count
    }

    /// Seconds between the last two frames.
    #[inline]
    pub fn delta(&self) -> f32 {
        self.delta_secs
    }

    /// Frames per second over the last completed window.
    #[inline]
    pub fn fps(&self) -> f32 {
        self.fps
    }

    /// Time since the clock started.
    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    /// Start over from now.
    pub fn reset(&mut self) {
        *self = Self::with_window(self.window);
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}
