//! Frame pacing and FPS accounting for the render loop.

use std::time::{Duration, Instant};

/// Paces the render loop at a fixed target frame rate and counts observed
/// frames per second.
#[derive(Debug)]
pub struct FrameClock {
    /// Target time between frame starts.
    interval: Duration,
    /// Start of the current frame.
    frame_start: Instant,
    /// Start of the current one-second FPS window.
    window_start: Instant,
    /// Frames completed in the current window.
    frames: u32,
}

impl FrameClock {
    /// Create a clock targeting `frame_rate` frames per second.
    pub fn new(frame_rate: u32) -> Self {
        let now = Instant::now();
        Self {
            interval: Duration::from_secs(1) / frame_rate.max(1),
            frame_start: now,
            window_start: now,
            frames: 0,
        }
    }

    /// Target time between frames.
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Sleep out the remainder of the current frame interval.
    ///
    /// If the frame already ran longer than the interval this returns
    /// immediately; there is no negative sleep and no attempt to catch up.
    pub fn pace(&mut self) {
        if let Some(remaining) = self.interval.checked_sub(self.frame_start.elapsed()) {
            std::thread::sleep(remaining);
        }
        self.frame_start = Instant::now();
    }

    /// Record a completed frame. Returns the observed frame count once per
    /// elapsed real second.
    pub fn tick(&mut self) -> Option<u32> {
        self.frames += 1;
        if self.window_start.elapsed() >= Duration::from_secs(1) {
            let fps = self.frames;
            self.frames = 0;
            self.window_start = Instant::now();
            Some(fps)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pace_sleeps_full_interval_for_instant_frame() {
        let mut clock = FrameClock::new(50);
        let before = Instant::now();

        // No work done since construction: the whole 20ms interval remains.
        clock.pace();

        assert!(before.elapsed() >= Duration::from_millis(15));
    }

    #[test]
    fn test_pace_does_not_sleep_when_frame_overran() {
        let mut clock = FrameClock::new(50);

        // Simulate a frame that took longer than the interval.
        std::thread::sleep(Duration::from_millis(30));

        let before = Instant::now();
        clock.pace();
        assert!(before.elapsed() < Duration::from_millis(15));
    }

    #[test]
    fn test_tick_reports_once_per_second() {
        let mut clock = FrameClock::new(60);

        assert_eq!(clock.tick(), None);
        assert_eq!(clock.tick(), None);

        // Force the window to expire.
        clock.window_start = Instant::now() - Duration::from_secs(2);
        assert_eq!(clock.tick(), Some(3));

        // Counter restarts after reporting.
        assert_eq!(clock.tick(), None);
    }

    #[test]
    fn test_interval_matches_frame_rate() {
        assert_eq!(FrameClock::new(60).interval(), Duration::from_secs(1) / 60);
        // A zero rate is clamped rather than dividing by zero.
        assert_eq!(FrameClock::new(0).interval(), Duration::from_secs(1));
    }
}
