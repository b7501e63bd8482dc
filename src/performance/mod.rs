//! # Frame Rate Measurement
//!
//! Rolling-window frame rate for the status display.
//!
//! [`FrameClock`] keeps the timestamps of the last N ticks in a ring. Each
//! sample compares the current time with the timestamp it overwrites, which
//! is N samples old, so the reported rate is smoothed over the whole window.
//!
//! ## Usage
//!
//! ```rust
//! use linetrails::performance::FrameClock;
//!
//! let mut clock = FrameClock::new();
//!
//! // Once per tick
//! let rate = clock.sample();
//! println!("FPS: {}", rate);
//! ```

use std::fmt;
use std::time::Instant;

/// Number of timestamps kept by default
pub const DEFAULT_WINDOW: usize = 60;

/// Result of a frame rate sample
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FrameRate {
    /// Frames per second over the window
    Measured(f64),
    /// No time passed across the window, so there is no finite rate
    Unmeasurable,
}

impl FrameRate {
    pub fn fps(&self) -> Option<f64> {
        match self {
            FrameRate::Measured(fps) => Some(*fps),
            FrameRate::Unmeasurable => None,
        }
    }
}

impl fmt::Display for FrameRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FrameRate::Measured(fps) => write!(f, "{:.2}", fps),
            FrameRate::Unmeasurable => f.write_str("???"),
        }
    }
}

/// Ring buffer of tick timestamps
#[derive(Debug, Clone)]
pub struct FrameClock {
    times: Vec<Instant>,
    index: usize,
    last: FrameRate,
}

impl FrameClock {
    /// Create a clock with the default 60-sample window starting now
    pub fn new() -> Self {
        Self::starting_at(DEFAULT_WINDOW, Instant::now())
    }

    /// Create a clock whose every slot holds `start`
    ///
    /// # Panics
    ///
    /// Panics if `window` is zero.
    pub fn starting_at(window: usize, start: Instant) -> Self {
        assert!(window > 0, "frame clock window must hold at least one sample");
        Self {
            times: vec![start; window],
            index: 0,
            last: FrameRate::Unmeasurable,
        }
    }

    pub fn window(&self) -> usize {
        self.times.len()
    }

    /// Record a tick now
    pub fn sample(&mut self) -> FrameRate {
        self.sample_at(Instant::now())
    }

    /// Record a tick at `now`
    pub fn sample_at(&mut self, now: Instant) -> FrameRate {
        self.index = (self.index + 1) % self.times.len();
        let previous = std::mem::replace(&mut self.times[self.index], now);

        let elapsed_ms = now.saturating_duration_since(previous).as_secs_f64() * 1000.0;
        self.last = if elapsed_ms == 0.0 {
            FrameRate::Unmeasurable
        } else {
            FrameRate::Measured(self.times.len() as f64 * 1000.0 / elapsed_ms)
        };
        self.last
    }

    /// The most recent sample
    pub fn last(&self) -> FrameRate {
        self.last
    }

    /// Render a compact FPS overlay (minimal screen space usage)
    pub fn render_overlay(&self, ui: &imgui::Ui) {
        let display_size = ui.io().display_size;

        ui.window("FPS")
            .size([120.0, 40.0], imgui::Condition::Always)
            .position([display_size[0] - 130.0, 10.0], imgui::Condition::Always)
            .no_decoration()
            .no_inputs()
            .bg_alpha(0.3)
            .build(|| {
                ui.text(format!("FPS: {}", self.last));
            });
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
    fn test_identical_timestamps_are_unmeasurable() {
        let start = Instant::now();
        let mut clock = FrameClock::starting_at(DEFAULT_WINDOW, start);
        assert_eq!(clock.sample_at(start), FrameRate::Unmeasurable);

        let mut single = FrameClock::starting_at(1, start);
        let later = start + Duration::from_millis(5);
        single.sample_at(later);
        assert_eq!(single.sample_at(later), FrameRate::Unmeasurable);
        assert_eq!(single.last().to_string(), "???");
    }

    #[test]
    fn test_rate_over_full_window() {
        let start = Instant::now();
        let mut clock = FrameClock::starting_at(DEFAULT_WINDOW, start);

        // One second after start, with the window still seeded
        let rate = clock.sample_at(start + Duration::from_secs(1));
        assert_eq!(rate, FrameRate::Measured(60.0));
        assert_eq!(rate.to_string(), "60.00");
    }

    #[test]
    fn test_steady_ticks() {
        let start = Instant::now();
        let mut clock = FrameClock::starting_at(DEFAULT_WINDOW, start);

        let mut rate = FrameRate::Unmeasurable;
        for k in 1..=120u64 {
            rate = clock.sample_at(start + Duration::from_millis(16 * k));
        }
        // 60 ticks of 16 ms span 960 ms
        let fps = rate.fps().unwrap();
        assert!((fps - 62.5).abs() < 1e-9);
        assert_eq!(rate.to_string(), "62.50");
    }

    #[test]
    fn test_window_wraps() {
        let start = Instant::now();
        let mut clock = FrameClock::starting_at(3, start);
        clock.sample_at(start + Duration::from_millis(10));
        clock.sample_at(start + Duration::from_millis(20));
        clock.sample_at(start + Duration::from_millis(30));
        // Overwrites the 10 ms sample: 3 frames in 30 ms
        let rate = clock.sample_at(start + Duration::from_millis(40));
        assert!((rate.fps().unwrap() - 100.0).abs() < 1e-9);
    }
}
