//! Tunable configuration for the trail simulation.
//!
//! [`TrailSettings`] is passed by value into a new simulation; changing any
//! tunable means building a new simulation from the updated settings.
//! [`Parameter`] is the named surface a UI uses to read and write them.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use crate::error::{Result, TrailError};

/// Upper bound for `history_length` and `line_count`.
pub const MAX_COUNT: f64 = 100_000.0;

/// Upper bound for `tick_interval_ms` (one hour).
pub const MAX_TICK_INTERVAL_MS: f64 = 3_600_000.0;

/// Simulation and rendering tunables.
#[derive(Clone, Debug, PartialEq)]
pub struct TrailSettings {
    /// Positions kept per line (ring buffer capacity)
    pub history_length: usize,
    /// Number of simulated lines
    pub line_count: usize,
    /// Half-extent of the containment cube around the camera
    pub max_dist: f64,
    /// Tick period in milliseconds
    pub tick_interval_ms: u64,
    /// Divisor from depth byte to stroke width
    pub width_factor: f64,
    /// Multiplier from perspective depth to depth byte
    pub z_factor: f64,
    /// Magnitude of every line's velocity at spawn
    pub line_speed: f64,
    /// Camera angular speed, in units of 0.0001 rad per tick
    pub camera_speed: f64,
    /// Trail fade fill alpha, in percent
    pub fill_alpha: f64,
    pub screen_width: u32,
    pub screen_height: u32,
}

impl Default for TrailSettings {
    fn default() -> Self {
        Self {
            history_length: 50,
            line_count: 50,
            max_dist: 400.0,
            tick_interval_ms: 16,
            width_factor: 50.0,
            z_factor: 200.0,
            line_speed: 20.0,
            camera_speed: 30.0,
            fill_alpha: 10.0,
            screen_width: 640,
            screen_height: 480,
        }
    }
}

impl TrailSettings {
    /// Creates a new settings builder
    pub fn builder() -> TrailSettingsBuilder {
        TrailSettingsBuilder::default()
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    /// Alpha of the translucent clear, in `[0, 1]`.
    pub fn fill_opacity(&self) -> f32 {
        (self.fill_alpha * 0.01) as f32
    }

    /// Checks every tunable against its valid range.
    pub fn validate(&self) -> Result<()> {
        for parameter in Parameter::ALL {
            parameter.validate(parameter.get(self))?;
        }
        if self.screen_width == 0 || self.screen_height == 0 {
            return Err(TrailError::InvalidParameter {
                parameter: "screen_size",
                value: 0.0,
                reason: "screen dimensions must be non-zero",
            });
        }
        Ok(())
    }
}

/// Builder for [`TrailSettings`]
#[derive(Default)]
pub struct TrailSettingsBuilder {
    settings: TrailSettings,
}

impl TrailSettingsBuilder {
    pub fn with_history_length(mut self, history_length: usize) -> Self {
        self.settings.history_length = history_length;
        self
    }

    pub fn with_line_count(mut self, line_count: usize) -> Self {
        self.settings.line_count = line_count;
        self
    }

    pub fn with_max_dist(mut self, max_dist: f64) -> Self {
        self.settings.max_dist = max_dist;
        self
    }

    pub fn with_tick_interval_ms(mut self, tick_interval_ms: u64) -> Self {
        self.settings.tick_interval_ms = tick_interval_ms;
        self
    }

    pub fn with_width_factor(mut self, width_factor: f64) -> Self {
        self.settings.width_factor = width_factor;
        self
    }

    pub fn with_z_factor(mut self, z_factor: f64) -> Self {
        self.settings.z_factor = z_factor;
        self
    }

    pub fn with_line_speed(mut self, line_speed: f64) -> Self {
        self.settings.line_speed = line_speed;
        self
    }

    pub fn with_camera_speed(mut self, camera_speed: f64) -> Self {
        self.settings.camera_speed = camera_speed;
        self
    }

    pub fn with_fill_alpha(mut self, fill_alpha: f64) -> Self {
        self.settings.fill_alpha = fill_alpha;
        self
    }

    pub fn with_screen_size(mut self, width: u32, height: u32) -> Self {
        self.settings.screen_width = width;
        self.settings.screen_height = height;
        self
    }

    /// Validates and returns the settings
    pub fn build(self) -> Result<TrailSettings> {
        self.settings.validate()?;
        Ok(self.settings)
    }
}

/// A named tunable of [`TrailSettings`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Parameter {
    HistoryLength,
    LineCount,
    MaxDist,
    TickInterval,
    WidthFactor,
    ZFactor,
    LineSpeed,
    CameraSpeed,
    FillAlpha,
}

impl Parameter {
    pub const ALL: [Parameter; 9] = [
        Parameter::HistoryLength,
        Parameter::LineCount,
        Parameter::MaxDist,
        Parameter::TickInterval,
        Parameter::WidthFactor,
        Parameter::ZFactor,
        Parameter::LineSpeed,
        Parameter::CameraSpeed,
        Parameter::FillAlpha,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Parameter::HistoryLength => "history_length",
            Parameter::LineCount => "line_count",
            Parameter::MaxDist => "max_dist",
            Parameter::TickInterval => "tick_interval_ms",
            Parameter::WidthFactor => "width_factor",
            Parameter::ZFactor => "z_factor",
            Parameter::LineSpeed => "line_speed",
            Parameter::CameraSpeed => "camera_speed",
            Parameter::FillAlpha => "fill_alpha",
        }
    }

    /// Whether the parameter only takes whole numbers.
    pub fn is_integer(self) -> bool {
        matches!(
            self,
            Parameter::HistoryLength | Parameter::LineCount | Parameter::TickInterval
        )
    }

    pub fn get(self, settings: &TrailSettings) -> f64 {
        match self {
            Parameter::HistoryLength => settings.history_length as f64,
            Parameter::LineCount => settings.line_count as f64,
            Parameter::MaxDist => settings.max_dist,
            Parameter::TickInterval => settings.tick_interval_ms as f64,
            Parameter::WidthFactor => settings.width_factor,
            Parameter::ZFactor => settings.z_factor,
            Parameter::LineSpeed => settings.line_speed,
            Parameter::CameraSpeed => settings.camera_speed,
            Parameter::FillAlpha => settings.fill_alpha,
        }
    }

    /// Validates `value` and writes it into `settings`.
    pub fn set(self, settings: &mut TrailSettings, value: f64) -> Result<()> {
        self.validate(value)?;
        match self {
            Parameter::HistoryLength => settings.history_length = value as usize,
            Parameter::LineCount => settings.line_count = value as usize,
            Parameter::MaxDist => settings.max_dist = value,
            Parameter::TickInterval => settings.tick_interval_ms = value as u64,
            Parameter::WidthFactor => settings.width_factor = value,
            Parameter::ZFactor => settings.z_factor = value,
            Parameter::LineSpeed => settings.line_speed = value,
            Parameter::CameraSpeed => settings.camera_speed = value,
            Parameter::FillAlpha => settings.fill_alpha = value,
        }
        Ok(())
    }

    pub fn validate(self, value: f64) -> Result<()> {
        let invalid = |reason| TrailError::InvalidParameter {
            parameter: self.name(),
            value,
            reason,
        };

        if !value.is_finite() {
            return Err(invalid("value must be finite"));
        }
        if self.is_integer() && value.fract() != 0.0 {
            return Err(invalid("value must be a whole number"));
        }

        match self {
            Parameter::HistoryLength | Parameter::TickInterval if value < 1.0 => {
                Err(invalid("value must be at least 1"))
            }
            Parameter::HistoryLength | Parameter::LineCount if value > MAX_COUNT => {
                Err(invalid("value must be at most 100000"))
            }
            Parameter::TickInterval if value > MAX_TICK_INTERVAL_MS => {
                Err(invalid("value must be at most 3600000"))
            }
            Parameter::LineCount | Parameter::LineSpeed if value < 0.0 => {
                Err(invalid("value must not be negative"))
            }
            Parameter::MaxDist | Parameter::WidthFactor if value <= 0.0 => {
                Err(invalid("value must be positive"))
            }
            Parameter::FillAlpha if !(0.0..=100.0).contains(&value) => {
                Err(invalid("value must be a percentage between 0 and 100"))
            }
            _ => Ok(()),
        }
    }
}

impl fmt::Display for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Parameter {
    type Err = TrailError;

    fn from_str(s: &str) -> Result<Self> {
        Parameter::ALL
            .into_iter()
            .find(|p| p.name() == s)
            .ok_or_else(|| TrailError::UnknownParameter(s.to_string()))
    }
}
