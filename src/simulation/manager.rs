//! Simulation manager for linetrails
//!
//! Owns the configuration, the active strategies, the running simulation
//! and everything derived from them. It is the only thing a UI talks to:
//! parameter edits and strategy selections go through here and are applied
//! strictly between ticks.

use std::time::Instant;

use log::{debug, info};
use rand::{rngs::StdRng, SeedableRng};

use super::settings::{Parameter, TrailSettings};
use super::ticker::Ticker;
use super::trails::TrailSimulation;
use crate::error::Result;
use crate::gfx::depth_effect::DepthEffect;
use crate::gfx::palette::{ColorTable, Palette};
use crate::gfx::projection::Projector;
use crate::gfx::surface::RenderSurface;
use crate::gfx::trail_renderer::{FrameStats, Strategies, TrailRenderer};
use crate::performance::{FrameClock, FrameRate};

/// Drives the trail simulation and its rendering
pub struct SimulationManager {
    settings: TrailSettings,
    strategies: Strategies,
    simulation: TrailSimulation,
    renderer: TrailRenderer,
    color_table: ColorTable,
    frame_clock: FrameClock,
    ticker: Ticker,
    rng: StdRng,
    is_paused: bool,
    last_stats: FrameStats,
}

impl SimulationManager {
    /// Create a manager with default strategies and start ticking
    pub fn new(settings: TrailSettings) -> Result<Self> {
        Self::with_strategies(settings, Strategies::default())
    }

    pub fn with_strategies(settings: TrailSettings, strategies: Strategies) -> Result<Self> {
        Self::from_rng(settings, strategies, StdRng::from_os_rng())
    }

    /// Create a manager whose randomness is fully determined by `seed`
    pub fn seeded(settings: TrailSettings, strategies: Strategies, seed: u64) -> Result<Self> {
        Self::from_rng(settings, strategies, StdRng::seed_from_u64(seed))
    }

    fn from_rng(settings: TrailSettings, strategies: Strategies, mut rng: StdRng) -> Result<Self> {
        settings.validate()?;

        let now = Instant::now();
        let simulation = TrailSimulation::new(&settings, StdRng::from_rng(&mut rng));
        let color_table = ColorTable::build(strategies.palette, &mut rng);
        let mut ticker = Ticker::new(settings.tick_interval());
        ticker.start(now);

        let manager = Self {
            renderer: TrailRenderer::new(&settings),
            frame_clock: FrameClock::starting_at(crate::performance::DEFAULT_WINDOW, now),
            settings,
            strategies,
            simulation,
            color_table,
            ticker,
            rng,
            is_paused: false,
            last_stats: FrameStats::default(),
        };
        info!("init done");
        Ok(manager)
    }

    pub fn settings(&self) -> &TrailSettings {
        &self.settings
    }

    pub fn strategies(&self) -> &Strategies {
        &self.strategies
    }

    pub fn simulation(&self) -> &TrailSimulation {
        &self.simulation
    }

    pub fn color_table(&self) -> &ColorTable {
        &self.color_table
    }

    pub fn frame_clock(&self) -> &FrameClock {
        &self.frame_clock
    }

    pub fn frame_rate(&self) -> FrameRate {
        self.frame_clock.last()
    }

    /// FPS formatted for display
    pub fn fps_text(&self) -> String {
        self.frame_clock.last().to_string()
    }

    pub fn last_stats(&self) -> FrameStats {
        self.last_stats
    }

    pub fn parameter(&self, parameter: Parameter) -> f64 {
        parameter.get(&self.settings)
    }

    /// Change a tunable and rebuild the simulation
    ///
    /// Returns `Ok(false)` without touching anything when the value is
    /// unchanged. Invalid values are rejected before any state changes.
    pub fn set_parameter(&mut self, parameter: Parameter, value: f64) -> Result<bool> {
        let old = parameter.get(&self.settings);
        if old == value {
            return Ok(false);
        }

        let mut settings = self.settings.clone();
        parameter.set(&mut settings, value)?;
        settings.validate()?;

        info!("{}: {} => {}", parameter, old, value);
        self.settings = settings;
        self.reinitialize();
        Ok(true)
    }

    /// [`set_parameter`](Self::set_parameter) by parameter name
    pub fn set_parameter_by_name(&mut self, name: &str, value: f64) -> Result<bool> {
        self.set_parameter(name.parse()?, value)
    }

    pub fn select_projector(&mut self, projector: Projector) {
        if self.strategies.projector != projector {
            debug!("projector: {} => {}", self.strategies.projector, projector);
            self.strategies.projector = projector;
        }
    }

    pub fn select_depth_effect(&mut self, depth_effect: DepthEffect) {
        if self.strategies.depth_effect != depth_effect {
            debug!("depth effect: {} => {}", self.strategies.depth_effect, depth_effect);
            self.strategies.depth_effect = depth_effect;
        }
    }

    /// Switch palette and rebuild the colour table
    ///
    /// The table is rebuilt even when re-selecting the current palette so
    /// that `chaos` draws fresh colours.
    pub fn select_palette(&mut self, palette: Palette) {
        debug!("palette: {} => {}", self.strategies.palette, palette);
        self.strategies.palette = palette;
        self.color_table = ColorTable::build(palette, &mut self.rng);
    }

    /// Throw away the simulation and build a fresh one from the settings
    ///
    /// Cancels the pending tick first, so no tick ever sees a
    /// half-updated configuration.
    pub fn reinitialize(&mut self) {
        self.ticker.stop();

        let now = Instant::now();
        self.simulation = TrailSimulation::new(&self.settings, StdRng::from_rng(&mut self.rng));
        self.renderer = TrailRenderer::new(&self.settings);
        self.color_table = ColorTable::build(self.strategies.palette, &mut self.rng);
        self.frame_clock = FrameClock::starting_at(crate::performance::DEFAULT_WINDOW, now);
        self.ticker = Ticker::new(self.settings.tick_interval());
        self.ticker.start(now);

        debug!(
            "reinitialized: {} lines x {} history, tick {} ms",
            self.settings.line_count, self.settings.history_length, self.settings.tick_interval_ms
        );
    }

    /// Run one tick: sample the clock, advance, draw
    pub fn tick<S: RenderSurface + ?Sized>(&mut self, surface: &mut S) -> FrameStats {
        self.frame_clock.sample();
        self.simulation.advance();
        self.last_stats =
            self.renderer
                .draw(&self.simulation, &self.strategies, &self.color_table, surface);
        self.last_stats
    }

    /// Run a tick if one is due at `now`
    ///
    /// Returns whether a tick ran. The next tick is scheduled one period
    /// after this one finished.
    pub fn poll<S: RenderSurface + ?Sized>(&mut self, now: Instant, surface: &mut S) -> bool {
        if self.is_paused || !self.ticker.is_due(now) {
            return false;
        }
        self.tick(surface);
        self.ticker.reschedule(Instant::now());
        true
    }

    /// When the next tick should run, if ticking
    pub fn next_deadline(&self) -> Option<Instant> {
        if self.is_paused {
            None
        } else {
            self.ticker.next_deadline()
        }
    }

    pub fn is_paused(&self) -> bool {
        self.is_paused
    }

    /// Set pause state
    ///
    /// Resuming schedules the next tick one period from now.
    pub fn set_paused(&mut self, paused: bool) {
        if self.is_paused == paused {
            return;
        }
        self.is_paused = paused;
        if paused {
            self.ticker.stop();
        } else {
            self.ticker.start(Instant::now());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TrailError;
    use crate::gfx::canvas::PixelCanvas;
    use std::time::Duration;

    fn manager() -> SimulationManager {
        let settings = TrailSettings::builder()
            .with_line_count(5)
            .with_history_length(10)
            .build()
            .unwrap();
        SimulationManager::seeded(settings, Strategies::default(), 17).unwrap()
    }

    #[test]
    fn test_new_builds_everything_from_settings() {
        let manager = manager();
        assert_eq!(manager.simulation().lines().len(), 5);
        assert_eq!(manager.color_table().palette(), Palette::Alpha);
        assert!(manager.next_deadline().is_some());
        assert_eq!(manager.fps_text(), "???");
    }

    #[test]
    fn test_invalid_settings_are_rejected() {
        let settings = TrailSettings {
            max_dist: -1.0,
            ..TrailSettings::default()
        };
        assert!(SimulationManager::new(settings).is_err());
    }

    #[test]
    fn test_set_parameter_reinitializes() {
        let mut manager = manager();
        let mut canvas = PixelCanvas::new(640, 480).unwrap();
        manager.tick(&mut canvas);
        manager.tick(&mut canvas);
        assert_eq!(manager.simulation().tick_count(), 2);

        assert!(manager.set_parameter(Parameter::LineCount, 8.0).unwrap());
        assert_eq!(manager.simulation().lines().len(), 8);
        assert_eq!(manager.simulation().tick_count(), 0);
        assert_eq!(manager.parameter(Parameter::LineCount), 8.0);
    }

    #[test]
    fn test_unchanged_parameter_is_a_no_op() {
        let mut manager = manager();
        let mut canvas = PixelCanvas::new(640, 480).unwrap();
        manager.tick(&mut canvas);

        assert!(!manager.set_parameter(Parameter::LineCount, 5.0).unwrap());
        assert_eq!(manager.simulation().tick_count(), 1);
    }

    #[test]
    fn test_invalid_parameter_keeps_state() {
        let mut manager = manager();
        let before = manager.settings().clone();

        assert!(matches!(
            manager.set_parameter(Parameter::FillAlpha, 250.0),
            Err(TrailError::InvalidParameter { .. })
        ));
        assert!(manager.set_parameter_by_name("NUM_HISTS", 3.0).is_err());
        assert_eq!(manager.settings(), &before);
    }

    #[test]
    fn test_oversized_counts_keep_state() {
        let mut manager = manager();
        let before = manager.settings().clone();

        assert!(manager.set_parameter(Parameter::HistoryLength, 1e19).is_err());
        assert!(manager.set_parameter(Parameter::LineCount, 1e12).is_err());
        assert_eq!(manager.settings(), &before);
        assert_eq!(manager.simulation().lines().len(), 5);
    }

    #[test]
    fn test_set_parameter_by_name() {
        let mut manager = manager();
        assert!(manager.set_parameter_by_name("history_length", 4.0).unwrap());
        assert!(manager
            .simulation()
            .lines()
            .iter()
            .all(|line| line.capacity() == 4));
    }

    #[test]
    fn test_palette_selection_rebuilds_table() {
        let mut manager = manager();
        manager.select_palette(Palette::Gray);
        assert_eq!(manager.strategies().palette, Palette::Gray);
        assert_eq!(manager.color_table().palette(), Palette::Gray);
        assert_eq!(manager.color_table().get(77).r, 77);
    }

    #[test]
    fn test_strategy_selection_keeps_simulation() {
        let mut manager = manager();
        let mut canvas = PixelCanvas::new(640, 480).unwrap();
        manager.tick(&mut canvas);

        manager.select_projector("xy".parse().unwrap());
        manager.select_depth_effect(DepthEffect::None);
        assert_eq!(manager.strategies().projector, Projector::Xy);
        assert_eq!(manager.strategies().depth_effect, DepthEffect::None);
        assert_eq!(manager.simulation().tick_count(), 1);
    }

    #[test]
    fn test_tick_draws_trails() {
        let mut manager = manager();
        let mut canvas = PixelCanvas::new(640, 480).unwrap();
        for _ in 0..5 {
            manager.tick(&mut canvas);
        }
        let stats = manager.last_stats();
        assert_eq!(stats.segments_drawn + stats.segments_skipped, 5 * 9);
    }

    #[test]
    fn test_poll_respects_schedule_and_pause() {
        let settings = TrailSettings::builder()
            .with_line_count(2)
            .with_tick_interval_ms(10_000)
            .build()
            .unwrap();
        let mut manager = SimulationManager::seeded(settings, Strategies::default(), 3).unwrap();
        let mut canvas = PixelCanvas::new(640, 480).unwrap();

        assert!(!manager.poll(Instant::now(), &mut canvas));
        assert!(manager.poll(Instant::now() + Duration::from_secs(11), &mut canvas));
        assert_eq!(manager.simulation().tick_count(), 1);

        manager.set_paused(true);
        assert!(manager.next_deadline().is_none());
        assert!(!manager.poll(Instant::now() + Duration::from_secs(60), &mut canvas));

        manager.set_paused(false);
        assert!(manager.next_deadline().is_some());
    }

    #[test]
    fn test_seeded_managers_agree() {
        let a = manager();
        let b = manager();
        assert_eq!(a.simulation().lines(), b.simulation().lines());
    }
}
