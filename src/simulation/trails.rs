//! The trail simulation: lines moving inside a cube that follows the camera.
//!
//! Every tick the camera advances first. Each line then writes its next
//! position into the following history slot, and each axis of that position
//! is reflected back inside the cube `|p - camera| <= max_dist`. A line whose
//! reflection does not converge within [`MAX_CORRECTIONS`] steps is replaced
//! by a fresh line spawned at the camera.

use rand::{rngs::StdRng, Rng};

use super::line::{Line, SPAWN_SPREAD};
use super::settings::TrailSettings;
use crate::gfx::camera::OrbitCamera;
use crate::gfx::vector::{Axis, Vector3, VectorOps};

/// Velocity additions allowed per axis per tick before a line is respawned.
pub const MAX_CORRECTIONS: usize = 10;

/// Owns the camera and the fixed-size set of lines.
pub struct TrailSimulation<R: Rng = StdRng> {
    camera: OrbitCamera,
    lines: Vec<Line>,
    max_dist: f64,
    spawn_spread: f64,
    line_speed: f64,
    history_length: usize,
    rng: R,
    tick_count: u64,
    respawn_count: u64,
}

impl<R: Rng> TrailSimulation<R> {
    /// Spawns `settings.line_count` lines around a fresh camera.
    pub fn new(settings: &TrailSettings, mut rng: R) -> Self {
        let camera = OrbitCamera::from_speed(settings.camera_speed);
        let center = camera.position();
        let spread = spawn_spread(settings.max_dist);
        let lines = (0..settings.line_count)
            .map(|_| {
                Line::spawn(
                    center,
                    spread,
                    settings.line_speed,
                    settings.history_length,
                    &mut rng,
                )
            })
            .collect();

        Self::from_parts(camera, lines, settings, rng)
    }

    /// Assembles a simulation from an explicit camera and line set.
    pub fn from_parts(
        camera: OrbitCamera,
        lines: Vec<Line>,
        settings: &TrailSettings,
        rng: R,
    ) -> Self {
        Self {
            camera,
            lines,
            max_dist: settings.max_dist,
            spawn_spread: spawn_spread(settings.max_dist),
            line_speed: settings.line_speed,
            history_length: settings.history_length,
            rng,
            tick_count: 0,
            respawn_count: 0,
        }
    }

    pub fn camera(&self) -> &OrbitCamera {
        &self.camera
    }

    pub fn camera_position(&self) -> Vector3 {
        self.camera.position()
    }

    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    pub fn max_dist(&self) -> f64 {
        self.max_dist
    }

    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    /// Lines replaced after failing containment since construction.
    pub fn respawn_count(&self) -> u64 {
        self.respawn_count
    }

    /// Advances the camera and every line by one tick.
    pub fn advance(&mut self) {
        self.camera.advance();
        let center = self.camera.position();

        for line in &mut self.lines {
            if !step_line(line, &center, self.max_dist) {
                *line = Line::spawn(
                    center,
                    self.spawn_spread,
                    self.line_speed,
                    self.history_length,
                    &mut self.rng,
                );
                self.respawn_count += 1;
            }
        }

        self.tick_count += 1;
    }
}

/// Spawn spread for a cube of half-width `max_dist`, so fresh lines start inside it.
fn spawn_spread(max_dist: f64) -> f64 {
    SPAWN_SPREAD.min(max_dist)
}

/// Moves `line` one step and contains it. Returns `false` if containment
/// failed and the line has to be respawned.
fn step_line(line: &mut Line, center: &Vector3, max_dist: f64) -> bool {
    let previous = line.current();
    let mut velocity = line.velocity;

    let next = line.advance();
    next.assign(&previous);
    next.add(&velocity);

    let contained = Axis::ALL
        .into_iter()
        .all(|axis| reflect(axis, next, &mut velocity, center, max_dist));

    line.velocity = velocity;
    contained
}

/// Reflects one axis of `position` back into `|p - center| <= max_dist`.
///
/// If the axis is outside, its velocity component is flipped and added to
/// the position until it is inside again, at most [`MAX_CORRECTIONS`] times.
/// Returns `false` if the position is still outside after that.
pub fn reflect(
    axis: Axis,
    position: &mut Vector3,
    velocity: &mut Vector3,
    center: &Vector3,
    max_dist: f64,
) -> bool {
    let c = axis.get(center);
    let outside = |p: f64| (p - c).abs() > max_dist;

    if !outside(axis.get(position)) {
        return true;
    }

    let v = axis.get_mut(velocity);
    *v = -*v;
    let v = *v;

    let p = axis.get_mut(position);
    for _ in 0..MAX_CORRECTIONS {
        *p += v;
        if !outside(*p) {
            return true;
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn still_camera() -> OrbitCamera {
        OrbitCamera::new(0.0)
    }

    fn single_line_sim(position: Vector3, velocity: Vector3, max_dist: f64) -> TrailSimulation {
        let settings = TrailSettings::builder()
            .with_line_count(1)
            .with_history_length(5)
            .with_max_dist(max_dist)
            .build()
            .unwrap();
        let line = Line::new(position, velocity, settings.history_length);
        TrailSimulation::from_parts(
            still_camera(),
            vec![line],
            &settings,
            StdRng::seed_from_u64(1),
        )
    }

    fn assert_contained(sim: &TrailSimulation) {
        let cp = sim.camera_position();
        for line in sim.lines() {
            let p = line.current();
            for axis in Axis::ALL {
                assert!(
                    (axis.get(&p) - axis.get(&cp)).abs() <= sim.max_dist(),
                    "{:?} escaped on {:?}",
                    p,
                    axis
                );
            }
        }
    }

    #[test]
    fn test_new_spawns_line_count_lines() {
        let settings = TrailSettings::default();
        let sim = TrailSimulation::new(&settings, StdRng::seed_from_u64(3));
        assert_eq!(sim.lines().len(), 50);
        assert!(sim.lines().iter().all(|l| l.capacity() == 50));
        assert_contained(&sim);
    }

    #[test]
    fn test_lines_stay_contained_or_respawn() {
        let settings = TrailSettings::builder()
            .with_line_count(20)
            .with_history_length(8)
            .build()
            .unwrap();
        let mut sim = TrailSimulation::new(&settings, StdRng::seed_from_u64(11));

        for _ in 0..2000 {
            sim.advance();
            assert_contained(&sim);
            assert_eq!(sim.lines().len(), 20);
            assert!(sim.lines().iter().all(|l| l.capacity() == 8));
        }
        assert_eq!(sim.tick_count(), 2000);
    }

    #[test]
    fn test_fast_lines_stay_contained_or_respawn() {
        let settings = TrailSettings::builder()
            .with_line_count(10)
            .with_max_dist(120.0)
            .with_line_speed(300.0)
            .with_camera_speed(500.0)
            .build()
            .unwrap();
        let mut sim = TrailSimulation::new(&settings, StdRng::seed_from_u64(5));

        for _ in 0..500 {
            sim.advance();
            assert_contained(&sim);
        }
    }

    #[test]
    fn test_respawns_stay_inside_small_cube() {
        let settings = TrailSettings::builder()
            .with_line_count(50)
            .with_max_dist(50.0)
            .with_line_speed(80.0)
            .build()
            .unwrap();
        let mut sim = TrailSimulation::new(&settings, StdRng::seed_from_u64(1));
        assert_contained(&sim);

        for _ in 0..200 {
            sim.advance();
            assert_contained(&sim);
        }
    }

    #[test]
    fn test_every_respawn_lands_inside_small_cube() {
        let settings = TrailSettings::builder()
            .with_line_count(40)
            .with_history_length(3)
            .with_max_dist(20.0)
            .build()
            .unwrap();
        let camera = still_camera();
        let far = camera.position() + Vector3::new(500.0, -500.0, 500.0);
        let lines = (0..40)
            .map(|_| Line::new(far, Vector3::new(0.0, 0.0, 0.0), 3))
            .collect();
        let mut sim =
            TrailSimulation::from_parts(camera, lines, &settings, StdRng::seed_from_u64(1));

        sim.advance();
        assert_eq!(sim.respawn_count(), 40);
        assert_contained(&sim);
    }

    #[test]
    fn test_respawns_stay_inside_cube_near_spawn_spread() {
        for max_dist in [SPAWN_SPREAD - 1.0, SPAWN_SPREAD, SPAWN_SPREAD + 1.0] {
            let settings = TrailSettings::builder()
                .with_line_count(30)
                .with_max_dist(max_dist)
                .with_line_speed(250.0)
                .with_camera_speed(500.0)
                .build()
                .unwrap();
            let mut sim = TrailSimulation::new(&settings, StdRng::seed_from_u64(17));

            for _ in 0..300 {
                sim.advance();
                assert_contained(&sim);
            }
        }
    }

    #[test]
    fn test_velocity_flips_only_on_escaping_axis() {
        // Camera sits at (1000, 0, 0)
        let mut sim = single_line_sim(
            Vector3::new(1395.0, 0.0, 0.0),
            Vector3::new(10.0, 3.0, -2.0),
            400.0,
        );
        sim.advance();

        let line = &sim.lines()[0];
        assert_eq!(line.velocity, Vector3::new(-10.0, 3.0, -2.0));
        assert_eq!(line.current(), Vector3::new(1395.0, 3.0, -2.0));
        assert_eq!(sim.respawn_count(), 0);
    }

    #[test]
    fn test_velocity_unchanged_inside_bounds() {
        let mut sim = single_line_sim(
            Vector3::new(1000.0, 0.0, 0.0),
            Vector3::new(10.0, -3.0, 2.0),
            400.0,
        );
        for _ in 0..10 {
            sim.advance();
        }

        let line = &sim.lines()[0];
        assert_eq!(line.velocity, Vector3::new(10.0, -3.0, 2.0));
        assert_eq!(line.current(), Vector3::new(1100.0, -30.0, 20.0));
    }

    #[test]
    fn test_reflect_converges_within_correction_limit() {
        let center = Vector3::new(0.0, 0.0, 0.0);
        // 485 + 10 = 495, then ten steps of -10 reach 395
        let mut position = Vector3::new(495.0, 0.0, 0.0);
        let mut velocity = Vector3::new(10.0, 0.0, 0.0);

        assert!(reflect(Axis::X, &mut position, &mut velocity, &center, 400.0));
        assert_eq!(position.x, 395.0);
        assert_eq!(velocity.x, -10.0);
    }

    #[test]
    fn test_reflect_gives_up_after_correction_limit() {
        let center = Vector3::new(0.0, 0.0, 0.0);
        // Needs eleven steps of -10 to get back inside
        let mut position = Vector3::new(505.0, 0.0, 0.0);
        let mut velocity = Vector3::new(10.0, 0.0, 0.0);

        assert!(!reflect(Axis::X, &mut position, &mut velocity, &center, 400.0));
        assert_eq!(position.x, 505.0 - 10.0 * MAX_CORRECTIONS as f64);
    }

    #[test]
    fn test_divergent_line_is_respawned_at_camera() {
        // Far outside and moving further away after the flip
        let mut sim = single_line_sim(
            Vector3::new(3000.0, 0.0, 0.0),
            Vector3::new(-10.0, 0.0, 0.0),
            400.0,
        );
        sim.advance();

        assert_eq!(sim.respawn_count(), 1);
        let line = &sim.lines()[0];
        assert_eq!(line.capacity(), 5);
        let spawn = line.current();
        assert!(line.history().iter().all(|p| *p == spawn));
        assert_contained(&sim);
    }

    #[test]
    fn test_zero_velocity_outside_bounds_respawns() {
        let mut sim = single_line_sim(
            Vector3::new(0.0, 0.0, 0.0),
            Vector3::new(0.0, 0.0, 0.0),
            400.0,
        );
        sim.advance();
        assert_eq!(sim.respawn_count(), 1);
        assert_contained(&sim);
    }

    #[test]
    fn test_single_still_line_end_to_end() {
        let settings = TrailSettings::builder()
            .with_line_count(1)
            .with_history_length(3)
            .with_max_dist(2000.0)
            .build()
            .unwrap();
        let p0 = Vector3::new(0.0, 0.0, 0.0);
        let line = Line::new(p0, Vector3::new(0.0, 0.0, 0.0), settings.history_length);
        let mut sim = TrailSimulation::from_parts(
            OrbitCamera::from_speed(settings.camera_speed),
            vec![line],
            &settings,
            StdRng::seed_from_u64(9),
        );

        sim.advance();

        let line = &sim.lines()[0];
        assert_eq!(line.history(), &[p0, p0, p0]);
        assert_eq!(line.cursor(), 1);
        assert_eq!(sim.respawn_count(), 0);
    }
}
