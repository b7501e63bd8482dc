//! A single moving line: velocity plus a fixed-capacity ring of past positions.

use std::f64::consts::PI;

use rand::Rng;

use crate::gfx::vector::Vector3;

/// Default half-width of the cube around the spawn centre that new lines
/// appear in. Simulations shrink it to their `max_dist` when that is smaller.
pub const SPAWN_SPREAD: f64 = 100.0;

/// A simulated particle with a bounded position-history trail.
///
/// The buffer length never changes after construction. `cursor` always
/// indexes the most recently written slot.
#[derive(Clone, Debug, PartialEq)]
pub struct Line {
    history: Vec<Vector3>,
    cursor: usize,
    pub velocity: Vector3,
}

impl Line {
    /// Creates a line with every history slot at `position`.
    ///
    /// # Panics
    ///
    /// Panics if `history_length` is zero.
    pub fn new(position: Vector3, velocity: Vector3, history_length: usize) -> Self {
        assert!(history_length > 0, "history buffer needs at least one slot");
        Self {
            history: vec![position; history_length],
            cursor: 0,
            velocity,
        }
    }

    /// Spawns a line within `spread` of `center` on every axis, moving at
    /// `speed` in a random direction.
    ///
    /// The direction comes from uniform `theta` in `[0, 2π)` and `phi` in
    /// `[0, π)` fed through the spherical parameterization below. This is not
    /// uniform on the sphere (it favours the poles) and the motion's look
    /// depends on that.
    ///
    /// # Panics
    ///
    /// Panics if `spread` is not positive or `history_length` is zero.
    pub fn spawn<R: Rng>(
        center: Vector3,
        spread: f64,
        speed: f64,
        history_length: usize,
        rng: &mut R,
    ) -> Self {
        let mut offset = || rng.random_range(-spread..spread);
        let position = Vector3::new(center.x + offset(), center.y + offset(), center.z + offset());

        let theta = rng.random_range(0.0..2.0 * PI);
        let phi = rng.random_range(0.0..PI);
        let velocity = Vector3::new(
            speed * theta.sin() * phi.cos(),
            speed * theta.sin() * phi.sin(),
            speed * theta.cos(),
        );

        Self::new(position, velocity, history_length)
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.history.len()
    }

    #[inline]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn history(&self) -> &[Vector3] {
        &self.history
    }

    /// The most recently written position.
    pub fn current(&self) -> Vector3 {
        self.history[self.cursor]
    }

    /// Moves the cursor one slot forward and hands out that slot for overwriting.
    pub fn advance(&mut self) -> &mut Vector3 {
        self.cursor = self.successor_index(self.cursor);
        &mut self.history[self.cursor]
    }

    #[inline]
    pub fn successor_index(&self, index: usize) -> usize {
        (index + 1) % self.history.len()
    }

    /// Consecutive `(older, newer)` position pairs, oldest first, ending at
    /// the current position.
    pub fn segments(&self) -> Segments<'_> {
        Segments {
            line: self,
            index: self.successor_index(self.cursor),
        }
    }
}

/// Iterator over a line's trail segments. See [`Line::segments`].
pub struct Segments<'a> {
    line: &'a Line,
    index: usize,
}

impl<'a> Iterator for Segments<'a> {
    type Item = (&'a Vector3, &'a Vector3);

    fn next(&mut self) -> Option<Self::Item> {
        if self.index == self.line.cursor {
            return None;
        }
        let next = self.line.successor_index(self.index);
        let segment = (&self.line.history[self.index], &self.line.history[next]);
        self.index = next;
        Some(segment)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gfx::vector::VectorOps;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn test_spawn_fills_history_with_spawn_position() {
        let mut rng = StdRng::seed_from_u64(7);
        let center = Vector3::new(1000.0, 0.0, 0.0);
        let line = Line::spawn(center, SPAWN_SPREAD, 20.0, 50, &mut rng);

        assert_eq!(line.capacity(), 50);
        let first = line.history()[0];
        assert!(line.history().iter().all(|p| *p == first));
        assert_eq!(line.current(), first);

        // Zero-length trail: every segment starts and ends at the same point
        assert!(line.segments().all(|(a, b)| a == b));
    }

    #[test]
    fn test_spawn_position_and_speed() {
        let mut rng = StdRng::seed_from_u64(42);
        let center = Vector3::new(10.0, -20.0, 30.0);
        for _ in 0..200 {
            let line = Line::spawn(center, SPAWN_SPREAD, 20.0, 4, &mut rng);
            let p = line.current();
            assert!((p.x - center.x).abs() <= SPAWN_SPREAD);
            assert!((p.y - center.y).abs() <= SPAWN_SPREAD);
            assert!((p.z - center.z).abs() <= SPAWN_SPREAD);

            let speed = line.velocity.distance_to(&Vector3::new(0.0, 0.0, 0.0));
            assert!((speed - 20.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_spawn_respects_narrow_spread() {
        let mut rng = StdRng::seed_from_u64(9);
        let center = Vector3::new(1000.0, 0.0, 0.0);
        for _ in 0..200 {
            let p = Line::spawn(center, 5.0, 20.0, 4, &mut rng).current();
            assert!((p.x - center.x).abs() <= 5.0);
            assert!((p.y - center.y).abs() <= 5.0);
            assert!((p.z - center.z).abs() <= 5.0);
        }
    }

    #[test]
    fn test_advance_wraps() {
        let mut line = Line::new(Vector3::new(0.0, 0.0, 0.0), Vector3::new(1.0, 0.0, 0.0), 3);
        assert_eq!(line.cursor(), 0);

        line.advance().x = 1.0;
        assert_eq!(line.cursor(), 1);
        line.advance().x = 2.0;
        assert_eq!(line.cursor(), 2);
        line.advance().x = 3.0;
        assert_eq!(line.cursor(), 0);

        assert_eq!(line.current().x, 3.0);
        assert_eq!(line.successor_index(2), 0);
    }

    #[test]
    fn test_segments_walk_oldest_to_newest() {
        let mut line = Line::new(Vector3::new(0.0, 0.0, 0.0), Vector3::new(0.0, 0.0, 0.0), 4);
        for x in 1..=5 {
            line.advance().x = x as f64;
        }
        // Slots now hold [4, 5, 2, 3] with the cursor on 5
        let xs: Vec<(f64, f64)> = line.segments().map(|(a, b)| (a.x, b.x)).collect();
        assert_eq!(xs, vec![(2.0, 3.0), (3.0, 4.0), (4.0, 5.0)]);
    }

    #[test]
    fn test_single_slot_line_has_no_segments() {
        let line = Line::new(Vector3::new(1.0, 2.0, 3.0), Vector3::new(0.0, 0.0, 0.0), 1);
        assert_eq!(line.segments().count(), 0);
    }
}
