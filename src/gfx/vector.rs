//! 3D vector helpers shared by the simulation and projection stages.
//!
//! Positions and velocities are plain `cgmath` vectors in `f64`. The
//! [`VectorOps`] trait spells out the in-place operations the simulation
//! relies on, and [`Axis`] gives per-component access for containment.

use cgmath::{MetricSpace, Vector3 as CgVector3};

/// World-space vector used for line positions, velocities and the camera.
pub type Vector3 = CgVector3<f64>;

/// In-place operations on a [`Vector3`].
///
/// These mutate the receiver. History slots are overwritten through them
/// every tick, so callers hold a `&mut` to the slot they intend to change.
pub trait VectorOps {
    /// Copy all components of `other` into `self`.
    fn assign(&mut self, other: &Vector3);
    /// Accumulate `other` into `self` component-wise.
    fn add(&mut self, other: &Vector3);
    /// Flip the sign of every component.
    fn negate(&mut self);
    /// Euclidean distance to `other`.
    fn distance_to(&self, other: &Vector3) -> f64;
}

impl VectorOps for Vector3 {
    fn assign(&mut self, other: &Vector3) {
        *self = *other;
    }

    fn add(&mut self, other: &Vector3) {
        *self += *other;
    }

    fn negate(&mut self) {
        *self = -*self;
    }

    fn distance_to(&self, other: &Vector3) -> f64 {
        self.distance(*other)
    }
}

/// One of the three world axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    /// All axes in containment order.
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    #[inline]
    pub fn get(self, v: &Vector3) -> f64 {
        match self {
            Axis::X => v.x,
            Axis::Y => v.y,
            Axis::Z => v.z,
        }
    }

    #[inline]
    pub fn get_mut(self, v: &mut Vector3) -> &mut f64 {
        match self {
            Axis::X => &mut v.x,
            Axis::Y => &mut v.y,
            Axis::Z => &mut v.z,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_assign_copies_components() {
        let mut a = Vector3::new(1.0, 2.0, 3.0);
        a.assign(&Vector3::new(-4.0, 5.5, 0.0));
        assert_eq!(a, Vector3::new(-4.0, 5.5, 0.0));
    }

    #[test]
    fn test_add_and_negate_in_place() {
        let mut a = Vector3::new(1.0, 2.0, 3.0);
        VectorOps::add(&mut a, &Vector3::new(1.0, -2.0, 0.5));
        assert_eq!(a, Vector3::new(2.0, 0.0, 3.5));

        a.negate();
        assert_eq!(a, Vector3::new(-2.0, 0.0, -3.5));
    }

    #[test]
    fn test_distance_to() {
        let a = Vector3::new(0.0, 0.0, 0.0);
        let b = Vector3::new(3.0, 4.0, 12.0);
        assert!((a.distance_to(&b) - 13.0).abs() < 1e-12);
        assert!((b.distance_to(&a) - 13.0).abs() < 1e-12);
    }

    #[test]
    fn test_axis_access() {
        let mut v = Vector3::new(1.0, 2.0, 3.0);
        assert_eq!(Axis::Y.get(&v), 2.0);

        *Axis::Z.get_mut(&mut v) = -7.0;
        assert_eq!(v, Vector3::new(1.0, 2.0, -7.0));
    }
}
