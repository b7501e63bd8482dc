//! Autonomous orbit camera that the containment cube follows.

use crate::gfx::vector::Vector3;

/// Distance from the origin at which the camera orbits.
pub const ORBIT_RADIUS: f64 = 1000.0;

/// Scale from the `camera_speed` tunable to radians per tick.
pub const ANGULAR_SPEED_SCALE: f64 = 0.0001;

/// Camera circling the origin in the horizontal plane.
///
/// The angle is unbounded; the trigonometric functions wrap it implicitly.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitCamera {
    pub angle: f64,
    pub radius: f64,
    pub angular_velocity: f64,
}

impl OrbitCamera {
    pub fn new(angular_velocity: f64) -> Self {
        Self {
            angle: 0.0,
            radius: ORBIT_RADIUS,
            angular_velocity,
        }
    }

    /// Builds a camera from the `camera_speed` tunable.
    pub fn from_speed(camera_speed: f64) -> Self {
        Self::new(camera_speed * ANGULAR_SPEED_SCALE)
    }

    /// Current eye position.
    pub fn position(&self) -> Vector3 {
        calculate_orbit_position(self.angle, self.radius)
    }

    /// Moves one tick along the orbit.
    pub fn advance(&mut self) {
        self.angle += self.angular_velocity;
    }
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self::from_speed(30.0)
    }
}

fn calculate_orbit_position(angle: f64, radius: f64) -> Vector3 {
    Vector3::new(angle.cos() * radius, angle.sin() * radius, 0.0)
}
