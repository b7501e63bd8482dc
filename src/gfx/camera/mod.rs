//! Camera types.

pub mod orbit_camera;

// Re-export main types
pub use orbit_camera::{OrbitCamera, ANGULAR_SPEED_SCALE, ORBIT_RADIUS};
