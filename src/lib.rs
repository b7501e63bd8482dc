// src/lib.rs
//! Line Trails
//!
//! An animated 3D line-trail visualization: particles with a bounded history
//! of positions, kept inside a box around an orbiting camera and drawn with
//! pluggable projection and depth effects. Rendered in software onto an RGBA
//! canvas and presented through wgpu and winit with an imgui control panel.

pub mod app;
pub mod error;
pub mod gfx;
pub mod performance;
pub mod prelude;
pub mod simulation;

// Re-export main types for convenience
pub use app::TrailApp;
pub use error::{Result, TrailError};
pub use simulation::settings::TrailSettings;

/// Creates a trail application with default settings
pub fn default() -> Result<TrailApp> {
    TrailApp::new(TrailSettings::default())
}
