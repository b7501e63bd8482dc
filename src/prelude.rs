//! # Line Trails Prelude
//!
//! Commonly used types in one import.
//!
//! ```no_run
//! use linetrails::prelude::*;
//!
//! fn main() -> anyhow::Result<()> {
//!     let settings = TrailSettings::builder().with_line_count(80).build()?;
//!     let mut app = TrailApp::new(settings)?;
//!     app.manager_mut().select_palette(Palette::Rainbow);
//!     app.run()?;
//!     Ok(())
//! }
//! ```

// Core application types
pub use crate::app::TrailApp;
pub use crate::default;
pub use crate::error::{Result, TrailError};

// Simulation
pub use crate::simulation::{
    Line, Parameter, SimulationManager, TrailSettings, TrailSimulation,
};

// Strategies and drawing
pub use crate::gfx::canvas::PixelCanvas;
pub use crate::gfx::depth_effect::DepthEffect;
pub use crate::gfx::palette::{ColorTable, Palette};
pub use crate::gfx::projection::Projector;
pub use crate::gfx::surface::{Color, RenderSurface, StrokeStyle};
pub use crate::gfx::trail_renderer::{Strategies, TrailRenderer};
pub use crate::gfx::vector::{Axis, Vector3, VectorOps};
pub use crate::gfx::OrbitCamera;

// Frame rate
pub use crate::performance::{FrameClock, FrameRate};
