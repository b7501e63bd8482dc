//! # Graphics Module
//!
//! Everything between a simulated point in space and a pixel on screen.
//!
//! ## Architecture Overview
//!
//! - **Vectors** ([`vector`]) - `f64` 3-vectors with in-place helpers
//! - **Camera** ([`camera`]) - The orbiting viewpoint the lines are kept around
//! - **Projection** ([`projection`]) - Orthographic and perspective projectors
//! - **Depth Effects** ([`depth_effect`], [`palette`]) - Depth-driven stroke width and colour
//! - **Drawing** ([`surface`], [`canvas`], [`trail_renderer`]) - A 2D drawing surface and the
//!   pass that strokes every trail segment onto it
//! - **Presentation** ([`render_engine`], [`ui`]) - wgpu blit of the canvas plus the imgui panel
//!
//! ## Usage
//!
//! ```no_run
//! use linetrails::gfx::{canvas::PixelCanvas, trail_renderer::{Strategies, TrailRenderer}};
//! use linetrails::gfx::palette::ColorTable;
//! use linetrails::simulation::{TrailSettings, TrailSimulation};
//! use rand::{rngs::StdRng, SeedableRng};
//!
//! let settings = TrailSettings::default();
//! let mut rng = StdRng::seed_from_u64(7);
//! let mut simulation = TrailSimulation::new(&settings, StdRng::seed_from_u64(8));
//! let strategies = Strategies::default();
//! let table = ColorTable::build(strategies.palette, &mut rng);
//! let mut canvas = PixelCanvas::new(settings.screen_width, settings.screen_height)?;
//!
//! simulation.advance();
//! TrailRenderer::new(&settings).draw(&simulation, &strategies, &table, &mut canvas);
//! # Ok::<(), linetrails::TrailError>(())
//! ```

pub mod camera;
pub mod canvas;
pub mod depth_effect;
pub mod palette;
pub mod projection;
pub mod render_engine;
pub mod surface;
pub mod trail_renderer;
pub mod ui;
pub mod vector;

// Re-export commonly used types
pub use camera::OrbitCamera;
pub use render_engine::RenderEngine;
pub use vector::{Axis, Vector3, VectorOps};
