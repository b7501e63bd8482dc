// src/simulation/mod.rs
//! Simulation system
//!
//! The particle lines, their containment around the orbiting camera, the
//! tunable settings and the tick scheduling that drives them.

pub mod line;
pub mod manager;
pub mod settings;
pub mod ticker;
pub mod trails;

pub use line::Line;
pub use manager::SimulationManager;
pub use settings::{Parameter, TrailSettings};
pub use trails::TrailSimulation;
