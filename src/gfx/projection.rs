//! 3D to 2D projection strategies.
//!
//! A [`Projector`] maps a world point and the camera position to a screen
//! coordinate plus a synthetic depth value. Depths at or below zero mean
//! the segment is not drawn; depths above 255 are clamped.

use std::fmt;
use std::str::FromStr;

use crate::error::{Result, TrailError};
use crate::gfx::vector::Vector3;
use crate::simulation::settings::TrailSettings;

/// Depth reported by projections without depth shading.
pub const FLAT_DEPTH: i64 = 255;

/// Screen and depth constants a projection needs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectionParams {
    pub half_width: f64,
    pub half_height: f64,
    pub max_dist: f64,
    pub z_factor: f64,
}

impl ProjectionParams {
    pub fn from_settings(settings: &TrailSettings) -> Self {
        Self {
            half_width: settings.screen_width as f64 / 2.0,
            half_height: settings.screen_height as f64 / 2.0,
            max_dist: settings.max_dist,
            z_factor: settings.z_factor,
        }
    }
}

/// A projected point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projected {
    pub x: f64,
    pub y: f64,
    /// Unclamped depth value
    pub depth: i64,
}

impl Projected {
    /// The depth byte to shade with, or `None` if the point should be skipped.
    pub fn depth_byte(&self) -> Option<u8> {
        if self.depth <= 0 {
            None
        } else {
            Some(self.depth.min(255) as u8)
        }
    }
}

/// Projection strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Projector {
    /// Orthographic onto the X/Z plane, no depth shading
    Xz,
    /// Orthographic onto the X/Y plane, no depth shading
    Xy,
    /// Y-depth perspective normalized by the containment extent
    #[default]
    Perspective,
    /// Y-depth perspective on the raw offset; unstable close to the camera
    PerspectiveRaw,
}

impl Projector {
    pub const CATEGORY: &'static str = "projector";

    pub const ALL: [Projector; 4] = [
        Projector::Xz,
        Projector::Xy,
        Projector::Perspective,
        Projector::PerspectiveRaw,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Projector::Xz => "xz",
            Projector::Xy => "xy",
            Projector::Perspective => "perspective",
            Projector::PerspectiveRaw => "perspective_raw",
        }
    }

    pub fn project(self, p: &Vector3, camera: &Vector3, params: &ProjectionParams) -> Projected {
        match self {
            Projector::Xz => Projected {
                x: p.x - camera.x + params.half_width,
                y: p.z - camera.z + params.half_height,
                depth: FLAT_DEPTH,
            },
            Projector::Xy => Projected {
                x: p.x - camera.x + params.half_width,
                y: p.y - camera.y + params.half_height,
                depth: FLAT_DEPTH,
            },
            Projector::Perspective => {
                let dz = (p.y - camera.y + params.max_dist) * 0.5 / params.max_dist;
                perspective(p, camera, dz, params)
            }
            Projector::PerspectiveRaw => perspective(p, camera, p.y - camera.y, params),
        }
    }
}

fn perspective(p: &Vector3, camera: &Vector3, dz: f64, params: &ProjectionParams) -> Projected {
    let r = 1.0 / (dz + 1.0);
    Projected {
        x: (p.x - camera.x) * r + params.half_width,
        y: (p.z - camera.z) * r + params.half_height,
        // NaN and infinities saturate, so degenerate depths end up skipped or clamped
        depth: (255.0 - dz * params.z_factor).round() as i64,
    }
}

impl fmt::Display for Projector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Projector {
    type Err = TrailError;

    fn from_str(s: &str) -> Result<Self> {
        Projector::ALL
            .into_iter()
            .find(|p| p.name() == s)
            .ok_or_else(|| TrailError::UnknownStrategy {
                category: Self::CATEGORY,
                name: s.to_string(),
            })
    }
}
