//! Draw stage: projects every history segment and strokes it onto a surface.

use rand::Rng;

use super::depth_effect::DepthEffect;
use super::palette::{ColorTable, Palette};
use super::projection::{ProjectionParams, Projector};
use super::surface::{Color, RenderSurface, StrokeStyle};
use crate::simulation::settings::TrailSettings;
use crate::simulation::trails::TrailSimulation;

/// The active strategy in each selectable category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Strategies {
    pub projector: Projector,
    pub depth_effect: DepthEffect,
    pub palette: Palette,
}

/// Per-frame draw statistics
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameStats {
    pub segments_drawn: u32,
    pub segments_skipped: u32,
}

pub struct TrailRenderer {
    params: ProjectionParams,
    width_factor: f64,
    fade: Color,
}

impl TrailRenderer {
    pub fn new(settings: &TrailSettings) -> Self {
        Self {
            params: ProjectionParams::from_settings(settings),
            width_factor: settings.width_factor,
            fade: Color::BLACK.with_alpha(settings.fill_opacity()),
        }
    }

    pub fn params(&self) -> &ProjectionParams {
        &self.params
    }

    /// Fades the previous frame and strokes every line's trail.
    ///
    /// A segment is skipped when its older endpoint projects to a depth at
    /// or below zero. The stroke style carries over from one segment to the
    /// next, so effects that only set width keep the last colour and vice
    /// versa.
    pub fn draw<S, R>(
        &self,
        simulation: &TrailSimulation<R>,
        strategies: &Strategies,
        table: &ColorTable,
        surface: &mut S,
    ) -> FrameStats
    where
        S: RenderSurface + ?Sized,
        R: Rng,
    {
        surface.fill(self.fade);

        let mut stats = FrameStats::default();
        let mut style = StrokeStyle::default();
        let camera = simulation.camera_position();
        let projector = strategies.projector;

        for line in simulation.lines() {
            for (from, to) in line.segments() {
                let start = projector.project(from, &camera, &self.params);
                let Some(depth) = start.depth_byte() else {
                    stats.segments_skipped += 1;
                    continue;
                };
                strategies
                    .depth_effect
                    .apply(depth, self.width_factor, table, &mut style);

                let end = projector.project(to, &camera, &self.params);
                surface.begin_path();
                surface.move_to(start.x, start.y);
                surface.line_to(end.x, end.y);
                surface.stroke(&style);
                stats.segments_drawn += 1;
            }
        }

        stats
    }
}
