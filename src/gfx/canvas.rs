//! Software RGBA canvas implementing [`RenderSurface`] on a tiny-skia pixmap.
//!
//! The pixmap starts opaque and every operation is a source-over blend, so
//! it stays opaque and its premultiplied bytes can be uploaded as plain
//! RGBA8. A translucent full-surface fill fades earlier strokes the same way
//! a browser canvas does.

use tiny_skia::{LineCap, Paint, PathBuilder, Pixmap, Rect, Stroke, Transform};

use super::surface::{Color, RenderSurface, StrokeStyle};
use crate::error::{Result, TrailError};

pub struct PixelCanvas {
    pixmap: Pixmap,
    path: PathBuilder,
}

impl PixelCanvas {
    /// Creates an opaque black canvas.
    pub fn new(width: u32, height: u32) -> Result<Self> {
        let mut pixmap =
            Pixmap::new(width, height).ok_or(TrailError::CanvasSize { width, height })?;
        pixmap.fill(tiny_skia::Color::BLACK);
        Ok(Self {
            pixmap,
            path: PathBuilder::new(),
        })
    }

    /// Overwrites every pixel with `color`, ignoring its alpha.
    pub fn clear(&mut self, color: Color) {
        self.pixmap
            .fill(tiny_skia::Color::from_rgba8(color.r, color.g, color.b, 255));
    }

    /// RGBA of one pixel, `None` outside the canvas.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        self.pixmap
            .pixel(x, y)
            .map(|p| [p.red(), p.green(), p.blue(), p.alpha()])
    }

    /// Raw RGBA8 bytes, row-major, for texture upload.
    pub fn as_bytes(&self) -> &[u8] {
        self.pixmap.data()
    }
}

fn paint(color: Color) -> Paint<'static> {
    let mut paint = Paint::default();
    let alpha = (color.a.clamp(0.0, 1.0) * 255.0).round() as u8;
    paint.set_color_rgba8(color.r, color.g, color.b, alpha);
    paint.anti_alias = true;
    paint
}

impl RenderSurface for PixelCanvas {
    fn width(&self) -> u32 {
        self.pixmap.width()
    }

    fn height(&self) -> u32 {
        self.pixmap.height()
    }

    fn fill(&mut self, color: Color) {
        let Some(rect) = Rect::from_xywh(0.0, 0.0, self.width() as f32, self.height() as f32)
        else {
            return;
        };
        self.pixmap
            .fill_rect(rect, &paint(color), Transform::identity(), None);
    }

    fn begin_path(&mut self) {
        self.path = PathBuilder::new();
    }

    fn move_to(&mut self, x: f64, y: f64) {
        self.path.move_to(x as f32, y as f32);
    }

    fn line_to(&mut self, x: f64, y: f64) {
        self.path.line_to(x as f32, y as f32);
    }

    /// Strokes the current path; the path stays current like on a canvas.
    ///
    /// Paths with non-finite points have no bounds and are dropped.
    fn stroke(&mut self, style: &StrokeStyle) {
        let Some(path) = self.path.clone().finish() else {
            return;
        };
        let stroke = Stroke {
            width: style.width as f32,
            line_cap: LineCap::Butt,
            ..Default::default()
        };
        self.pixmap.stroke_path(
            &path,
            &paint(style.color),
            &stroke,
            Transform::identity(),
            None,
        );
    }
}
