//! The drawing surface the renderer paints onto.
//!
//! The trait is object-safe so hosts can hand the simulation a
//! `&mut dyn Surface` (browser canvas, CPU pixmap, recorder).

use glam::DVec2;

use crate::color::Rgba;

/// Minimal 2D drawing surface: clear a region, fill a circle.
///
/// Implementations cannot fail; a host without a usable surface never starts
/// the simulation in the first place.
pub trait Surface {
    /// Clears the axis-aligned rectangle at `(x, y)` with size `width x height`
    /// to fully transparent.
    fn clear_rect(&mut self, x: f64, y: f64, width: f64, height: f64);

    /// Fills a circle centred at `center` with the given paint, blending
    /// by the paint's alpha.
    fn fill_circle(&mut self, center: DVec2, radius: f64, paint: Rgba);
}

/// A recorded draw call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DrawCommand {
    ClearRect {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
    },
    FillCircle {
        center: DVec2,
        radius: f64,
        paint: Rgba,
    },
}

/// Surface that records every call instead of drawing.
#[derive(Debug, Clone, Default)]
pub struct RecordingSurface {
    commands: Vec<DrawCommand>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Drops recorded commands, e.g. between frames.
    pub fn reset(&mut self) {
        self.commands.clear();
    }

    /// Number of circles drawn since the last reset.
    pub fn circle_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::FillCircle { .. }))
            .count()
    }
}

impl Surface for RecordingSurface {
    fn clear_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        self.commands.push(DrawCommand::ClearRect {
            x,
            y,
            width,
            height,
        });
    }

    fn fill_circle(&mut self, center: DVec2, radius: f64, paint: Rgba) {
        self.commands.push(DrawCommand::FillCircle {
            center,
            radius,
            paint,
        });
    }
}
