//! `Surface` over a browser 2D canvas context.

use glam::DVec2;
use particle_field_core::color::Rgba;
use particle_field_core::surface::Surface;
use web_sys::CanvasRenderingContext2d;

pub struct CanvasSurface {
    ctx: CanvasRenderingContext2d,
}

impl CanvasSurface {
    pub fn new(ctx: CanvasRenderingContext2d) -> Self {
        Self { ctx }
    }
}

impl Surface for CanvasSurface {
    fn clear_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        self.ctx.clear_rect(x, y, width, height);
    }

    fn fill_circle(&mut self, center: DVec2, radius: f64, paint: Rgba) {
        self.ctx.begin_path();
        // arc() throws on a negative radius; such a particle is simply skipped.
        if self
            .ctx
            .arc(center.x, center.y, radius, 0.0, std::f64::consts::TAU)
            .is_err()
        {
            return;
        }
        self.ctx.set_fill_style_str(&paint.to_css());
        self.ctx.fill();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Drawing needs a live canvas, so only the API shape is checked here.

    #[test]
    fn canvas_surface_is_a_surface() {
        fn _assert_surface(s: &mut CanvasSurface) -> &mut dyn Surface {
            s
        }
    }
}
