//! CPU-side RGBA8 drawing surface.
//!
//! Pixels store straight (non-premultiplied) alpha. Circles are filled with a
//! one-pixel linear coverage ramp at the rim so sub-pixel particles still
//! leave a faint dot, roughly matching a browser canvas.

use glam::DVec2;
use particle_field_core::color::{Rgba, Srgb};
use particle_field_core::error::FieldError;
use particle_field_core::surface::Surface;

/// Row-major RGBA8 pixel buffer implementing [`Surface`].
#[derive(Debug, Clone)]
pub struct Pixmap {
    width: usize,
    height: usize,
    data: Vec<u8>,
}

impl Pixmap {
    /// Creates a fully transparent pixmap.
    ///
    /// Returns `FieldError::InvalidDimensions` if either dimension is zero or
    /// the buffer size overflows `usize`.
    pub fn new(width: usize, height: usize) -> Result<Self, FieldError> {
        if width == 0 || height == 0 {
            return Err(FieldError::InvalidDimensions);
        }
        let len = width
            .checked_mul(height)
            .and_then(|n| n.checked_mul(4))
            .ok_or(FieldError::InvalidDimensions)?;
        Ok(Self {
            width,
            height,
            data: vec![0; len],
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Raw RGBA8 bytes, row-major, straight alpha.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// RGBA8 value at `(x, y)`, or `None` outside the pixmap.
    pub fn pixel(&self, x: usize, y: usize) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = (y * self.width + x) * 4;
        Some([
            self.data[i],
            self.data[i + 1],
            self.data[i + 2],
            self.data[i + 3],
        ])
    }

    /// Composites the pixmap over an opaque background, returning opaque RGBA8.
    pub fn flatten(&self, background: Srgb) -> Vec<u8> {
        let [br, bg, bb] = background.to_u8();
        self.data
            .chunks_exact(4)
            .flat_map(|px| {
                let a = px[3] as f64 / 255.0;
                let mix = |c: u8, b: u8| (c as f64 * a + b as f64 * (1.0 - a)).round() as u8;
                [mix(px[0], br), mix(px[1], bg), mix(px[2], bb), 255u8]
            })
            .collect()
    }

    /// Pixel index range `[start, end)` covered by the span `[lo, hi]`,
    /// clipped to `0..limit`.
    fn span(lo: f64, hi: f64, limit: usize) -> (usize, usize) {
        let start = lo.floor().max(0.0);
        let end = hi.ceil().min(limit as f64);
        if end <= start {
            return (0, 0);
        }
        (start as usize, end as usize)
    }

    fn blend(&mut self, x: usize, y: usize, paint: Rgba, alpha: f64) {
        let i = (y * self.width + x) * 4;
        let src = [paint.r, paint.g, paint.b];
        let da = self.data[i + 3] as f64 / 255.0;
        let out_a = alpha + da * (1.0 - alpha);
        if out_a <= 0.0 {
            return;
        }
        for (c, s) in src.iter().enumerate() {
            let d = self.data[i + c] as f64 / 255.0;
            let v = (s * alpha + d * da * (1.0 - alpha)) / out_a;
            self.data[i + c] = (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        }
        self.data[i + 3] = (out_a.clamp(0.0, 1.0) * 255.0).round() as u8;
    }
}

impl Surface for Pixmap {
    fn clear_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        let (x0, x1) = Self::span(x, x + width, self.width);
        let (y0, y1) = Self::span(y, y + height, self.height);
        for row in y0..y1 {
            let start = (row * self.width + x0) * 4;
            let end = (row * self.width + x1) * 4;
            self.data[start..end].fill(0);
        }
    }

    fn fill_circle(&mut self, center: DVec2, radius: f64, paint: Rgba) {
        if radius.is_nan() || radius <= 0.0 || paint.a <= 0.0 {
            return;
        }
        let reach = radius + 0.5;
        let (x0, x1) = Self::span(center.x - reach, center.x + reach, self.width);
        let (y0, y1) = Self::span(center.y - reach, center.y + reach, self.height);
        for py in y0..y1 {
            for px in x0..x1 {
                let pixel_center = DVec2::new(px as f64 + 0.5, py as f64 + 0.5);
                let coverage = (reach - pixel_center.distance(center)).clamp(0.0, 1.0);
                if coverage > 0.0 {
                    self.blend(px, py, paint, paint.a * coverage);
                }
            }
        }
    }
}
