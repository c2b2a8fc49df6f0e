//! The particle value type.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::color::{Rgba, Srgb};

/// One dot of the background.
///
/// Radius and opacity are fixed at creation. Velocity keeps its magnitude for
/// the particle's lifetime; only the sign of each component flips on
/// reflection. Position is soft-bounded by the viewport and may sit briefly
/// outside it before the next reflection turns the particle around.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Particle {
    pub position: DVec2,
    pub velocity: DVec2,
    pub radius: f64,
    pub opacity: f64,
}

impl Particle {
    pub fn new(position: DVec2, velocity: DVec2, radius: f64, opacity: f64) -> Self {
        Self {
            position,
            velocity,
            radius,
            opacity,
        }
    }

    /// Paint for this particle: the shared hue at this particle's opacity.
    pub fn paint(&self, hue: Srgb) -> Rgba {
        hue.with_alpha(self.opacity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paint_uses_opacity_as_alpha() {
        let p = Particle::new(DVec2::ZERO, DVec2::ZERO, 1.0, 0.42);
        let hue = Srgb::from_hex("#6366f1").unwrap();
        let paint = p.paint(hue);
        assert_eq!(paint.a, 0.42);
        assert_eq!(paint.rgb(), hue);
    }

    #[test]
    fn serde_round_trip() {
        let p = Particle::new(DVec2::new(1.5, 2.5), DVec2::new(-0.1, 0.2), 1.2, 0.3);
        let json = serde_json::to_string(&p).unwrap();
        let back: Particle = serde_json::from_str(&json).unwrap();
        assert_eq!(p, back);
    }
}
