//! Paints one frame of the particle field.

use crate::color::Srgb;
use crate::particle::Particle;
use crate::surface::Surface;

/// Clears the `width x height` viewport, then fills one circle per particle in
/// `hue`, with alpha taken from each particle's opacity.
pub fn draw(surface: &mut dyn Surface, particles: &[Particle], width: f64, height: f64, hue: Srgb) {
    surface.clear_rect(0.0, 0.0, width, height);
    for particle in particles {
        surface.fill_circle(particle.position, particle.radius, particle.paint(hue));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::{DrawCommand, RecordingSurface};
    use glam::DVec2;

    fn hue() -> Srgb {
        Srgb::from_hex("#6366f1").unwrap()
    }

    #[test]
    fn clears_full_viewport_first() {
        let mut rec = RecordingSurface::new();
        draw(&mut rec, &[], 1280.0, 720.0, hue());
        assert_eq!(
            rec.commands(),
            &[DrawCommand::ClearRect {
                x: 0.0,
                y: 0.0,
                width: 1280.0,
                height: 720.0
            }]
        );
    }

    #[test]
    fn draws_every_particle_in_order_with_its_opacity() {
        let particles = [
            Particle::new(DVec2::new(1.0, 2.0), DVec2::ZERO, 0.5, 0.1),
            Particle::new(DVec2::new(-3.0, 4.0), DVec2::ZERO, 2.0, 0.6),
        ];
        let mut rec = RecordingSurface::new();
        draw(&mut rec, &particles, 100.0, 100.0, hue());
        assert_eq!(rec.circle_count(), 2);
        for (cmd, p) in rec.commands()[1..].iter().zip(particles.iter()) {
            match cmd {
                DrawCommand::FillCircle {
                    center,
                    radius,
                    paint,
                } => {
                    assert_eq!(*center, p.position);
                    assert_eq!(*radius, p.radius);
                    assert_eq!(paint.a, p.opacity);
                    assert_eq!(paint.rgb(), hue());
                }
                other => panic!("expected FillCircle, got {other:?}"),
            }
        }
    }
}
