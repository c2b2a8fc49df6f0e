//! The particle store: owns the field and regenerates it on resize.

use glam::DVec2;

use crate::config::FieldParams;
use crate::particle::Particle;
use crate::prng::Xorshift64;

/// Ordered collection of particles sized to the current viewport.
///
/// The field is never resized incrementally. Every [`ParticleField::resize`]
/// discards all particles and scatters a fresh set.
#[derive(Debug, Clone)]
pub struct ParticleField {
    particles: Vec<Particle>,
    width: f64,
    height: f64,
    rng: Xorshift64,
}

impl ParticleField {
    /// Creates an empty field; call [`ParticleField::resize`] to populate it.
    pub fn new(seed: u64) -> Self {
        Self {
            particles: Vec::new(),
            width: 0.0,
            height: 0.0,
            rng: Xorshift64::new(seed),
        }
    }

    /// Replaces the field with `floor(width * height / area_per_particle)`
    /// freshly scattered particles.
    ///
    /// Degenerate extents produce an empty field.
    pub fn resize(&mut self, width: f64, height: f64, params: &FieldParams) {
        let count = params.particle_count(width, height);
        self.width = width;
        self.height = height;
        self.particles.clear();
        self.particles.reserve(count);
        for _ in 0..count {
            let particle = scatter(&mut self.rng, width, height, params);
            self.particles.push(particle);
        }
        log::debug!("particle field resized to {width}x{height}: {count} particles");
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Mutable access for the stepper.
    pub fn particles_mut(&mut self) -> &mut [Particle] {
        &mut self.particles
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    /// Viewport width the field was last sized for.
    pub fn width(&self) -> f64 {
        self.width
    }

    /// Viewport height the field was last sized for.
    pub fn height(&self) -> f64 {
        self.height
    }
}

fn scatter(rng: &mut Xorshift64, width: f64, height: f64, params: &FieldParams) -> Particle {
    let position = DVec2::new(rng.next_range(0.0, width), rng.next_range(0.0, height));
    let velocity = DVec2::new(
        rng.next_range(-params.max_speed, params.max_speed),
        rng.next_range(-params.max_speed, params.max_speed),
    );
    let radius = rng.next_range(params.min_radius, params.max_radius);
    let opacity = rng.next_range(params.min_opacity, params.max_opacity);
    Particle::new(position, velocity, radius, opacity)
}
