//! One simulation tick.
//!
//! Per particle, in order: integrate, reflect, then apply the pointer term.
//! Reflection only flips velocity signs; positions are never clamped, so a
//! particle that leaves the viewport drifts back in on following ticks. The
//! pointer term runs after the boundary test and may itself carry a particle
//! outside until the next tick's test catches it.

use glam::DVec2;

use crate::config::FieldParams;
use crate::particle::Particle;
use crate::pointer::PointerState;

/// Advances every particle by one tick.
pub fn advance(
    particles: &mut [Particle],
    pointer: PointerState,
    width: f64,
    height: f64,
    params: &FieldParams,
) {
    for particle in particles.iter_mut() {
        step_particle(particle, pointer, width, height, params);
    }
}

/// Advances a single particle by one tick.
pub fn step_particle(
    particle: &mut Particle,
    pointer: PointerState,
    width: f64,
    height: f64,
    params: &FieldParams,
) {
    particle.position += particle.velocity;
    reflect(particle, width, height);
    if let PointerState::At(target) = pointer {
        particle.position -= pointer_displacement(
            particle.position,
            target,
            params.interaction_radius,
            params.pointer_strength,
        );
    }
}

/// Flips each velocity component whose post-move coordinate lies outside
/// `[0, extent]`. The position itself is left alone.
pub fn reflect(particle: &mut Particle, width: f64, height: f64) {
    if particle.position.x > width || particle.position.x < 0.0 {
        particle.velocity.x = -particle.velocity.x;
    }
    if particle.position.y > height || particle.position.y < 0.0 {
        particle.velocity.y = -particle.velocity.y;
    }
}

/// Linear falloff in `(0, 1]` inside the interaction radius, zero outside.
pub fn pointer_force(distance: f64, interaction_radius: f64) -> f64 {
    if distance < interaction_radius {
        (interaction_radius - distance) / interaction_radius
    } else {
        0.0
    }
}

/// Amount subtracted from a particle's position for a pointer at `target`:
/// `delta * force * strength` with `delta = target - position`.
///
/// The displacement vanishes both outside the radius (force is zero) and as
/// the particle approaches the pointer (delta is zero).
pub fn pointer_displacement(
    position: DVec2,
    target: DVec2,
    interaction_radius: f64,
    strength: f64,
) -> DVec2 {
    let delta = target - position;
    let distance = delta.length();
    if distance < interaction_radius {
        delta * pointer_force(distance, interaction_radius) * strength
    } else {
        DVec2::ZERO
    }
}
