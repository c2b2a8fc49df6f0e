//! The simulation driver: ties store, pointer, stepper and renderer together.
//!
//! The host owns scheduling. Each display refresh it calls
//! [`Simulation::frame`] and reschedules while the result is
//! [`FrameStatus::Continue`]. Input callbacks run between frames and only
//! write to the pointer tracker or trigger a resize.

use crate::color::Srgb;
use crate::config::FieldParams;
use crate::particle::Particle;
use crate::pointer::{PointerState, PointerTracker};
use crate::renderer;
use crate::stepper;
use crate::store::ParticleField;
use crate::surface::Surface;
use crate::theme::Theme;

/// Whether the host should schedule another frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameStatus {
    Continue,
    Stopped,
}

/// A running particle background.
#[derive(Debug, Clone)]
pub struct Simulation {
    field: ParticleField,
    pointer: PointerTracker,
    params: FieldParams,
    hue: Srgb,
    running: bool,
    frames: u64,
}

impl Simulation {
    /// Creates a running simulation with an empty field. Call
    /// [`Simulation::resize`] with the viewport extents before the first frame.
    pub fn new(params: FieldParams, seed: u64) -> Self {
        Self {
            field: ParticleField::new(seed),
            pointer: PointerTracker::new(),
            params,
            hue: Theme::default().particle_hue(),
            running: true,
            frames: 0,
        }
    }

    /// Rebuilds the particle field for new viewport extents.
    pub fn resize(&mut self, width: f64, height: f64) {
        self.field.resize(width, height, &self.params);
    }

    pub fn pointer_moved(&mut self, x: f64, y: f64) {
        self.pointer.on_move(x, y);
    }

    pub fn pointer_left(&mut self) {
        self.pointer.on_leave();
    }

    pub fn pointer(&self) -> PointerState {
        self.pointer.current()
    }

    pub fn set_hue(&mut self, hue: Srgb) {
        self.hue = hue;
    }

    pub fn hue(&self) -> Srgb {
        self.hue
    }

    pub fn params(&self) -> &FieldParams {
        &self.params
    }

    pub fn particles(&self) -> &[Particle] {
        self.field.particles()
    }

    /// Frames completed since creation.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Advances every particle by one tick against the current pointer state.
    pub fn step(&mut self) {
        let pointer = self.pointer.current();
        let (width, height) = (self.field.width(), self.field.height());
        stepper::advance(
            self.field.particles_mut(),
            pointer,
            width,
            height,
            &self.params,
        );
    }

    /// Paints the current state without advancing it.
    pub fn draw(&self, surface: &mut dyn Surface) {
        renderer::draw(
            surface,
            self.field.particles(),
            self.field.width(),
            self.field.height(),
            self.hue,
        );
    }

    /// One scheduled iteration: step, then draw. After [`Simulation::stop`]
    /// this does nothing and reports [`FrameStatus::Stopped`].
    pub fn frame(&mut self, surface: &mut dyn Surface) -> FrameStatus {
        if !self.running {
            return FrameStatus::Stopped;
        }
        self.step();
        self.draw(surface);
        self.frames += 1;
        FrameStatus::Continue
    }

    /// Runs up to `frames` iterations back to back, for headless hosts.
    /// Returns the number of frames actually run.
    pub fn run(&mut self, frames: usize, surface: &mut dyn Surface) -> usize {
        let mut ran = 0;
        while ran < frames && self.frame(surface) == FrameStatus::Continue {
            ran += 1;
        }
        ran
    }

    /// Clears the liveness flag; the next frame reports `Stopped`.
    pub fn stop(&mut self) {
        if self.running {
            log::info!("particle simulation stopped after {} frames", self.frames);
        }
        self.running = false;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::{DrawCommand, RecordingSurface};
    use glam::DVec2;

    fn sim_900() -> Simulation {
        let mut sim = Simulation::new(FieldParams::default(), 42);
        sim.resize(900.0, 900.0);
        sim
    }

    #[test]
    fn end_to_end_900_square() {
        let mut sim = sim_900();
        assert_eq!(sim.particles().len(), 90);

        let before: Vec<Particle> = sim.particles().to_vec();
        let mut rec = RecordingSurface::new();
        assert_eq!(sim.frame(&mut rec), FrameStatus::Continue);

        // No pointer: every particle moved by exactly its velocity.
        for (b, a) in before.iter().zip(sim.particles()) {
            assert_eq!(a.position, b.position + b.velocity);
            assert_eq!(a.velocity.abs(), b.velocity.abs());
        }
        assert_eq!(rec.circle_count(), 90);
        assert_eq!(
            rec.commands()[0],
            DrawCommand::ClearRect {
                x: 0.0,
                y: 0.0,
                width: 900.0,
                height: 900.0
            }
        );
    }

    #[test]
    fn pointer_on_particle_barely_moves_it() {
        let mut sim = sim_900();
        let target = sim.particles()[0];
        let landing = target.position + target.velocity;
        sim.pointer_moved(landing.x, landing.y);
        sim.step();
        let after = sim.particles()[0];
        assert!(
            (after.position - landing).length() < 1e-9,
            "displacement at zero distance should vanish, moved to {}",
            after.position
        );
    }

    #[test]
    fn pointer_left_restores_plain_motion() {
        let mut sim = sim_900();
        sim.pointer_moved(450.0, 450.0);
        sim.pointer_left();
        assert_eq!(sim.pointer(), PointerState::Absent);
        let before = sim.particles().to_vec();
        sim.step();
        for (b, a) in before.iter().zip(sim.particles()) {
            assert_eq!(a.position, b.position + b.velocity);
        }
    }

    #[test]
    fn resize_takes_effect_on_next_frame() {
        let mut sim = sim_900();
        let mut rec = RecordingSurface::new();
        sim.frame(&mut rec);
        sim.resize(300.0, 300.0);
        rec.reset();
        sim.frame(&mut rec);
        assert_eq!(rec.circle_count(), 10);
    }

    #[test]
    fn velocity_magnitudes_survive_many_frames() {
        let mut sim = sim_900();
        let before: Vec<DVec2> = sim.particles().iter().map(|p| p.velocity.abs()).collect();
        let mut rec = RecordingSurface::new();
        sim.run(2000, &mut rec);
        for (b, a) in before.iter().zip(sim.particles()) {
            assert_eq!(*b, a.velocity.abs());
        }
    }

    #[test]
    fn stop_halts_frames_without_drawing() {
        let mut sim = sim_900();
        let mut rec = RecordingSurface::new();
        assert_eq!(sim.run(3, &mut rec), 3);
        sim.stop();
        rec.reset();
        let before = sim.particles().to_vec();
        assert_eq!(sim.frame(&mut rec), FrameStatus::Stopped);
        assert!(rec.commands().is_empty());
        assert_eq!(sim.particles(), before.as_slice());
        assert_eq!(sim.run(5, &mut rec), 0);
        assert_eq!(sim.frames(), 3);
        assert!(!sim.is_running());
    }

    #[test]
    fn empty_viewport_frames_only_clear() {
        let mut sim = Simulation::new(FieldParams::default(), 1);
        sim.resize(0.0, 0.0);
        let mut rec = RecordingSurface::new();
        assert_eq!(sim.frame(&mut rec), FrameStatus::Continue);
        assert_eq!(rec.commands().len(), 1);
    }

    #[test]
    fn hue_change_applies_to_next_draw() {
        let mut sim = sim_900();
        sim.set_hue(Theme::Light.particle_hue());
        let mut rec = RecordingSurface::new();
        sim.draw(&mut rec);
        match rec.commands()[1] {
            DrawCommand::FillCircle { paint, .. } => {
                assert_eq!(paint.rgb(), Theme::Light.particle_hue())
            }
            other => panic!("expected FillCircle, got {other:?}"),
        }
    }

    #[test]
    fn resize_uses_the_simulation_params() {
        let params = FieldParams {
            area_per_particle: 4500.0,
            ..FieldParams::default()
        };
        let mut sim = Simulation::new(params, 3);
        assert_eq!(sim.params(), &params);
        sim.resize(900.0, 900.0);
        assert_eq!(sim.particles().len(), 180);
    }
}
